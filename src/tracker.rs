mod centroid_tracker;
mod matching;
mod rect;
mod track;
mod tracked_objects;

pub use centroid_tracker::{AssignmentStrategy, CentroidTracker, TrackerConfig};
pub use matching::{
    AssignmentResult, Detection, centroid_distance, greedy_assignment, linear_assignment,
};
pub use rect::{Centroid, Rect};
pub use track::Track;
pub use tracked_objects::TrackedObjects;
