//! Centroid multi-object tracking with directional line-crossing counting.
//!
//! Detections flow one way each frame: a [`CentroidTracker`] turns them into
//! stable track ids, and a [`LineCounter`] turns track movement across a
//! horizontal line into entry and exit events plus session statistics.
//!
//! ```
//! use linecount_rs::{CentroidTracker, Detection, LineCounter, TrackerConfig};
//!
//! let mut tracker = CentroidTracker::new(TrackerConfig::default());
//! let mut counter = LineCounter::from_frame_height(480);
//!
//! for center_y in [200.0, 230.0, 260.0] {
//!     let det = Detection::new(300.0, center_y - 20.0, 40.0, 40.0, 0.9);
//!     let tracked = tracker.update(&[det]);
//!     counter.update(&tracked);
//! }
//!
//! assert_eq!(counter.stats().entries, 1);
//! ```

pub mod counter;
pub mod error;
pub mod integration;
pub mod tracker;

pub use counter::{CounterStats, CrossingEvent, EventType, LineCounter, TrackState};
pub use error::{Result, TrackingError};
pub use integration::{
    CountingPipeline, DetectionBuilder, DetectionSource, FrameReport, IntoDetections,
    SessionSummary,
};
pub use tracker::{AssignmentStrategy, CentroidTracker, Detection, Rect, TrackedObjects, TrackerConfig};
