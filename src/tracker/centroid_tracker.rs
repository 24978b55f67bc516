//! Nearest-centroid tracker implementation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackingError};
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::rect::Centroid;
use crate::tracker::track::Track;
use crate::tracker::tracked_objects::TrackedObjects;

/// How existing tracks are paired with new detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Row-minimum greedy pairing. Cheap and approximate.
    #[default]
    Greedy,
    /// Minimum total distance pairing (Jonker-Volgenant).
    Optimal,
}

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames a track survives before it is dropped
    pub max_disappeared: u32,
    /// Largest centroid distance, in pixels, accepted as a match
    pub max_distance: f32,
    pub strategy: AssignmentStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 30,
            max_distance: 100.0,
            strategy: AssignmentStrategy::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn with_max_disappeared(mut self, max_disappeared: u32) -> Self {
        self.max_disappeared = max_disappeared;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_strategy(mut self, strategy: AssignmentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(TrackingError::config(format!(
                "max_distance must be a finite, non-negative pixel distance, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Multi-object tracker that keeps identities by matching detection
/// centroids to the last known centroid of each track.
///
/// Track ids start at 0 and increase by one per registration for the
/// lifetime of the instance; an expired id is never handed out again.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    /// Active tracks, always ordered by id.
    tracks: Vec<Track>,
    next_id: u64,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 0,
            config,
        }
    }

    /// Create a tracker after checking the configuration.
    pub fn try_new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Process one frame of detections and return the id each detection
    /// was associated with.
    ///
    /// Detections must satisfy [`Detection::validate`]; malformed input is
    /// only caught by a debug assertion.
    pub fn update(&mut self, detections: &[Detection]) -> TrackedObjects {
        debug_assert!(
            detections.iter().all(Detection::is_valid),
            "detections must be validated before tracking"
        );

        if detections.is_empty() {
            let all: Vec<usize> = (0..self.tracks.len()).collect();
            self.mark_missed(&all);
            return TrackedObjects::new();
        }

        let input_centroids: Vec<Centroid> = detections.iter().map(Detection::centroid).collect();

        if self.tracks.is_empty() {
            for &centroid in &input_centroids {
                self.register(centroid);
            }
        } else {
            let track_centroids: Vec<Centroid> =
                self.tracks.iter().map(|t| t.last_centroid).collect();
            let dists = matching::centroid_distance(&track_centroids, &input_centroids);

            let AssignmentResult {
                matches,
                unmatched_tracks,
                unmatched_detections,
            } = match self.config.strategy {
                AssignmentStrategy::Greedy => {
                    matching::greedy_assignment(&dists, self.config.max_distance)
                }
                AssignmentStrategy::Optimal => {
                    matching::linear_assignment(&dists, self.config.max_distance)
                }
            };

            log::trace!(
                "assignment: {} matched, {} tracks unmatched, {} detections unmatched",
                matches.len(),
                unmatched_tracks.len(),
                unmatched_detections.len()
            );

            for &(itrack, idet) in &matches {
                self.tracks[itrack].update(input_centroids[idet]);
            }

            // Leftover detections only become tracks when they are at least
            // as many as the leftover tracks.
            let register_new = unmatched_detections.len() >= unmatched_tracks.len();

            // Expiry shifts indices, so it runs after every index-based step above.
            self.mark_missed(&unmatched_tracks);

            if register_new {
                for idet in unmatched_detections {
                    self.register(input_centroids[idet]);
                }
            }
        }

        self.associate(detections, &input_centroids)
    }

    /// Active tracks in registration order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn active_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.tracks.iter().map(|t| t.track_id)
    }

    pub fn get(&self, track_id: u64) -> Option<&Track> {
        self.tracks
            .binary_search_by_key(&track_id, |t| t.track_id)
            .ok()
            .map(|idx| &self.tracks[idx])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Id the next registered track will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn register(&mut self, centroid: Centroid) {
        let track_id = self.next_id;
        self.next_id += 1;
        self.tracks.push(Track::new(track_id, centroid));
        log::debug!(
            "registered track {} at ({:.1}, {:.1})",
            track_id,
            centroid.x,
            centroid.y
        );
    }

    fn mark_missed(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.tracks[idx].mark_missed();
        }

        let max_disappeared = self.config.max_disappeared;
        self.tracks.retain(|t| {
            if t.is_expired(max_disappeared) {
                log::debug!(
                    "deregistered track {} after {} missed frames",
                    t.track_id,
                    t.disappeared
                );
                false
            } else {
                true
            }
        });
    }

    /// Pair each input detection, in input order, with the first track
    /// whose centroid sits exactly on the detection's centroid.
    fn associate(&self, detections: &[Detection], centroids: &[Centroid]) -> TrackedObjects {
        let mut objects = TrackedObjects::new();
        for (det, centroid) in detections.iter().zip(centroids) {
            if let Some(track) = self.tracks.iter().find(|t| t.last_centroid == *centroid) {
                objects.insert(track.track_id, *det);
            }
        }
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x: f32, y: f32) -> Detection {
        Detection::new(x, y, 20.0, 20.0, 0.9)
    }

    #[test]
    fn test_first_frame_registers_in_input_order() {
        let mut tracker = CentroidTracker::default();
        let objects = tracker.update(&[det(10.0, 10.0), det(300.0, 10.0), det(10.0, 300.0)]);

        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(objects.get(1), Some(&det(300.0, 10.0)));
        assert_eq!(tracker.next_id(), 3);
    }

    #[test]
    fn test_empty_frame_on_empty_tracker() {
        let mut tracker = CentroidTracker::default();
        assert!(tracker.update(&[]).is_empty());
        assert!(tracker.is_empty());
        assert_eq!(tracker.next_id(), 0);
    }

    #[test]
    fn test_moving_object_keeps_id() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det(10.0, 10.0)]);
        let objects = tracker.update(&[det(40.0, 50.0)]);

        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![0]);
        let track = tracker.get(0).unwrap();
        assert_eq!(track.last_centroid, Centroid::new(50.0, 60.0));
        assert_eq!(track.disappeared, 0);
    }

    #[test]
    fn test_far_detection_spawns_new_track() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det(0.0, 0.0)]);
        let objects = tracker.update(&[det(500.0, 500.0)]);

        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get(0).unwrap().disappeared, 1);
    }

    #[test]
    fn test_far_detection_not_registered_when_tracks_outnumber_it() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det(0.0, 0.0), det(200.0, 0.0)]);
        let objects = tracker.update(&[det(600.0, 600.0)]);

        // One leftover detection against two leftover tracks: both tracks
        // age and no id is issued.
        assert!(objects.is_empty());
        assert_eq!(tracker.next_id(), 2);
        assert_eq!(tracker.active_ids().collect::<Vec<_>>(), vec![0, 1]);
        assert!(tracker.tracks().iter().all(|t| t.disappeared == 1));
    }

    #[test]
    fn test_leftover_tie_registers_detection() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det(0.0, 0.0), det(200.0, 0.0)]);
        // Detection next to track 1, plus one far away: one leftover each.
        let near = det(205.0, 0.0);
        let far = det(600.0, 600.0);
        let objects = tracker.update(&[near, far]);

        assert_eq!(objects.get(1), Some(&near));
        assert_eq!(objects.get(2), Some(&far));
        assert_eq!(tracker.get(0).unwrap().disappeared, 1);
    }

    #[test]
    fn test_match_at_exact_threshold_is_accepted() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det(0.0, 0.0)]);
        // Centroid moves by (60, 80) = 100 px.
        let objects = tracker.update(&[det(60.0, 80.0)]);
        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_each_track_takes_its_nearest_detection() {
        let mut tracker = CentroidTracker::default();
        // Track 0 centroid (20, 20), track 1 centroid (70, 20).
        tracker.update(&[det(10.0, 10.0), det(60.0, 10.0)]);

        let a = det(65.0, 10.0);
        let b = det(0.0, 10.0);
        let objects = tracker.update(&[a, b]);

        assert_eq!(objects.ids().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(objects.get(1), Some(&a));
        assert_eq!(objects.get(0), Some(&b));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_greedy_leaves_row_unmatched_when_its_column_is_taken() {
        let mut tracker = CentroidTracker::default();
        // Track 0 centroid (20, 20), track 1 centroid (50, 20).
        tracker.update(&[det(10.0, 10.0), det(40.0, 10.0)]);

        // A sits 20 px from track 0 and 10 px from track 1, B 70 px / 40 px.
        let a = det(30.0, 10.0);
        let b = det(80.0, 10.0);
        let objects = tracker.update(&[a, b]);

        // Both rows prefer A; track 1 claims it, track 0 goes unmatched and
        // B is registered as a new track.
        assert_eq!(objects.get(1), Some(&a));
        assert_eq!(objects.get(2), Some(&b));
        assert!(!objects.contains(0));
        assert_eq!(tracker.get(0).unwrap().disappeared, 1);
    }

    #[test]
    fn test_optimal_strategy_pairs_both_rows() {
        let config = TrackerConfig::default().with_strategy(AssignmentStrategy::Optimal);
        let mut tracker = CentroidTracker::new(config);
        tracker.update(&[det(10.0, 10.0), det(40.0, 10.0)]);

        let a = det(30.0, 10.0);
        let b = det(80.0, 10.0);
        let objects = tracker.update(&[a, b]);

        assert_eq!(objects.get(0), Some(&a));
        assert_eq!(objects.get(1), Some(&b));
        assert_eq!(tracker.next_id(), 2);
    }

    #[test]
    fn test_expiry_boundary() {
        let config = TrackerConfig::default().with_max_disappeared(3);
        let mut tracker = CentroidTracker::new(config);
        tracker.update(&[det(10.0, 10.0)]);

        for _ in 0..3 {
            tracker.update(&[]);
        }
        assert_eq!(tracker.get(0).unwrap().disappeared, 3);

        tracker.update(&[]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_duplicate_centroids_map_to_first_track() {
        let mut tracker = CentroidTracker::default();
        let first = Detection::new(10.0, 10.0, 20.0, 20.0, 0.9);
        let second = Detection::new(10.0, 10.0, 20.0, 20.0, 0.4);
        let objects = tracker.update(&[first, second]);

        // Both detections register, but both resolve to track 0 and the
        // later detection replaces the earlier one.
        assert_eq!(tracker.len(), 2);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects.get(0), Some(&second));
    }

    #[test]
    fn test_config_validation() {
        assert!(TrackerConfig::default().validate().is_ok());
        let bad = TrackerConfig::default().with_max_distance(f32::NAN);
        assert!(matches!(
            CentroidTracker::try_new(bad),
            Err(TrackingError::InvalidConfig(_))
        ));
        assert!(TrackerConfig::default().with_max_distance(-1.0).validate().is_err());
    }
}
