//! Single tracked identity for centroid tracking.

use crate::tracker::rect::Centroid;

/// Single object track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier, never reused by the owning tracker
    pub track_id: u64,
    /// Centroid of the detection this track was last matched to
    pub last_centroid: Centroid,
    /// Number of consecutive frames without a match
    pub disappeared: u32,
}

impl Track {
    pub(crate) fn new(track_id: u64, centroid: Centroid) -> Self {
        Self {
            track_id,
            last_centroid: centroid,
            disappeared: 0,
        }
    }

    /// Move the track onto a matched detection centroid.
    pub(crate) fn update(&mut self, centroid: Centroid) {
        self.last_centroid = centroid;
        self.disappeared = 0;
    }

    /// Record a frame without a match.
    pub(crate) fn mark_missed(&mut self) {
        self.disappeared += 1;
    }

    /// Whether the track has stayed unmatched for longer than `max_disappeared` frames.
    #[inline]
    pub fn is_expired(&self, max_disappeared: u32) -> bool {
        self.disappeared > max_disappeared
    }
}
