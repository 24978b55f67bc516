//! Directional counting of tracks that cross a horizontal line.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::counter::event::{CrossingEvent, EventType};
use crate::counter::track_state::TrackState;
use crate::tracker::TrackedObjects;

/// Aggregate counts for a counting session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterStats {
    pub entries: u64,
    pub exits: u64,
    pub unique_visitors: usize,
    pub current_occupancy: u64,
}

impl fmt::Display for CounterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries={} exits={} unique={} occupancy={}",
            self.entries, self.exits, self.unique_visitors, self.current_occupancy
        )
    }
}

/// Counts entries and exits across a fixed horizontal line.
///
/// A track is first seen without producing an event; after that, moving
/// from strictly above the line to strictly below it is an entry, and the
/// reverse is an exit. Each track id can produce at most one event per
/// session.
#[derive(Debug, Clone)]
pub struct LineCounter {
    detection_line_y: f32,
    track_states: HashMap<u64, TrackState>,
    entries: u64,
    exits: u64,
    unique_ids: HashSet<u64>,
}

impl LineCounter {
    pub fn new(detection_line_y: f32) -> Self {
        Self {
            detection_line_y,
            track_states: HashMap::new(),
            entries: 0,
            exits: 0,
            unique_ids: HashSet::new(),
        }
    }

    /// Place the line at the integer half-height of the frame.
    pub fn from_frame_height(frame_height: u32) -> Self {
        Self::new((frame_height / 2) as f32)
    }

    pub fn update(&mut self, tracked_objects: &TrackedObjects) -> Vec<CrossingEvent> {
        let line = self.detection_line_y;
        let mut events = Vec::new();

        for (track_id, det) in tracked_objects.iter() {
            let center_y = det.bbox.center_y();

            let Some(state) = self.track_states.get_mut(&track_id) else {
                self.track_states.insert(track_id, TrackState::new(center_y));
                continue;
            };

            if !state.crossed {
                let event_type = if state.last_y < line && line < center_y {
                    self.entries += 1;
                    self.unique_ids.insert(track_id);
                    Some(EventType::Entry)
                } else if state.last_y > line && line > center_y {
                    self.exits += 1;
                    Some(EventType::Exit)
                } else {
                    None
                };

                if let Some(event_type) = event_type {
                    state.crossed = true;
                    events.push(CrossingEvent {
                        track_id,
                        event_type,
                        bbox: det.bbox,
                    });
                }
            }

            state.last_y = center_y;
        }

        events
    }

    pub fn stats(&self) -> CounterStats {
        CounterStats {
            entries: self.entries,
            exits: self.exits,
            unique_visitors: self.unique_ids.len(),
            current_occupancy: self.entries.saturating_sub(self.exits),
        }
    }

    /// Start a new session on the same line, dropping all per-track state
    /// and counts.
    pub fn reset(&mut self) {
        log::debug!("counter reset, previous session: {}", self.stats());
        *self = Self::new(self.detection_line_y);
    }

    /// Drop crossing state for tracks that are no longer active. Counts are
    /// untouched. Returns how many entries were removed.
    pub fn prune<I>(&mut self, active_ids: I) -> usize
    where
        I: IntoIterator<Item = u64>,
    {
        let active: HashSet<u64> = active_ids.into_iter().collect();
        let before = self.track_states.len();
        self.track_states.retain(|id, _| active.contains(id));
        before - self.track_states.len()
    }

    pub fn track_state(&self, track_id: u64) -> Option<&TrackState> {
        self.track_states.get(&track_id)
    }

    pub fn detection_line_y(&self) -> f32 {
        self.detection_line_y
    }
}
