use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tracker::Rect;

/// Direction of a line crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Moved from above the line to below it
    Entry,
    /// Moved from below the line to above it
    Exit,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single crossing, handed to whatever persists or renders events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    pub track_id: u64,
    pub event_type: EventType,
    pub bbox: Rect,
}
