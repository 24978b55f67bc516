mod event;
mod line_counter;
mod track_state;

pub use event::{CrossingEvent, EventType};
pub use line_counter::{CounterStats, LineCounter};
pub use track_state::TrackState;
