/// Per-track crossing state kept by the line counter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackState {
    /// Center y seen on the previous update
    pub last_y: f32,
    /// Latched once the track has produced an entry or exit
    pub crossed: bool,
}

impl TrackState {
    pub fn new(last_y: f32) -> Self {
        Self {
            last_y,
            crossed: false,
        }
    }
}
