//! Error types for the tracking and counting core.

use thiserror::Error;

/// Result type alias for fallible tracker and counter operations.
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Errors raised when a caller hands the core malformed input.
///
/// Frame processing itself never fails; these surface only from the
/// validation entry points at the crate boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    #[error("Invalid detection: {field} = {value}")]
    InvalidDetection { field: &'static str, value: f32 },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl TrackingError {
    pub fn detection(field: &'static str, value: f32) -> Self {
        Self::InvalidDetection { field, value }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
