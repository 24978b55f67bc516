//! Trait for object detection inference backends.

use crate::tracker::Detection;

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into the counting
/// pipeline. The tracker only ever sees the returned boxes, so backend
/// selection and fallbacks live entirely behind this trait.
///
/// # Example
///
/// ```ignore
/// use linecount_rs::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// Raw `(x, y, width, height, confidence)` tuples, as most face and
/// person detectors report them.
impl IntoDetections for Vec<(f32, f32, f32, f32, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuples_into_detections() {
        let raw: Vec<(f32, f32, f32, f32, f32)> =
            vec![(10.0, 10.0, 20.0, 20.0, 0.9), (50.0, 60.0, 8.0, 4.0, 0.5)];
        let dets = raw.into_detections();
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[1], Detection::new(50.0, 60.0, 8.0, 4.0, 0.5));
    }
}
