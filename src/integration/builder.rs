//! Builder for creating Detection objects from various input formats.

use crate::error::Result;
use crate::tracker::Detection;

/// Builder for creating `Detection` objects from various input formats.
///
/// All setters normalize to a top-left origin plus size.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    score: f32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLWH format (top-left x, top-left y, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = w;
        self.height = h;
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x = x1;
        self.y = y1;
        self.width = x2 - x1;
        self.height = y2 - y1;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x = cx - w / 2.0;
        self.y = cy - h / 2.0;
        self.width = w;
        self.height = h;
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Build the final `Detection` without checking it.
    pub fn build(self) -> Detection {
        Detection::new(self.x, self.y, self.width, self.height, self.score)
    }

    /// Build the final `Detection`, rejecting boxes the tracker cannot accept.
    pub fn try_build(self) -> Result<Detection> {
        Detection::try_new(self.x, self.y, self.width, self.height, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackingError;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new()
            .tlbr(10.0, 20.0, 50.0, 80.0)
            .score(0.95)
            .build();

        assert_eq!(det.score, 0.95);
        assert_eq!(det.bbox.to_tlwh(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_xywh_matches_tlwh() {
        let a = DetectionBuilder::new().xywh(20.0, 20.0, 20.0, 20.0).score(0.9).build();
        let b = DetectionBuilder::new().tlwh(10.0, 10.0, 20.0, 20.0).score(0.9).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_build_rejects_inverted_box() {
        let err = DetectionBuilder::new()
            .tlbr(50.0, 20.0, 10.0, 80.0)
            .score(0.5)
            .try_build()
            .unwrap_err();
        assert_eq!(err, TrackingError::detection("width", -40.0));
    }
}
