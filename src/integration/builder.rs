//! Builder for creating Detection objects from various input formats.

use crate::tracker::{BoundingBox, Detection, Keypoint, Landmark};

/// Builder for creating `Detection` objects from various input formats.
///
/// When no bounding box is given, [`build`](Self::build) encloses every
/// keypoint, the way PoseNet derives its whole-body box.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    keypoints: Vec<Keypoint>,
    bounding_box: Option<BoundingBox>,
    score: f32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single keypoint. A later keypoint for the same part replaces
    /// the earlier one.
    pub fn keypoint(mut self, part: Landmark, x: f32, y: f32, score: f32) -> Self {
        self.keypoints.retain(|k| k.part != part);
        self.keypoints.push(Keypoint::new(part, x, y, score));
        self
    }

    /// Add keypoints from `[x, y, score]` triples in model output order.
    /// Entries beyond the 17 known landmarks are ignored.
    pub fn keypoint_array(mut self, keypoints: &[[f32; 3]]) -> Self {
        for (idx, &[x, y, score]) in keypoints.iter().enumerate() {
            if let Some(part) = Landmark::from_index(idx) {
                self = self.keypoint(part, x, y, score);
            }
        }
        self
    }

    /// Set bounding box in corner format (x0, y0, x1, y1).
    pub fn bounding_box(mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        self.bounding_box = Some(BoundingBox::new(x0, y0, x1, y1));
        self
    }

    /// Set bounding box in TLWH format (x, y, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bounding_box = Some(BoundingBox::from_tlwh(x, y, w, h));
        self
    }

    /// Set the pose confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        let bounding_box = self
            .bounding_box
            .or_else(|| BoundingBox::enclosing(self.keypoints.iter().map(|k| k.position)))
            .unwrap_or_default();
        Detection::new(self.keypoints, bounding_box, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new()
            .keypoint(Landmark::Nose, 30.0, 40.0, 0.9)
            .bounding_box(10.0, 20.0, 50.0, 80.0)
            .score(0.95)
            .build();

        assert_eq!(det.score, 0.95);
        assert_eq!(det.bounding_box, BoundingBox::new(10.0, 20.0, 50.0, 80.0));
        assert_eq!(det.keypoints.len(), 1);
    }

    #[test]
    fn test_box_defaults_to_keypoint_extent() {
        let det = DetectionBuilder::new()
            .keypoint(Landmark::Nose, 30.0, 40.0, 0.9)
            .keypoint(Landmark::LeftAnkle, 20.0, 140.0, 0.6)
            .keypoint(Landmark::RightWrist, 55.0, 90.0, 0.6)
            .build();
        assert_eq!(det.bounding_box, BoundingBox::new(20.0, 40.0, 55.0, 140.0));
    }

    #[test]
    fn test_duplicate_part_replaced() {
        let det = DetectionBuilder::new()
            .keypoint(Landmark::Nose, 1.0, 1.0, 0.2)
            .keypoint(Landmark::Nose, 5.0, 5.0, 0.9)
            .build();
        assert_eq!(det.keypoints.len(), 1);
        assert_eq!(det.keypoint(Landmark::Nose).unwrap().score, 0.9);
    }

    #[test]
    fn test_tlwh() {
        let det = DetectionBuilder::new().tlwh(10.0, 20.0, 30.0, 40.0).build();
        assert_eq!(det.bounding_box, BoundingBox::new(10.0, 20.0, 40.0, 60.0));
    }
}
