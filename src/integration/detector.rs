//! Trait for pose estimation inference backends.

use super::DetectionBuilder;
use crate::tracker::Detection;

/// Trait for pose estimation inference backends.
///
/// Implement this trait to connect any pose model to the tracker.
///
/// # Example
///
/// ```ignore
/// use centroid_track::{DetectionSource, Detection};
///
/// struct MyPoseNet {
///     // Your model here
/// }
///
/// impl DetectionSource for MyPoseNet {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return one detection per person
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return the poses found.
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

/// Raw PoseNet-style output: per pose, 17 `[x, y, score]` keypoints in model
/// order paired with the pose score.
impl IntoDetections for Vec<(Vec<[f32; 3]>, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(keypoints, score)| {
                DetectionBuilder::new()
                    .keypoint_array(&keypoints)
                    .score(score)
                    .build()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{BoundingBox, Landmark};

    #[test]
    fn test_raw_pose_conversion() {
        let raw = vec![(
            vec![[10.0, 20.0, 0.9], [12.0, 18.0, 0.8], [8.0, 18.0, 0.8]],
            0.7,
        )];
        let dets = raw.into_detections();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].score, 0.7);
        assert_eq!(dets[0].keypoints.len(), 3);
        assert_eq!(dets[0].keypoint(Landmark::RightEye).unwrap().position.x, 8.0);
        assert_eq!(dets[0].bounding_box, BoundingBox::new(8.0, 18.0, 12.0, 20.0));
    }
}
