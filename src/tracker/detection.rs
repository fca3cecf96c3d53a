//! Pose detections fed to the tracker and the boxes derived from them.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::error::TrackerError;
use crate::tracker::geometry::BoundingBox;

/// Body parts reported by PoseNet-style estimators, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Landmark {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    /// All landmarks in model output order.
    pub const ALL: [Landmark; 17] = [
        Landmark::Nose,
        Landmark::LeftEye,
        Landmark::RightEye,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    /// Landmarks spanning the head box used in [`BoxSource::HeadKeypoints`] mode.
    pub const HEAD: [Landmark; 5] = [
        Landmark::Nose,
        Landmark::LeftEye,
        Landmark::RightEye,
        Landmark::LeftEar,
        Landmark::RightEar,
    ];

    /// Landmark at the given model output index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// PoseNet part name, e.g. `leftEye`.
    pub fn part_name(&self) -> &'static str {
        match self {
            Landmark::Nose => "nose",
            Landmark::LeftEye => "leftEye",
            Landmark::RightEye => "rightEye",
            Landmark::LeftEar => "leftEar",
            Landmark::RightEar => "rightEar",
            Landmark::LeftShoulder => "leftShoulder",
            Landmark::RightShoulder => "rightShoulder",
            Landmark::LeftElbow => "leftElbow",
            Landmark::RightElbow => "rightElbow",
            Landmark::LeftWrist => "leftWrist",
            Landmark::RightWrist => "rightWrist",
            Landmark::LeftHip => "leftHip",
            Landmark::RightHip => "rightHip",
            Landmark::LeftKnee => "leftKnee",
            Landmark::RightKnee => "rightKnee",
            Landmark::LeftAnkle => "leftAnkle",
            Landmark::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

/// A single scored landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: Landmark,
    pub position: Point2<f32>,
    /// Part confidence reported by the estimator
    pub score: f32,
}

impl Keypoint {
    pub fn new(part: Landmark, x: f32, y: f32, score: f32) -> Self {
        Self {
            part,
            position: Point2::new(x, y),
            score,
        }
    }
}

/// Which box a detection contributes to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxSource {
    /// Box spanning nose, eyes and ears. Every head landmark must be present.
    #[default]
    HeadKeypoints,
    /// The whole-body box supplied with the detection.
    FullBody,
}

/// Detection input for the tracker: one estimated pose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Labeled landmark positions
    pub keypoints: Vec<Keypoint>,
    /// Whole-body bounding box computed by the estimator
    pub bounding_box: BoundingBox,
    /// Pose confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(keypoints: Vec<Keypoint>, bounding_box: BoundingBox, score: f32) -> Self {
        Self {
            keypoints,
            bounding_box,
            score,
        }
    }

    /// Detection with no keypoints, only usable in [`BoxSource::FullBody`] mode.
    pub fn from_box(bounding_box: BoundingBox, score: f32) -> Self {
        Self {
            keypoints: Vec::new(),
            bounding_box,
            score,
        }
    }

    pub fn keypoint(&self, part: Landmark) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.part == part)
    }

    /// Box enclosing the head landmarks. Fails with the first missing one.
    pub fn head_box(&self) -> Result<BoundingBox, Landmark> {
        let mut positions = [Point2::origin(); 5];
        for (slot, part) in positions.iter_mut().zip(Landmark::HEAD) {
            *slot = self.keypoint(part).ok_or(part)?.position;
        }
        // HEAD is non-empty, so enclosing always yields a box.
        Ok(BoundingBox::enclosing(positions).unwrap_or_default())
    }

    /// Box the tracker uses for this detection under `source`.
    pub fn tracking_box(&self, source: BoxSource) -> Result<BoundingBox, Landmark> {
        match source {
            BoxSource::HeadKeypoints => self.head_box(),
            BoxSource::FullBody => Ok(self.bounding_box),
        }
    }
}

/// Centroids and boxes of a frame's detections, in input order.
///
/// Fails on the first detection that cannot produce a usable box.
pub fn centroids_and_boxes(
    detections: &[Detection],
    source: BoxSource,
) -> Result<(Vec<Point2<f32>>, Vec<BoundingBox>), TrackerError> {
    let mut centroids = Vec::with_capacity(detections.len());
    let mut boxes = Vec::with_capacity(detections.len());
    for (idx, det) in detections.iter().enumerate() {
        let bb = det
            .tracking_box(source)
            .map_err(|landmark| TrackerError::MissingLandmark {
                detection: idx,
                landmark,
            })?;
        if !bb.is_finite() {
            return Err(TrackerError::NonFiniteCoordinate { detection: idx });
        }
        centroids.push(bb.centroid());
        boxes.push(bb);
    }
    Ok((centroids, boxes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_keypoints() -> Vec<Keypoint> {
        vec![
            Keypoint::new(Landmark::Nose, 50.0, 40.0, 0.9),
            Keypoint::new(Landmark::LeftEye, 55.0, 35.0, 0.9),
            Keypoint::new(Landmark::RightEye, 45.0, 35.0, 0.9),
            Keypoint::new(Landmark::LeftEar, 60.0, 38.0, 0.8),
            Keypoint::new(Landmark::RightEar, 40.0, 38.0, 0.8),
            Keypoint::new(Landmark::LeftWrist, 10.0, 200.0, 0.7),
        ]
    }

    #[test]
    fn test_head_box_ignores_body_landmarks() {
        let det = Detection::new(head_keypoints(), BoundingBox::new(0.0, 0.0, 100.0, 300.0), 0.9);
        let bb = det.head_box().unwrap();
        assert_eq!(bb, BoundingBox::new(40.0, 35.0, 60.0, 40.0));
    }

    #[test]
    fn test_full_body_box() {
        let full = BoundingBox::new(0.0, 0.0, 100.0, 300.0);
        let det = Detection::new(head_keypoints(), full, 0.9);
        assert_eq!(det.tracking_box(BoxSource::FullBody).unwrap(), full);
    }

    #[test]
    fn test_missing_head_landmark() {
        let mut kps = head_keypoints();
        kps.retain(|k| k.part != Landmark::LeftEar);
        let det = Detection::new(kps, BoundingBox::default(), 0.9);
        assert_eq!(det.head_box(), Err(Landmark::LeftEar));
    }

    #[test]
    fn test_centroids_and_boxes_reports_index() {
        let good = Detection::new(head_keypoints(), BoundingBox::default(), 0.9);
        let bad = Detection::from_box(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9);
        let err = centroids_and_boxes(&[good, bad], BoxSource::HeadKeypoints).unwrap_err();
        assert_eq!(
            err,
            TrackerError::MissingLandmark {
                detection: 1,
                landmark: Landmark::Nose
            }
        );
    }

    #[test]
    fn test_centroids_and_boxes_rejects_nan() {
        let det = Detection::from_box(BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0), 0.9);
        let err = centroids_and_boxes(&[det], BoxSource::FullBody).unwrap_err();
        assert_eq!(err, TrackerError::NonFiniteCoordinate { detection: 0 });
    }

    #[test]
    fn test_landmark_order() {
        assert_eq!(Landmark::from_index(0), Some(Landmark::Nose));
        assert_eq!(Landmark::from_index(4), Some(Landmark::RightEar));
        assert_eq!(Landmark::from_index(17), None);
        assert_eq!(Landmark::LeftEye.to_string(), "leftEye");
    }
}
