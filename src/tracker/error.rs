//! Error type for tracker updates.

use thiserror::Error;

use crate::tracker::detection::Landmark;

/// Caller contract violations surfaced by [`CentroidTracker::update`].
///
/// Every variant is raised before the tracker state is touched, so a failed
/// update leaves the tracker exactly as it was.
///
/// [`CentroidTracker::update`]: crate::tracker::CentroidTracker::update
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// Head-box mode needs a landmark the detection does not carry.
    #[error("detection {detection} has no {landmark} keypoint")]
    MissingLandmark { detection: usize, landmark: Landmark },

    /// A detection produced a box with NaN or infinite coordinates.
    #[error("detection {detection} has a non-finite bounding box")]
    NonFiniteCoordinate { detection: usize },

    /// The optimal assignment solver rejected the cost matrix.
    #[error("assignment solver failed: {0}")]
    Assignment(String),
}
