mod centroid_tracker;
mod detection;
mod error;
mod geometry;
mod matching;
mod tracked_object;

pub use centroid_tracker::{CentroidTracker, TrackerConfig, TrackingResult};
pub use detection::{BoxSource, Detection, Keypoint, Landmark};
pub use error::TrackerError;
pub use geometry::BoundingBox;
pub use matching::{
    AssignmentResult, MatchStrategy, argsort, centroid_distance, greedy_assignment,
    optimal_assignment, row_argmin, row_minima,
};
pub use tracked_object::{ObjectId, TrackedObject};
