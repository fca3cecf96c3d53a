//! Multi-object centroid tracking for per-frame pose detections.
//!
//! [`CentroidTracker`] turns a stream of per-frame detections into stable
//! integer identities. The [`integration`] module wires a detection backend
//! in front of it.

pub mod integration;
pub mod tracker;

pub use integration::{
    DetectionBuilder, DetectionSource, IntoDetections, PipelineConfig, PipelineError,
    PipelineFrame, TrackerPipeline,
};
pub use tracker::{
    BoundingBox, BoxSource, CentroidTracker, Detection, Keypoint, Landmark, MatchStrategy,
    ObjectId, TrackedObject, TrackerConfig, TrackerError, TrackingResult,
};
