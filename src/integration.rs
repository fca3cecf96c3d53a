//! Integration module for connecting pose estimation backends with the tracker.
//!
//! This module provides traits and utilities for feeding the output of an
//! inference backend into a [`CentroidTracker`](crate::tracker::CentroidTracker)
//! once per frame.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{PipelineConfig, PipelineError, PipelineFrame, TrackerPipeline};
