//! TrackerPipeline for combining pose estimation with centroid tracking.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::tracker::{
    BoxSource, CentroidTracker, Detection, ObjectId, TrackerConfig, TrackerError, TrackingResult,
};

use super::DetectionSource;

/// Per-frame settings for [`TrackerPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Poses scoring below this are dropped before tracking
    pub min_pose_confidence: f32,
    pub box_source: BoxSource,
    /// Objects missing for this many frames or more are left out of
    /// [`PipelineFrame::visible`]
    pub show_until: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            min_pose_confidence: 0.625,
            box_source: BoxSource::HeadKeypoints,
            show_until: 5,
        }
    }
}

/// Failure of a single pipeline frame.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("detection failed: {0}")]
    Detection(E),
    #[error(transparent)]
    Tracking(#[from] TrackerError),
}

/// Everything a frame loop needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineFrame {
    /// Detections that passed the confidence filter, in source order
    pub detections: Vec<Detection>,
    /// Tracker output; `assignments` is parallel to `detections`
    pub tracking: TrackingResult,
    /// Ids of objects missing for fewer than `show_until` frames
    pub visible: Vec<ObjectId>,
}

/// A combined tracker that bundles pose inference with a `CentroidTracker`.
///
/// The pipeline owns the only tracker instance for its source. Swapping the
/// source through [`switch_source`](Self::switch_source) disposes the tracker
/// so ids from the old stream never leak into the new one.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
    config: PipelineConfig,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and config.
    pub fn new(detector: D, config: PipelineConfig) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::new(config.tracker.clone()),
            config,
        }
    }

    /// Create a new tracking pipeline with default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, PipelineConfig::default())
    }

    /// Process a single frame.
    ///
    /// Runs detection on the input image, drops low-confidence poses and
    /// updates the tracker with the rest.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<PipelineFrame, PipelineError<D::Error>> {
        let mut detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        detections.retain(|d| d.score >= self.config.min_pose_confidence);

        let tracking = self.tracker.update(&detections, self.config.box_source)?;
        let visible = self
            .tracker
            .visible(self.config.show_until)
            .map(|o| o.id)
            .collect();

        Ok(PipelineFrame {
            detections,
            tracking,
            visible,
        })
    }

    /// Replace the detection source and start tracking from scratch.
    ///
    /// Returns the previous source.
    pub fn switch_source(&mut self, detector: D) -> D {
        info!("switching detection source");
        self.tracker.dispose();
        std::mem::replace(&mut self.detector, detector)
    }

    /// Drop every tracked object and restart ids from zero.
    pub fn reset(&mut self) {
        self.tracker.dispose();
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }
}
