//! Main centroid tracking algorithm implementation.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::tracker::detection::{BoxSource, Detection, centroids_and_boxes};
use crate::tracker::error::TrackerError;
use crate::tracker::geometry::BoundingBox;
use crate::tracker::matching::{self, AssignmentResult, MatchStrategy};
use crate::tracker::tracked_object::{ObjectId, TrackedObject};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames an object survives before it is dropped
    pub max_disappeared: usize,
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 50,
            strategy: MatchStrategy::Greedy,
        }
    }
}

/// Outcome of a single [`CentroidTracker::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingResult {
    /// Every live object, including ones unmatched this frame
    pub objects: BTreeMap<ObjectId, TrackedObject>,
    /// Id bound to each input detection, parallel to the input slice
    pub assignments: Vec<Option<ObjectId>>,
}

impl TrackingResult {
    /// Id bound to the detection at `index`, if any.
    pub fn id_of(&self, index: usize) -> Option<ObjectId> {
        self.assignments.get(index).copied().flatten()
    }
}

/// Assigns persistent ids to per-frame detections by nearest centroid.
///
/// Objects that go unmatched are kept for up to `max_disappeared` frames
/// before being dropped. Ids are never handed out twice until [`dispose`]
/// resets the counter.
///
/// [`dispose`]: CentroidTracker::dispose
#[derive(Debug, Clone, Default)]
pub struct CentroidTracker {
    next_id: u64,
    objects: BTreeMap<ObjectId, TrackedObject>,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            next_id: 0,
            objects: BTreeMap::new(),
            config,
        }
    }

    pub fn update(
        &mut self,
        detections: &[Detection],
        box_source: BoxSource,
    ) -> Result<TrackingResult, TrackerError> {
        if detections.is_empty() {
            self.age_all();
            return Ok(self.result(Vec::new()));
        }

        let (centroids, boxes) = centroids_and_boxes(detections, box_source)?;
        let mut assignments = vec![None; detections.len()];

        if self.objects.is_empty() {
            for (j, (&centroid, &bbox)) in centroids.iter().zip(&boxes).enumerate() {
                assignments[j] = Some(self.register(centroid, bbox));
            }
            return Ok(self.result(assignments));
        }

        let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        let tracked: Vec<Point2<f32>> = self.objects.values().map(|o| o.centroid).collect();
        let dists = matching::centroid_distance(&tracked, &centroids);
        let (num_rows, num_cols) = dists.dim();
        trace!(rows = num_rows, cols = num_cols, "distance matrix");

        // Resolve the assignment before touching any state.
        let AssignmentResult {
            matches,
            unmatched_rows,
            unmatched_cols,
        } = matching::assign(&dists, self.config.strategy)?;

        for &(row, col) in &matches {
            let id = ids[row];
            if let Some(obj) = self.objects.get_mut(&id) {
                obj.update(centroids[col], boxes[col]);
            }
            assignments[col] = Some(id);
        }

        if num_rows >= num_cols {
            for row in unmatched_rows {
                self.mark_missed(ids[row]);
            }
        } else {
            for col in unmatched_cols {
                assignments[col] = Some(self.register(centroids[col], boxes[col]));
            }
        }

        debug!(
            matched = matches.len(),
            detections = num_cols,
            live = self.objects.len(),
            "frame update"
        );

        Ok(self.result(assignments))
    }

    /// Forget every object and restart ids from zero.
    ///
    /// Call this before feeding detections from an unrelated source.
    pub fn dispose(&mut self) {
        info!(dropped = self.objects.len(), "disposing tracker");
        self.next_id = 0;
        self.objects.clear();
    }

    pub fn objects(&self) -> &BTreeMap<ObjectId, TrackedObject> {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Id the next registration will receive.
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next_id)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Objects missing for fewer than `show_until` consecutive frames.
    pub fn visible(&self, show_until: usize) -> impl Iterator<Item = &TrackedObject> {
        self.objects
            .values()
            .filter(move |o| o.disappeared < show_until)
    }

    fn register(&mut self, centroid: Point2<f32>, bounding_box: BoundingBox) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects
            .insert(id, TrackedObject::new(id, centroid, bounding_box));
        debug!(%id, x = centroid.x, y = centroid.y, "registered object");
        id
    }

    fn mark_missed(&mut self, id: ObjectId) {
        let expired = match self.objects.get_mut(&id) {
            Some(obj) => obj.mark_missed(self.config.max_disappeared),
            None => false,
        };
        if expired {
            self.objects.remove(&id);
            debug!(%id, "deregistered object");
        }
    }

    fn age_all(&mut self) {
        let max_disappeared = self.config.max_disappeared;
        self.objects.retain(|id, obj| {
            let expired = obj.mark_missed(max_disappeared);
            if expired {
                debug!(%id, "deregistered object");
            }
            !expired
        });
    }

    fn result(&self, assignments: Vec<Option<ObjectId>>) -> TrackingResult {
        TrackingResult {
            objects: self.objects.clone(),
            assignments,
        }
    }
}
