//! Single tracked object and its identifier.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::geometry::BoundingBox;

/// Persistent object identifier. Issued in increasing order and never reused
/// by the tracker that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// Single tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    /// Unique object identifier
    pub id: ObjectId,
    /// Center of the last matched box
    pub centroid: Point2<f32>,
    /// Last matched box
    pub bounding_box: BoundingBox,
    /// Consecutive frames without a match
    pub disappeared: usize,
}

impl TrackedObject {
    /// Create a freshly registered object.
    pub fn new(id: ObjectId, centroid: Point2<f32>, bounding_box: BoundingBox) -> Self {
        Self {
            id,
            centroid,
            bounding_box,
            disappeared: 0,
        }
    }

    /// Rebind the object to a new observation.
    pub fn update(&mut self, centroid: Point2<f32>, bounding_box: BoundingBox) {
        self.centroid = centroid;
        self.bounding_box = bounding_box;
        self.disappeared = 0;
    }

    /// Count one more unmatched frame. Returns `true` once the object has
    /// been missing for more than `max_disappeared` frames.
    pub fn mark_missed(&mut self, max_disappeared: usize) -> bool {
        self.disappeared += 1;
        self.disappeared > max_disappeared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_missed_threshold() {
        let bb = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let mut obj = TrackedObject::new(ObjectId(3), bb.centroid(), bb);
        assert!(!obj.mark_missed(2));
        assert!(!obj.mark_missed(2));
        assert!(obj.mark_missed(2));
        assert_eq!(obj.disappeared, 3);
    }

    #[test]
    fn test_update_resets_disappeared() {
        let bb = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let mut obj = TrackedObject::new(ObjectId(0), bb.centroid(), bb);
        obj.mark_missed(10);
        let moved = BoundingBox::new(1.0, 1.0, 3.0, 3.0);
        obj.update(moved.centroid(), moved);
        assert_eq!(obj.disappeared, 0);
        assert_eq!(obj.centroid, Point2::new(2.0, 2.0));
        assert_eq!(obj.bounding_box, moved);
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(42).to_string(), "42");
        assert_eq!(u64::from(ObjectId(7)), 7);
    }
}
