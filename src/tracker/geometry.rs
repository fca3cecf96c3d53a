use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as two corners.
///
/// `(x0, y0)` is the top-left corner and `(x1, y1)` the bottom-right one.
/// Boxes built from keypoints are always normalized so that `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x0: f32,
    /// Top-left y coordinate
    pub y0: f32,
    /// Bottom-right x coordinate
    pub x1: f32,
    /// Bottom-right y coordinate
    pub y1: f32,
}

impl BoundingBox {
    /// Create a box from its corners (x0, y0, x1, y1).
    #[inline]
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// Smallest box enclosing every point. Returns `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.fold(init, |bb, p| Self {
            x0: bb.x0.min(p.x),
            y0: bb.y0.min(p.y),
            x1: bb.x1.max(p.x),
            y1: bb.y1.max(p.y),
        }))
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x0, self.y0, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Midpoint of the box. This is the position signal used for matching.
    #[inline]
    pub fn centroid(&self) -> Point2<f32> {
        Point2::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Whether all four coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}
