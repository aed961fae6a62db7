//! Resize handle geometry.

use crate::geometry::rect_contains;
use kurbo::{Point, Rect};

/// Edge length of the square resize handle, in canvas units.
pub const HANDLE_SIZE: f64 = 10.0;

/// The square resize handle anchored inside a box's bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Region in canvas coordinates.
    pub region: Rect,
}

impl Handle {
    /// Handle for a box with the given bounds.
    pub fn for_bounds(bounds: Rect, size: f64) -> Self {
        let bounds = bounds.abs();
        Self {
            region: Rect::new(bounds.x1 - size, bounds.y1 - size, bounds.x1, bounds.y1),
        }
    }

    /// Check if a point (in canvas coordinates) falls on the handle.
    pub fn hit_test(&self, point: Point) -> bool {
        rect_contains(self.region, point)
    }
}
