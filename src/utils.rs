//! Utility functions for pixel-space coordinate handling.

pub mod safe_cast;

use crate::geometry::BoundingBox;
use safe_cast::{f64_to_i32_clamp, i32_to_index, usize_to_i32};

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> usize {
        self.x1 - self.x0
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> usize {
        self.y1 - self.y0
    }

    /// True when the rectangle covers no pixels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Clip a landmark bounding box to the image.
///
/// Box corners are truncated to integer pixels and the maximum edge is
/// exclusive, so a box spanning columns 10.0..20.0 covers pixels 10..=19.
/// The result may be empty.
#[must_use]
pub fn clip_box(bbox: &BoundingBox, max_width: usize, max_height: usize) -> PixelRect {
    let w = usize_to_i32(max_width).unwrap_or(i32::MAX);
    let h = usize_to_i32(max_height).unwrap_or(i32::MAX);

    let x0 = i32_to_index(f64_to_i32_clamp(bbox.min_x, 0, w));
    let y0 = i32_to_index(f64_to_i32_clamp(bbox.min_y, 0, h));
    let x1 = i32_to_index(f64_to_i32_clamp(bbox.max_x, 0, w));
    let y1 = i32_to_index(f64_to_i32_clamp(bbox.max_y, 0, h));

    PixelRect {
        x0,
        y0,
        x1: x1.max(x0),
        y1: y1.max(y0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    #[test]
    fn test_clip_box_inside() {
        let rect = clip_box(&bbox(10.0, 5.0, 20.0, 9.0), 200, 200);
        assert_eq!(rect, PixelRect { x0: 10, y0: 5, x1: 20, y1: 9 });
        assert_eq!(rect.width(), 10);
        assert_eq!(rect.height(), 4);
    }

    #[test]
    fn test_clip_box_edge_boundaries() {
        let rect = clip_box(&bbox(-5.0, -5.0, 250.0, 250.0), 200, 100);
        assert_eq!(rect, PixelRect { x0: 0, y0: 0, x1: 200, y1: 100 });
    }

    #[test]
    fn test_clip_box_collapsed() {
        // Landmarks on a single row give a zero-height crop
        let rect = clip_box(&bbox(10.0, 7.0, 20.0, 7.0), 200, 200);
        assert!(rect.is_empty());

        // Entirely outside the image
        let rect = clip_box(&bbox(300.0, 10.0, 320.0, 20.0), 200, 200);
        assert!(rect.is_empty());
    }
}
