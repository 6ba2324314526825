//! Horizontal gaze estimation from eye-region pixel statistics.
//!
//! The eye contour is rasterized into a mask over the grayscale frame, the
//! masked crop is thresholded, and the white (sclera) pixel counts of the
//! left and right halves are compared. More white on the left half of the
//! image means the iris sits on the right, which is reported as `Left`
//! because directions are screen-relative.
//!
//! When one half has no white pixels the ratio is a fixed sentinel: 1.0 for
//! an empty left half and 5.0 for an empty right half. The two cases are not
//! symmetric; an empty left half therefore classifies as `Center`, not
//! `Right`.

use crate::{
    config::GazeConfig,
    geometry::{BoundingBox, Point2D},
    utils::{clip_box, safe_cast::f64_to_i32_clamp, PixelRect},
};
use log::debug;
use ndarray::{Array2, ArrayView2};
use std::fmt;

/// Screen-relative horizontal gaze direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GazeDirection {
    Left,
    #[default]
    Center,
    Right,
}

impl GazeDirection {
    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gaze classification of one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeResult {
    pub direction: GazeDirection,
    /// Left white-pixel count over right white-pixel count, or a sentinel
    pub ratio: f64,
}

impl GazeResult {
    /// Fallback for an eye region that covers no pixels or has no valid contour
    pub const CENTERED: Self = Self {
        direction: GazeDirection::Center,
        ratio: 1.0,
    };
}

impl Default for GazeResult {
    fn default() -> Self {
        Self::CENTERED
    }
}

/// Stateless gaze estimator parameterised by its thresholds
#[derive(Debug, Clone)]
pub struct GazeEstimator {
    config: GazeConfig,
}

impl Default for GazeEstimator {
    fn default() -> Self {
        Self::new(GazeConfig::default())
    }
}

impl GazeEstimator {
    /// Create an estimator with the given thresholds
    #[must_use]
    pub const fn new(config: GazeConfig) -> Self {
        Self { config }
    }

    /// Estimate gaze for one eye contour over a grayscale frame indexed `[row, col]`.
    ///
    /// Never fails: an empty crop or a non-finite contour point yields
    /// [`GazeResult::CENTERED`].
    #[must_use]
    pub fn estimate(&self, polygon: &[Point2D], gray: ArrayView2<'_, u8>) -> GazeResult {
        let (rows, cols) = gray.dim();

        if polygon.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            debug!("Non-finite eye contour {:?}", polygon);
            return GazeResult::CENTERED;
        }

        // Landmarks are handled at integer pixel precision
        let vertices: Vec<(i32, i32)> = polygon
            .iter()
            .map(|p| {
                (
                    f64_to_i32_clamp(p.x, i32::MIN / 2, i32::MAX / 2),
                    f64_to_i32_clamp(p.y, i32::MIN / 2, i32::MAX / 2),
                )
            })
            .collect();
        let snapped: Vec<Point2D> = vertices.iter().copied().map(Point2D::from).collect();
        let rect = clip_box(&BoundingBox::around(&snapped), cols, rows);

        if rect.is_empty() {
            debug!("Empty eye crop for polygon {:?}", vertices);
            return GazeResult::CENTERED;
        }

        let mask = polygon_mask(&vertices, rect);
        let (left_white, right_white) = self.white_pixel_counts(gray, &mask, rect);
        let ratio = self.ratio_from_counts(left_white, right_white);
        let direction = self.classify(ratio);

        debug!(
            "Gaze crop {}x{}: white L={} R={} ratio={:.3} -> {}",
            rect.width(),
            rect.height(),
            left_white,
            right_white,
            ratio,
            direction
        );

        GazeResult { direction, ratio }
    }

    /// Gaze ratio from white pixel counts, applying the zero-count sentinels
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Pixel counts are far below 2^52
    pub fn ratio_from_counts(&self, left_white: usize, right_white: usize) -> f64 {
        if left_white == 0 {
            self.config.zero_left_ratio
        } else if right_white == 0 {
            self.config.zero_right_ratio
        } else {
            left_white as f64 / right_white as f64
        }
    }

    /// Direction for a gaze ratio
    #[must_use]
    pub fn classify(&self, ratio: f64) -> GazeDirection {
        if ratio < self.config.right_below {
            GazeDirection::Right
        } else if ratio > self.config.left_above {
            GazeDirection::Left
        } else {
            GazeDirection::Center
        }
    }

    /// Count thresholded white pixels in the left and right halves of the crop
    fn white_pixel_counts(&self, gray: ArrayView2<'_, u8>, mask: &Array2<bool>, rect: PixelRect) -> (usize, usize) {
        let half = rect.width() / 2;
        let cutoff = self.config.intensity_cutoff;
        let mut left = 0;
        let mut right = 0;

        for ((row, col), &inside) in mask.indexed_iter() {
            // Pixels outside the contour are zeroed before thresholding
            let value = if inside { gray[[rect.y0 + row, rect.x0 + col]] } else { 0 };
            if value >= cutoff {
                if col < half {
                    left += 1;
                } else {
                    right += 1;
                }
            }
        }

        (left, right)
    }
}

/// Estimate gaze with the default thresholds
#[must_use]
pub fn estimate_gaze(polygon: &[Point2D], gray: ArrayView2<'_, u8>) -> GazeResult {
    GazeEstimator::default().estimate(polygon, gray)
}

/// Rasterize a closed polygon (outline plus interior) into a mask covering `rect`.
///
/// The mask is indexed `[row, col]` relative to the rectangle's origin. Work
/// is bounded by the rectangle: fill spans and outline edges are clipped to
/// it first.
fn polygon_mask(vertices: &[(i32, i32)], rect: PixelRect) -> Array2<bool> {
    let mut mask = Array2::from_elem((rect.height(), rect.width()), false);
    if vertices.is_empty() || rect.is_empty() {
        return mask;
    }

    let bounds = PixelBounds::of(rect);
    let mut set = |x: i64, y: i64| {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if (rect.x0..rect.x1).contains(&x) && (rect.y0..rect.y1).contains(&y) {
            mask[[y - rect.y0, x - rect.x0]] = true;
        }
    };

    let edges: Vec<((i64, i64), (i64, i64))> = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&(ax, ay), &(bx, by))| ((i64::from(ax), i64::from(ay)), (i64::from(bx), i64::from(by))))
        .collect();

    // Interior: even-odd scanline fill with half-open edge spans
    for yi in bounds.y0..bounds.y1 {
        #[allow(clippy::cast_precision_loss)]
        let yf = yi as f64;
        let mut crossings: Vec<f64> = edges
            .iter()
            .filter(|((_, ay), (_, by))| ay != by && yi >= *ay.min(by) && yi < *ay.max(by))
            .map(|&((ax, ay), (bx, by))| ax as f64 + (yf - ay as f64) * (bx - ax) as f64 / (by - ay) as f64)
            .collect();
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let start = i64::from(f64_to_i32_clamp(pair[0].ceil(), i32::MIN / 2, i32::MAX / 2)).max(bounds.x0);
            let end = i64::from(f64_to_i32_clamp(pair[1].floor(), i32::MIN / 2, i32::MAX / 2)).min(bounds.x1 - 1);
            for x in start..=end {
                set(x, yi);
            }
        }
    }

    // Outline: one-pixel Bresenham lines between consecutive vertices
    for &(a, b) in &edges {
        let Some(((x0, y0), (x1, y1))) = bounds.clip_segment(a, b) else {
            continue;
        };
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            set(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    mask
}

/// A [`PixelRect`] in signed coordinates, for clipping polygon geometry
#[derive(Debug, Clone, Copy)]
struct PixelBounds {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl PixelBounds {
    fn of(rect: PixelRect) -> Self {
        let signed = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Self {
            x0: signed(rect.x0),
            y0: signed(rect.y0),
            x1: signed(rect.x1),
            y1: signed(rect.y1),
        }
    }

    fn contains_closed(&self, (x, y): (i64, i64)) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Liang-Barsky clip of segment `a`-`b` to the closed bounds.
    ///
    /// Segments with both ends inside come back unchanged, so the outline
    /// of a contour that fits the frame is rasterized exactly.
    #[allow(clippy::cast_precision_loss)] // Coordinates are bounded by i32
    fn clip_segment(&self, a: (i64, i64), b: (i64, i64)) -> Option<((i64, i64), (i64, i64))> {
        if self.contains_closed(a) && self.contains_closed(b) {
            return Some((a, b));
        }

        let (ax, ay) = (a.0 as f64, a.1 as f64);
        let (dx, dy) = ((b.0 - a.0) as f64, (b.1 - a.1) as f64);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);

        for (p, q) in [
            (-dx, ax - self.x0 as f64),
            (dx, self.x1 as f64 - ax),
            (-dy, ay - self.y0 as f64),
            (dy, self.y1 as f64 - ay),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
            }
        }

        if t0 > t1 {
            return None;
        }

        let at = |t: f64| {
            (
                i64::from(f64_to_i32_clamp((ax + t * dx).round(), i32::MIN / 2, i32::MAX / 2)),
                i64::from(f64_to_i32_clamp((ay + t * dy).round(), i32::MIN / 2, i32::MAX / 2)),
            )
        };
        Some((at(t0), at(t1)))
    }
}
