//! Geometry helpers over 2D landmark points.
//!
//! Holds the eye aspect ratio (EAR) computation used by blink detection and
//! the bounding-box math shared with gaze estimation. Everything here is
//! stateless.

use crate::{constants::EPSILON, constants::EYE_LANDMARK_COUNT, Error, Result};
use serde::{Deserialize, Serialize};

/// A 2D landmark coordinate in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal position (column)
    pub x: f64,
    /// Vertical position (row)
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shift the point by `(dx, dy)`
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// The six contour points of one eye.
///
/// Order follows the 68-point convention: outer corner, two upper-lid
/// points, inner corner, two lower-lid points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLandmarks([Point2D; EYE_LANDMARK_COUNT]);

impl EyeLandmarks {
    /// Wrap six points
    #[must_use]
    pub const fn new(points: [Point2D; EYE_LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// The contour points in landmark order
    #[must_use]
    pub const fn points(&self) -> &[Point2D; EYE_LANDMARK_COUNT] {
        &self.0
    }

    /// Shift every point by `(dx, dy)`
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self(self.0.map(|p| p.translate(dx, dy)))
    }

    /// Axis-aligned bounding box of the contour
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(&self.0)
    }
}

impl TryFrom<&[Point2D]> for EyeLandmarks {
    type Error = Error;

    fn try_from(points: &[Point2D]) -> Result<Self> {
        let points: [Point2D; EYE_LANDMARK_COUNT] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Eye contour needs exactly {EYE_LANDMARK_COUNT} points, got {}",
                points.len()
            ))
        })?;
        Ok(Self(points))
    }
}

/// Axis-aligned box in floating point pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box containing all points. An empty slice yields a zero box.
    #[must_use]
    pub fn around(points: &[Point2D]) -> Self {
        if points.is_empty() {
            return Self {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            };
        }

        points.iter().fold(
            Self {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    /// Box width
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Box height
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Compute the eye aspect ratio of one eye.
///
/// With contour points `p0..p5` this is `(|p1-p5| + |p2-p4|) / (2 |p0-p3|)`.
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] when the horizontal distance
/// `|p0-p3|` is zero (the eye corners coincide) or when a coordinate is
/// not finite.
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> Result<f64> {
    let p = eye.points();
    let a = p[1].distance(&p[5]);
    let b = p[2].distance(&p[4]);
    let c = p[0].distance(&p[3]);

    if c.is_nan() || c < EPSILON {
        return Err(Error::DegenerateGeometry(c));
    }

    let ear = (a + b) / (2.0 * c);
    if !ear.is_finite() {
        return Err(Error::DegenerateGeometry(c));
    }

    Ok(ear)
}

/// EAR with degenerate geometry mapped to 0.0, which reads as closed
#[must_use]
pub fn eye_aspect_ratio_or_closed(eye: &EyeLandmarks) -> f64 {
    eye_aspect_ratio(eye).unwrap_or_else(|e| {
        log::debug!("{e}; treating eye as closed");
        0.0
    })
}

/// Mean EAR of both eyes, the value the blink detector consumes
#[must_use]
pub fn mean_ear(left: &EyeLandmarks, right: &EyeLandmarks) -> f64 {
    (eye_aspect_ratio_or_closed(left) + eye_aspect_ratio_or_closed(right)) / 2.0
}
