//! Facial landmark containers handed to the detection core.
//!
//! The landmark provider is external; this module only fixes the 68-point
//! layout and packages one face's eye contours with the frame's grayscale
//! image.

use crate::{
    constants::{LEFT_EYE_RANGE, NUM_FACIAL_LANDMARKS, RIGHT_EYE_RANGE},
    geometry::{EyeLandmarks, Point2D},
    Error, Result,
};
use ndarray::ArrayView2;

/// Full 68-point landmark set for one face
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Point2D>,
}

impl FaceLandmarks {
    /// Wrap a 68-point landmark set
    ///
    /// # Errors
    ///
    /// Returns an error if the point count is not 68.
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        if points.len() != NUM_FACIAL_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {NUM_FACIAL_LANDMARKS} landmarks, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// All landmark points
    #[must_use]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Extract both eye contours
    ///
    /// # Errors
    ///
    /// Cannot fail for a validated set; the `Result` comes from the slice conversion.
    pub fn eyes(&self) -> Result<FaceEyes> {
        Ok(FaceEyes {
            left: EyeLandmarks::try_from(&self.points[LEFT_EYE_RANGE])?,
            right: EyeLandmarks::try_from(&self.points[RIGHT_EYE_RANGE])?,
        })
    }
}

/// The two eye contours of one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceEyes {
    /// Subject's left eye (landmarks 42..48)
    pub left: EyeLandmarks,
    /// Subject's right eye (landmarks 36..42)
    pub right: EyeLandmarks,
}

/// One detected face at one instant, borrowed from the frame it came from
#[derive(Debug, Clone)]
pub struct FrameSample<'a> {
    pub left_eye: EyeLandmarks,
    pub right_eye: EyeLandmarks,
    /// Seconds on the caller's monotonic clock
    pub timestamp: f64,
    /// Grayscale frame indexed `[row, col]`, read-only for the duration of the step
    pub gray: ArrayView2<'a, u8>,
}

impl<'a> FrameSample<'a> {
    /// Build a sample from a face's eyes and the frame image
    #[must_use]
    pub fn new(eyes: FaceEyes, timestamp: f64, gray: ArrayView2<'a, u8>) -> Self {
        Self {
            left_eye: eyes.left,
            right_eye: eyes.right,
            timestamp,
            gray,
        }
    }
}
