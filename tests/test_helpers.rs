//! Helper functions and utilities for tests
#![allow(dead_code)]

use eyevector::{
    blink::{BlinkDetector, BlinkEvent},
    geometry::{EyeLandmarks, Point2D},
    landmarks::FaceEyes,
    mute::{MuteController, SimulatedMute},
    source::Frame,
};
use ndarray::Array2;

/// Eye contour 8px wide whose EAR is `openness / 4`
pub fn eye_at(x: f64, y: f64, openness: f64) -> EyeLandmarks {
    EyeLandmarks::new([
        Point2D::new(x, y),
        Point2D::new(x + 2.0, y - openness),
        Point2D::new(x + 6.0, y - openness),
        Point2D::new(x + 8.0, y),
        Point2D::new(x + 6.0, y + openness),
        Point2D::new(x + 2.0, y + openness),
    ])
}

/// Both eyes of a face with the given mean EAR, horizontally offset by `dx`
pub fn face_with_ear(ear: f64, dx: f64) -> FaceEyes {
    FaceEyes {
        left: eye_at(40.0 + dx, 20.0, ear * 4.0),
        right: eye_at(10.0 + dx, 20.0, ear * 4.0),
    }
}

/// A frame over a black 64x96 image
pub fn frame(timestamp: f64, faces: Vec<FaceEyes>) -> Frame {
    Frame {
        timestamp,
        gray: Array2::zeros((64, 96)),
        faces,
    }
}

/// Single-face frames for an EAR script of `(ear, timestamp)` pairs
pub fn frames_for_script(script: &[(f64, f64)]) -> Vec<Frame> {
    script
        .iter()
        .map(|&(ear, t)| frame(t, vec![face_with_ear(ear, 0.0)]))
        .collect()
}

/// Feed an EAR sequence at a fixed frame interval
pub fn feed_ears(detector: &mut BlinkDetector, ears: &[f64], dt: f64) -> Vec<BlinkEvent> {
    ears.iter()
        .enumerate()
        .filter_map(|(i, &ear)| detector.update(ear, i as f64 * dt))
        .collect()
}

/// EAR script containing one blink of `closed` frames starting at `t0`
pub fn blink_script(t0: f64, closed: usize, dt: f64) -> Vec<(f64, f64)> {
    let mut script = vec![(0.30, t0)];
    for i in 1..=closed {
        script.push((0.10, t0 + i as f64 * dt));
    }
    script.push((0.30, t0 + (closed + 1) as f64 * dt));
    script
}

/// Controller over a working simulated device
pub fn simulated_mute(muted: bool) -> MuteController {
    MuteController::new(Box::new(SimulatedMute::new(muted)))
}

/// Grayscale image with the columns in `bright` set to 255
pub fn gray_with_bright_columns(rows: usize, cols: usize, bright: std::ops::Range<usize>) -> Array2<u8> {
    Array2::from_shape_fn((rows, cols), |(_, c)| if bright.contains(&c) { 255 } else { 0 })
}
