//! Gaze estimation over synthetic grayscale frames

mod test_helpers;

use eyevector::{
    config::GazeConfig,
    gaze::{estimate_gaze, GazeDirection, GazeEstimator, GazeResult},
    geometry::Point2D,
};
use ndarray::Array2;
use std::time::{Duration, Instant};
use test_helpers::{eye_at, gray_with_bright_columns};

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2D> {
    vec![
        Point2D::new(x0, y0),
        Point2D::new(x1, y0),
        Point2D::new(x1, y1),
        Point2D::new(x0, y1),
    ]
}

#[test]
fn test_more_white_on_left_half() {
    // Crop spans columns 10..30, split at 20
    let gray = gray_with_bright_columns(40, 40, 10..25);
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.direction, GazeDirection::Left);
    assert!((result.ratio - 2.0).abs() < 1e-12);
}

#[test]
fn test_more_white_on_right_half() {
    let gray = gray_with_bright_columns(40, 40, 15..30);
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.direction, GazeDirection::Right);
    assert!((result.ratio - 0.5).abs() < 1e-12);
}

#[test]
fn test_balanced_is_center() {
    let gray = Array2::from_elem((40, 40), 200u8);
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result, GazeResult { direction: GazeDirection::Center, ratio: 1.0 });
}

#[test]
fn test_white_only_on_right_reads_center() {
    // A zero left count short-circuits to ratio 1.0
    let gray = gray_with_bright_columns(40, 40, 20..30);
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.ratio, 1.0);
    assert_eq!(result.direction, GazeDirection::Center);
}

#[test]
fn test_white_only_on_left_reads_left() {
    let gray = gray_with_bright_columns(40, 40, 10..20);
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.ratio, 5.0);
    assert_eq!(result.direction, GazeDirection::Left);
}

#[test]
fn test_intensity_cutoff_is_inclusive() {
    let gray = Array2::from_shape_fn((40, 40), |(_, c)| if c < 20 { 70u8 } else { 69u8 });
    let result = estimate_gaze(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.ratio, 5.0);
}

#[test]
fn test_pixels_outside_contour_ignored() {
    // Crop is rows 16..24, columns 10..18; only its top-left corner,
    // which lies outside the contour, and the area around the crop are bright
    let eye = eye_at(10.0, 20.0, 4.0);
    let gray = Array2::from_shape_fn((40, 40), |(row, col)| {
        let in_crop = (16..24).contains(&row) && (10..18).contains(&col);
        let corner = (16..18).contains(&row) && (10..12).contains(&col);
        if corner || !in_crop {
            255u8
        } else {
            0
        }
    });
    let result = estimate_gaze(eye.points(), gray.view());
    assert_eq!(result, GazeResult::CENTERED);
}

#[test]
fn test_eye_contour_left_half_bright() {
    // Crop columns 10..18, split at 14
    let eye = eye_at(10.0, 20.0, 4.0);
    let gray = gray_with_bright_columns(40, 40, 10..14);
    let result = estimate_gaze(eye.points(), gray.view());
    assert_eq!(result.direction, GazeDirection::Left);
    assert_eq!(result.ratio, 5.0);
}

#[test]
fn test_contour_partly_outside_frame() {
    let gray = Array2::from_elem((20, 20), 255u8);
    let result = estimate_gaze(&rectangle(10.0, 5.0, 40.0, 15.0), gray.view());
    // Crop is clipped to columns 10..20; both halves are bright
    assert_eq!(result.direction, GazeDirection::Center);
    assert_eq!(result.ratio, 1.0);
}

#[test]
fn test_degenerate_inputs_fall_back_to_center() {
    let gray = Array2::from_elem((20, 20), 255u8);
    assert_eq!(estimate_gaze(&[], gray.view()), GazeResult::CENTERED);

    let empty = Array2::<u8>::zeros((0, 0));
    assert_eq!(
        estimate_gaze(&rectangle(0.0, 0.0, 5.0, 5.0), empty.view()),
        GazeResult::CENTERED
    );
}

#[test]
fn test_far_off_frame_landmark_is_bounded() {
    let gray = Array2::from_elem((480, 640), 200u8);
    let mut contour = eye_at(100.0, 100.0, 4.0).points().to_vec();
    contour[3] = Point2D::new(2e8, 100.0);

    let started = Instant::now();
    let result = estimate_gaze(&contour, gray.view());
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(result.ratio.is_finite());
}

#[test]
fn test_nan_landmark_falls_back_to_center() {
    let gray = Array2::from_elem((480, 640), 200u8);
    let mut contour = eye_at(100.0, 100.0, 4.0).points().to_vec();
    contour[3] = Point2D::new(f64::NAN, 100.0);

    let started = Instant::now();
    assert_eq!(estimate_gaze(&contour, gray.view()), GazeResult::CENTERED);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_custom_thresholds() {
    let estimator = GazeEstimator::new(GazeConfig {
        intensity_cutoff: 100,
        right_below: 0.5,
        left_above: 3.0,
        ..GazeConfig::default()
    });
    let gray = gray_with_bright_columns(40, 40, 10..25);
    let result = estimator.estimate(&rectangle(10.0, 10.0, 30.0, 20.0), gray.view());
    assert_eq!(result.direction, GazeDirection::Center);
}
