//! Performance benchmarks for the eye tracking pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eyevector::{
    blink::BlinkDetector,
    config::Config,
    gaze::GazeEstimator,
    geometry::{eye_aspect_ratio, EyeLandmarks, Point2D},
    landmarks::{FaceEyes, FrameSample},
    mute::{MuteController, SimulatedMute},
    tracker::EyeTracker,
};
use ndarray::Array2;
use std::time::Duration;

fn eye(x: f64, y: f64, scale: f64, openness: f64) -> EyeLandmarks {
    EyeLandmarks::new([
        Point2D::new(x, y),
        Point2D::new(x + 2.0 * scale, y - openness * scale),
        Point2D::new(x + 6.0 * scale, y - openness * scale),
        Point2D::new(x + 8.0 * scale, y),
        Point2D::new(x + 6.0 * scale, y + openness * scale),
        Point2D::new(x + 2.0 * scale, y + openness * scale),
    ])
}

/// Noisy grayscale frame
fn test_frame() -> Array2<u8> {
    Array2::from_shape_fn((480, 640), |(r, c)| ((r * 31 + c * 17) % 256) as u8)
}

/// Benchmark the eye aspect ratio
fn bench_ear(c: &mut Criterion) {
    let landmarks = eye(100.0, 100.0, 4.0, 1.2);
    c.bench_function("eye_aspect_ratio", |b| {
        b.iter(|| eye_aspect_ratio(black_box(&landmarks)));
    });
}

/// Benchmark gaze estimation for different eye sizes
fn bench_gaze(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaze");
    group.measurement_time(Duration::from_secs(5));

    let gray = test_frame();
    let estimator = GazeEstimator::default();

    for scale in [2.0, 4.0, 8.0, 16.0] {
        let landmarks = eye(200.0, 200.0, scale, 1.2);
        group.bench_with_input(BenchmarkId::new("estimate", scale), &landmarks, |b, landmarks| {
            b.iter(|| estimator.estimate(black_box(landmarks.points()), gray.view()));
        });
    }

    group.finish();
}

/// Benchmark the blink detector on a synthetic EAR stream
fn bench_blink(c: &mut Criterion) {
    let ears: Vec<f64> = (0..1000)
        .map(|i| if i % 40 < 3 { 0.1 } else { 0.3 })
        .collect();

    c.bench_function("blink_detector_1000_frames", |b| {
        b.iter(|| {
            let mut detector = BlinkDetector::default();
            for (i, &ear) in ears.iter().enumerate() {
                detector.update(black_box(ear), i as f64 / 30.0);
            }
            detector.blink_count()
        });
    });
}

/// Benchmark one full tracker step per face count
fn bench_tracker_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_step");
    let gray = test_frame();
    let config = Config::default();

    for faces in [1usize, 2, 4] {
        let eyes: Vec<FaceEyes> = (0..faces)
            .map(|i| {
                let x = 60.0 + 140.0 * i as f64;
                FaceEyes {
                    left: eye(x + 60.0, 200.0, 4.0, 1.2),
                    right: eye(x, 200.0, 4.0, 1.2),
                }
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(faces), &eyes, |b, eyes| {
            let mut tracker = EyeTracker::new(&config, 0.0);
            let mut mute = MuteController::new(Box::new(SimulatedMute::new(false)));
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 30.0;
                let samples: Vec<FrameSample<'_>> =
                    eyes.iter().map(|e| FrameSample::new(*e, t, gray.view())).collect();
                tracker.step(black_box(&samples), &mut mute)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ear, bench_gaze, bench_blink, bench_tracker_step);
criterion_main!(benches);
