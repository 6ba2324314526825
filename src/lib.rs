//! Eye blink, double-blink and gaze tracking library.
//!
//! This library turns per-frame facial landmarks into eye state:
//! - Eye Aspect Ratio (EAR) from the six contour points of each eye
//! - Debounced blink detection with a long-closure alert
//! - A double-blink gesture that toggles audio mute
//! - Coarse horizontal gaze from the white-pixel balance inside each eye
//!
//! Camera capture and landmark detection live outside the crate. Frames come
//! from a [`source::FrameSource`]; results go to a [`sink::FrameSink`].
//!
//! # Examples
//!
//! ## Blink Detection
//!
//! ```
//! use eyevector::blink::BlinkDetector;
//!
//! let mut detector = BlinkDetector::default();
//! let mut blinks = 0;
//! for (i, ear) in [0.30, 0.10, 0.10, 0.30].into_iter().enumerate() {
//!     if detector.update(ear, i as f64 * 0.033).is_some() {
//!         blinks += 1;
//!     }
//! }
//! assert_eq!(blinks, 1);
//! ```
//!
//! ## Replaying a Trace
//!
//! ```no_run
//! use eyevector::{
//!     app::EyeVectorApp,
//!     config::Config,
//!     mute::{MuteController, SimulatedMute},
//!     sink::LogSink,
//!     source::TraceSource,
//! };
//!
//! # fn main() -> eyevector::Result<()> {
//! let config = Config::default();
//! let source = TraceSource::from_file("session.yaml", config.frame)?;
//! let mute = MuteController::new(Box::new(SimulatedMute::new(false)));
//!
//! let app = EyeVectorApp::new(config, Box::new(source), Box::new(LogSink::new()), mute)?;
//! let summary = app.run()?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

/// Main application module
pub mod app;

/// Debounced blink detection
pub mod blink;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Error types and result handling
pub mod error;

/// Horizontal gaze estimation
pub mod gaze;

/// Points, eye contours and the eye aspect ratio
pub mod geometry;

/// Double-blink mute gesture
pub mod gesture;

/// Facial landmark sets and per-frame samples
pub mod landmarks;

/// Audio mute control
pub mod mute;

/// Session statistics and summary
pub mod session;

/// Presentation sinks
pub mod sink;

/// Frame sources
pub mod source;

/// Per-frame processing pipeline
pub mod tracker;

/// Utility functions for pixel regions and numeric conversions
pub mod utils;

pub use error::{Error, Result};
