//! Constants used throughout the application

/// Number of facial landmarks for full face
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Number of landmarks describing one eye contour
pub const EYE_LANDMARK_COUNT: usize = 6;

/// Landmark index range of the right eye (subject's right) in the 68-point layout
pub const RIGHT_EYE_RANGE: std::ops::Range<usize> = 36..42;

/// Landmark index range of the left eye (subject's left) in the 68-point layout
pub const LEFT_EYE_RANGE: std::ops::Range<usize> = 42..48;

/// Mean EAR below which the eyes count as closed
pub const EAR_THRESHOLD: f64 = 0.23;

/// Consecutive closed frames required before a reopening counts as a blink
pub const CONSEC_FRAMES_THRESHOLD: u32 = 2;

/// Continuous closure (seconds) after which the long-closure alert is raised
pub const LONG_CLOSURE_SECS: f64 = 3.0;

/// Maximum gap (seconds) between two blinks forming a double blink
pub const DOUBLE_BLINK_WINDOW: f64 = 0.7;

/// Minimum time (seconds) after a toggle before the next one may fire
pub const DOUBLE_BLINK_COOLDOWN: f64 = 1.5;

/// Intensity cutoff separating white sclera pixels from the rest
pub const GAZE_INTENSITY_CUTOFF: u8 = 70;

/// Gaze ratio below which the gaze is classified as right
pub const GAZE_RIGHT_BELOW: f64 = 0.8;

/// Gaze ratio above which the gaze is classified as left
pub const GAZE_LEFT_ABOVE: f64 = 1.2;

/// Ratio reported when the left half has no white pixels
pub const GAZE_ZERO_LEFT_RATIO: f64 = 1.0;

/// Ratio reported when the right half has no white pixels
pub const GAZE_ZERO_RIGHT_RATIO: f64 = 5.0;

/// Default frame size used when a trace frame carries no pixel data
pub const DEFAULT_FRAME_WIDTH: usize = 640;
pub const DEFAULT_FRAME_HEIGHT: usize = 480;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
