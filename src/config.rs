//! Configuration management for the eye tracking pipeline

use crate::{constants, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blink detection configuration
    pub blink: BlinkConfig,

    /// Double-blink gesture configuration
    pub gesture: GestureConfig,

    /// Gaze estimation configuration
    pub gaze: GazeConfig,

    /// Frame configuration for trace replay
    pub frame: FrameConfig,
}

/// Blink detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Mean EAR below which the eyes count as closed
    pub ear_threshold: f64,

    /// Consecutive closed frames required for a blink
    pub consec_frames: u32,

    /// Closure duration (seconds) that raises the long-closure alert
    pub long_closure_secs: f64,
}

/// Double-blink gesture parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum gap (seconds) between the two blinks
    pub window_secs: f64,

    /// Minimum time (seconds) between toggles
    pub cooldown_secs: f64,
}

/// Gaze estimation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Pixels at or above this intensity count as white
    pub intensity_cutoff: u8,

    /// Ratios below this classify as right
    pub right_below: f64,

    /// Ratios above this classify as left
    pub left_above: f64,

    /// Ratio reported when the left half has no white pixels
    pub zero_left_ratio: f64,

    /// Ratio reported when the right half has no white pixels
    pub zero_right_ratio: f64,
}

/// Frame parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Width of the blank frame used when a trace frame has no pixels
    pub width: usize,

    /// Height of the blank frame used when a trace frame has no pixels
    pub height: usize,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ear_threshold: constants::EAR_THRESHOLD,
            consec_frames: constants::CONSEC_FRAMES_THRESHOLD,
            long_closure_secs: constants::LONG_CLOSURE_SECS,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            window_secs: constants::DOUBLE_BLINK_WINDOW,
            cooldown_secs: constants::DOUBLE_BLINK_COOLDOWN,
        }
    }
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            intensity_cutoff: constants::GAZE_INTENSITY_CUTOFF,
            right_below: constants::GAZE_RIGHT_BELOW,
            left_above: constants::GAZE_LEFT_ABOVE,
            zero_left_ratio: constants::GAZE_ZERO_LEFT_RATIO,
            zero_right_ratio: constants::GAZE_ZERO_RIGHT_RATIO,
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: constants::DEFAULT_FRAME_WIDTH,
            height: constants::DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate blink parameters
        if !(self.blink.ear_threshold.is_finite() && self.blink.ear_threshold > 0.0) {
            return Err(Error::ConfigError("EAR threshold must be a positive number".to_string()));
        }
        if self.blink.consec_frames == 0 {
            return Err(Error::ConfigError(
                "Consecutive frame threshold must be greater than 0".to_string(),
            ));
        }
        if !(self.blink.long_closure_secs.is_finite() && self.blink.long_closure_secs >= 0.0) {
            return Err(Error::ConfigError(
                "Long closure duration must be a non-negative number".to_string(),
            ));
        }

        // Validate gesture timing
        if !(self.gesture.window_secs.is_finite() && self.gesture.window_secs > 0.0) {
            return Err(Error::ConfigError(
                "Double blink window must be a positive number".to_string(),
            ));
        }
        if !(self.gesture.cooldown_secs.is_finite() && self.gesture.cooldown_secs >= 0.0) {
            return Err(Error::ConfigError(
                "Double blink cooldown must be a non-negative number".to_string(),
            ));
        }

        // Validate gaze classification bands
        if !(self.gaze.right_below.is_finite() && self.gaze.left_above.is_finite()) {
            return Err(Error::ConfigError("Gaze bounds must be finite".to_string()));
        }
        if self.gaze.right_below > self.gaze.left_above {
            return Err(Error::ConfigError(format!(
                "Gaze right bound {} exceeds left bound {}",
                self.gaze.right_below, self.gaze.left_above
            )));
        }

        // Validate frame size
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(Error::ConfigError("Frame size must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# EyeVector Configuration

# Blink detection
blink:
  ear_threshold: 0.23
  consec_frames: 2
  long_closure_secs: 3.0

# Double blink = mute toggle
gesture:
  window_secs: 0.7
  cooldown_secs: 1.5

# Gaze estimation
gaze:
  intensity_cutoff: 70
  right_below: 0.8
  left_above: 1.2
  zero_left_ratio: 1.0
  zero_right_ratio: 5.0

# Blank frame size for traces without pixel data
frame:
  width: 640
  height: 480
"#;
