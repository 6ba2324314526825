//! Error types for the eye tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Eye landmarks collapsed or non-finite, so no ratio exists
    #[error("Degenerate eye geometry: horizontal distance {0}")]
    DegenerateGeometry(f64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Audio mute backend failed
    #[error("Mute control error: {0}")]
    MuteControl(String),

    /// Landmark trace is malformed
    #[error("Trace error: {0}")]
    TraceError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
