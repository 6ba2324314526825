//! Audio mute control boundary.
//!
//! The platform mute API lives behind [`MuteBackend`]. [`MuteController`]
//! wraps a backend so that failures never reach the detection pipeline:
//! a failed query reads as [`MuteState::Unknown`] and a failed toggle leaves
//! the state as it was.

use crate::{Error, Result};
use log::{info, warn};
use std::fmt;

/// Observed system mute state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MuteState {
    Muted,
    Unmuted,
    /// The backend could not be queried
    #[default]
    Unknown,
}

impl MuteState {
    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Muted => "Muted",
            Self::Unmuted => "Unmuted",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<bool> for MuteState {
    fn from(muted: bool) -> Self {
        if muted {
            Self::Muted
        } else {
            Self::Unmuted
        }
    }
}

impl fmt::Display for MuteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform mute API
pub trait MuteBackend {
    /// Whether output audio is muted
    fn is_muted(&mut self) -> Result<bool>;

    /// Set the mute flag
    fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Failure-absorbing front end over a [`MuteBackend`]
pub struct MuteController {
    backend: Box<dyn MuteBackend>,
}

impl MuteController {
    /// Wrap a backend
    #[must_use]
    pub fn new(backend: Box<dyn MuteBackend>) -> Self {
        Self { backend }
    }

    /// Query the mute state, reporting `Unknown` on failure
    pub fn state(&mut self) -> MuteState {
        match self.backend.is_muted() {
            Ok(muted) => MuteState::from(muted),
            Err(e) => {
                warn!("Could not query mute state via {}: {}", self.backend.name(), e);
                MuteState::Unknown
            }
        }
    }

    /// Flip the mute state. Failures are logged and leave the state unchanged.
    pub fn toggle(&mut self) -> MuteState {
        let result = self
            .backend
            .is_muted()
            .and_then(|muted| self.backend.set_muted(!muted))
            .and_then(|()| self.backend.is_muted());

        match result {
            Ok(muted) => {
                let state = MuteState::from(muted);
                info!("Volume {state}");
                state
            }
            Err(e) => {
                warn!("Could not toggle mute via {}: {}", self.backend.name(), e);
                self.state()
            }
        }
    }
}

/// In-process mute flag, used for trace replay and tests
#[derive(Debug, Clone, Default)]
pub struct SimulatedMute {
    muted: bool,
    available: bool,
    toggles: u32,
}

impl SimulatedMute {
    /// A working device starting in the given state
    #[must_use]
    pub const fn new(muted: bool) -> Self {
        Self {
            muted,
            available: true,
            toggles: 0,
        }
    }

    /// A device whose every call fails
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            muted: false,
            available: false,
            toggles: 0,
        }
    }

    /// Number of successful mute changes
    #[must_use]
    pub const fn toggles(&self) -> u32 {
        self.toggles
    }

    fn check(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::MuteControl("audio device unavailable".to_string()))
        }
    }
}

impl MuteBackend for SimulatedMute {
    fn is_muted(&mut self) -> Result<bool> {
        self.check()?;
        Ok(self.muted)
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.check()?;
        if self.muted != muted {
            self.toggles += 1;
        }
        self.muted = muted;
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
