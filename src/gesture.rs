//! Double-blink gesture detection.
//!
//! Two blinks closer together than the window fire a [`ToggleCommand`],
//! provided the previous toggle is older than the cooldown. A blink that
//! does not complete a gesture becomes the new pending blink, so the window
//! slides forward instead of resetting.

use crate::{blink::BlinkEvent, config::GestureConfig};
use log::{debug, info};

/// Signal to flip the mute state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCommand;

/// Timing state of the gesture detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleBlinkState {
    pub pending_blink_time: Option<f64>,
    /// Time of the last toggle; negative infinity before the first one
    pub last_toggle_time: f64,
}

impl Default for DoubleBlinkState {
    fn default() -> Self {
        Self {
            pending_blink_time: None,
            last_toggle_time: f64::NEG_INFINITY,
        }
    }
}

/// Double-blink detector, one per session
#[derive(Debug, Clone, Default)]
pub struct DoubleBlinkDetector {
    config: GestureConfig,
    state: DoubleBlinkState,
}

impl DoubleBlinkDetector {
    /// Create a detector with the given timing
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: DoubleBlinkState::default(),
        }
    }

    /// Feed one blink event
    pub fn on_blink(&mut self, blink: &BlinkEvent) -> Option<ToggleCommand> {
        let t = blink.occurred_at;

        let Some(pending) = self.state.pending_blink_time else {
            self.state.pending_blink_time = Some(t);
            return None;
        };

        let since_last = t - pending;
        let since_toggle = t - self.state.last_toggle_time;

        if since_last < self.config.window_secs && since_toggle > self.config.cooldown_secs {
            info!("Double blink at {:.3}s ({:.3}s apart)", t, since_last);
            self.state.last_toggle_time = t;
            self.state.pending_blink_time = None;
            Some(ToggleCommand)
        } else {
            debug!(
                "Blink at {:.3}s is pending (gap {:.3}s, {:.3}s since toggle)",
                t, since_last, since_toggle
            );
            self.state.pending_blink_time = Some(t);
            None
        }
    }

    /// Current timing state
    #[must_use]
    pub const fn state(&self) -> &DoubleBlinkState {
        &self.state
    }

    /// Reset the detector
    pub fn reset(&mut self) {
        self.state = DoubleBlinkState::default();
    }
}
