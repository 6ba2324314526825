//! Blink detection from a per-frame EAR stream.
//!
//! A closure counts as a blink only after at least `consec_frames`
//! consecutive frames below the EAR threshold, and the blink is emitted on
//! the first open frame after that. A closure lasting longer than
//! `long_closure_secs` raises an alert that stays up until the eyes reopen.

use crate::config::BlinkConfig;
use log::{debug, info};

/// Observation fed to the detector for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EarReading {
    /// Mean EAR of the tracked face
    Ear(f64),
    /// No face this tick; timing state is left untouched
    NoFace,
}

/// Coarse phase derived from the closed-frame counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Eyes open, no closure in progress
    Open,
    /// Eyes closed for fewer frames than the debounce threshold
    Closing,
    /// Closure long enough to count once the eyes reopen
    ClosedConfirmed,
}

/// Mutable per-face detector state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlinkDetectorState {
    pub consecutive_closed_frames: u32,
    pub closure_start_time: Option<f64>,
    pub alert_active: bool,
}

/// A completed blink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkEvent {
    /// Time of the reopening frame
    pub occurred_at: f64,
}

/// Debounced blink detector for one face
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    config: BlinkConfig,
    state: BlinkDetectorState,
    blink_count: u64,
}

impl Default for BlinkDetector {
    fn default() -> Self {
        Self::new(BlinkConfig::default())
    }
}

impl BlinkDetector {
    /// Create a detector with the given thresholds
    #[must_use]
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            state: BlinkDetectorState::default(),
            blink_count: 0,
        }
    }

    /// Advance by one tick. Returns the blink completed on this tick, if any.
    pub fn step(&mut self, reading: EarReading, now: f64) -> Option<BlinkEvent> {
        match reading {
            EarReading::Ear(ear) => self.update(ear, now),
            EarReading::NoFace => None,
        }
    }

    /// Advance with an EAR measurement taken at `now` (seconds)
    pub fn update(&mut self, ear: f64, now: f64) -> Option<BlinkEvent> {
        if ear < self.config.ear_threshold {
            self.on_closed(now);
            return None;
        }

        let event = if self.state.consecutive_closed_frames >= self.config.consec_frames {
            self.blink_count += 1;
            info!(
                "Blink #{} at {:.3}s after {} closed frames",
                self.blink_count, now, self.state.consecutive_closed_frames
            );
            Some(BlinkEvent { occurred_at: now })
        } else {
            None
        };

        self.state = BlinkDetectorState::default();
        event
    }

    fn on_closed(&mut self, now: f64) {
        self.state.consecutive_closed_frames += 1;
        let started = *self.state.closure_start_time.get_or_insert(now);
        let closed_for = now - started;

        if closed_for > self.config.long_closure_secs && !self.state.alert_active {
            info!("ALERT: eyes closed for {:.1}s", closed_for);
            self.state.alert_active = true;
        }

        debug!(
            "Eyes closed: {} frame(s), {:.3}s",
            self.state.consecutive_closed_frames, closed_for
        );
    }

    /// Current state snapshot
    #[must_use]
    pub const fn state(&self) -> &BlinkDetectorState {
        &self.state
    }

    /// Phase derived from the closed-frame counter
    #[must_use]
    pub const fn phase(&self) -> BlinkPhase {
        match self.state.consecutive_closed_frames {
            0 => BlinkPhase::Open,
            n if n < self.config.consec_frames => BlinkPhase::Closing,
            _ => BlinkPhase::ClosedConfirmed,
        }
    }

    /// Whether the long-closure alert is up
    #[must_use]
    pub const fn alert_active(&self) -> bool {
        self.state.alert_active
    }

    /// Blinks emitted by this detector so far
    #[must_use]
    pub const fn blink_count(&self) -> u64 {
        self.blink_count
    }

    /// Reset the detector
    pub fn reset(&mut self) {
        self.state = BlinkDetectorState::default();
        self.blink_count = 0;
    }
}
