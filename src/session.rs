//! Session totals and the end-of-session summary.

use crate::{gaze::GazeDirection, mute::MuteState};
use chrono::{DateTime, Local};
use std::fmt;

/// Wall-clock format used in the summary
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accumulates per-frame results over one session
#[derive(Debug, Clone)]
pub struct SessionAggregator {
    start_time: f64,
    started_at: DateTime<Local>,
    total_blinks: u64,
    last_left_gaze: GazeDirection,
    last_right_gaze: GazeDirection,
    mute_state: MuteState,
}

impl SessionAggregator {
    /// Start a session at `start_time` seconds on the frame clock
    #[must_use]
    pub fn new(start_time: f64) -> Self {
        Self {
            start_time,
            started_at: Local::now(),
            total_blinks: 0,
            last_left_gaze: GazeDirection::Center,
            last_right_gaze: GazeDirection::Center,
            mute_state: MuteState::Unknown,
        }
    }

    /// Count one blink
    pub fn record_blink(&mut self) {
        self.total_blinks += 1;
    }

    /// Update with the latest gaze of both eyes and the current mute state
    pub fn observe_frame(&mut self, left: GazeDirection, right: GazeDirection, mute_state: MuteState) {
        self.last_left_gaze = left;
        self.last_right_gaze = right;
        self.mute_state = mute_state;
    }

    /// Blinks counted so far
    #[must_use]
    pub const fn total_blinks(&self) -> u64 {
        self.total_blinks
    }

    /// Most recently observed mute state
    #[must_use]
    pub const fn mute_state(&self) -> MuteState {
        self.mute_state
    }

    /// Close the session at `end_time` and produce the summary
    #[must_use]
    pub fn finish(self, end_time: f64) -> SessionSummary {
        SessionSummary {
            start_time: self.start_time,
            end_time,
            started_at: self.started_at,
            ended_at: Local::now(),
            total_blinks: self.total_blinks,
            last_left_gaze: self.last_left_gaze,
            last_right_gaze: self.last_right_gaze,
            final_mute_state: self.mute_state,
        }
    }
}

/// Final record of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Session start on the frame clock (seconds)
    pub start_time: f64,
    /// Session end on the frame clock (seconds)
    pub end_time: f64,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub total_blinks: u64,
    pub last_left_gaze: GazeDirection,
    pub last_right_gaze: GazeDirection,
    pub final_mute_state: MuteState,
}

impl SessionSummary {
    /// Session length on the frame clock
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.end_time - self.start_time
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session Summary")?;
        writeln!(f)?;
        writeln!(f, "Session started: {}", self.started_at.format(WALL_CLOCK_FORMAT))?;
        writeln!(f, "Session ended:   {}", self.ended_at.format(WALL_CLOCK_FORMAT))?;
        writeln!(f, "Duration:        {:.1}s", self.duration_secs())?;
        writeln!(f, "Total blinks:    {}", self.total_blinks)?;
        writeln!(f, "Gaze (left/right): {} / {}", self.last_left_gaze, self.last_right_gaze)?;
        write!(f, "Mute/Unmute status: {}", self.final_mute_state)
    }
}
