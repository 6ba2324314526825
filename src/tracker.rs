//! Per-frame processing step tying the detectors together.
//!
//! For each face in a tick: EAR, blink detection for that face's slot,
//! double-blink gesture and mute toggle on a blink, gaze for both eyes,
//! mute query, then the session update. Face slots are matched by position
//! in the sample slice; the gesture detector and session are shared.

use crate::{
    blink::{BlinkDetector, BlinkPhase, EarReading},
    config::{BlinkConfig, Config},
    gaze::{GazeEstimator, GazeResult},
    geometry::mean_ear,
    gesture::{DoubleBlinkDetector, DoubleBlinkState},
    landmarks::FrameSample,
    mute::{MuteController, MuteState},
    session::{SessionAggregator, SessionSummary},
};
use log::debug;

/// Per-face output of one step
#[derive(Debug, Clone, PartialEq)]
pub struct FaceReport {
    /// Mean EAR of both eyes
    pub ear: f64,
    pub left_gaze: GazeResult,
    pub right_gaze: GazeResult,
    /// A blink completed on this frame
    pub blinked: bool,
    pub phase: BlinkPhase,
    /// Eyes have been closed past the long-closure limit
    pub alert_active: bool,
}

/// Output of one step, everything the presentation layer shows
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Timestamp of the processed samples, `None` for a tick without faces
    pub timestamp: Option<f64>,
    pub faces: Vec<FaceReport>,
    pub total_blinks: u64,
    pub mute_state: MuteState,
    /// A double blink toggled mute during this step
    pub toggled: bool,
    /// Closure length (seconds) that raises the alert
    pub alert_after_secs: f64,
}

impl FrameReport {
    /// Whether any face has the long-closure alert up
    #[must_use]
    pub fn any_alert(&self) -> bool {
        self.faces.iter().any(|f| f.alert_active)
    }

    /// Alert text for the configured closure limit
    #[must_use]
    pub fn alert_text(&self) -> String {
        format!("ALERT: Eyes closed > {}s!", self.alert_after_secs)
    }
}

/// The detection pipeline for one session
#[derive(Debug)]
pub struct EyeTracker {
    blink_config: BlinkConfig,
    detectors: Vec<BlinkDetector>,
    gesture: DoubleBlinkDetector,
    gaze: GazeEstimator,
    session: SessionAggregator,
}

impl EyeTracker {
    /// Create a tracker whose session starts at `start_time`
    #[must_use]
    pub fn new(config: &Config, start_time: f64) -> Self {
        Self {
            blink_config: config.blink,
            detectors: Vec::new(),
            gesture: DoubleBlinkDetector::new(config.gesture),
            gaze: GazeEstimator::new(config.gaze),
            session: SessionAggregator::new(start_time),
        }
    }

    /// Process one tick. An empty slice leaves all timing state untouched.
    pub fn step(&mut self, samples: &[FrameSample<'_>], mute: &mut MuteController) -> FrameReport {
        if samples.is_empty() {
            return FrameReport {
                timestamp: None,
                faces: Vec::new(),
                total_blinks: self.session.total_blinks(),
                mute_state: self.session.mute_state(),
                toggled: false,
                alert_after_secs: self.blink_config.long_closure_secs,
            };
        }

        if self.detectors.len() < samples.len() {
            self.detectors.resize_with(samples.len(), || BlinkDetector::new(self.blink_config));
        }

        let mut toggled = false;
        let mut faces = Vec::with_capacity(samples.len());

        for (sample, detector) in samples.iter().zip(self.detectors.iter_mut()) {
            let now = sample.timestamp;
            let ear = mean_ear(&sample.left_eye, &sample.right_eye);
            debug!("EAR {:.3} at {:.3}s", ear, now);

            let blink = detector.step(EarReading::Ear(ear), now);
            if let Some(event) = &blink {
                self.session.record_blink();
                if self.gesture.on_blink(event).is_some() {
                    mute.toggle();
                    toggled = true;
                }
            }

            let left_gaze = self.gaze.estimate(sample.left_eye.points(), sample.gray);
            let right_gaze = self.gaze.estimate(sample.right_eye.points(), sample.gray);
            let mute_state = mute.state();
            self.session
                .observe_frame(left_gaze.direction, right_gaze.direction, mute_state);

            faces.push(FaceReport {
                ear,
                left_gaze,
                right_gaze,
                blinked: blink.is_some(),
                phase: detector.phase(),
                alert_active: detector.alert_active(),
            });
        }

        FrameReport {
            timestamp: samples.last().map(|s| s.timestamp),
            faces,
            total_blinks: self.session.total_blinks(),
            mute_state: self.session.mute_state(),
            toggled,
            alert_after_secs: self.blink_config.long_closure_secs,
        }
    }

    /// Blinks counted across all faces
    #[must_use]
    pub const fn total_blinks(&self) -> u64 {
        self.session.total_blinks()
    }

    /// Blink detector of a face slot
    #[must_use]
    pub fn detector(&self, slot: usize) -> Option<&BlinkDetector> {
        self.detectors.get(slot)
    }

    /// Shared gesture timing state
    #[must_use]
    pub const fn gesture_state(&self) -> &DoubleBlinkState {
        self.gesture.state()
    }

    /// End the session at `end_time`
    #[must_use]
    pub fn finish(self, end_time: f64) -> SessionSummary {
        self.session.finish(end_time)
    }
}
