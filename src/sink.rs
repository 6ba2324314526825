//! Push-based presentation sinks.
//!
//! A [`FrameSink`] receives every [`FrameReport`] for display and the
//! [`SessionSummary`] once at the end of the session.

use crate::{session::SessionSummary, tracker::FrameReport, Result};
use log::{debug, info, warn};

/// Receiver of per-frame results and the final summary
pub trait FrameSink {
    /// Called after every processed tick
    fn on_frame(&mut self, report: &FrameReport) -> Result<()>;

    /// Called once when the session ends
    fn on_summary(&mut self, summary: &SessionSummary) -> Result<()>;
}

/// Overlay text lines for one report, top to bottom
#[must_use]
pub fn overlay_lines(report: &FrameReport) -> Vec<String> {
    let mut lines = vec![format!("Blinks: {}", report.total_blinks)];

    for face in &report.faces {
        lines.push(format!("Gaze: {}/{}", face.left_gaze.direction, face.right_gaze.direction));
    }

    lines.push(format!("Mute: {}", report.mute_state));
    lines.push("Double Blink = Mute Toggle".to_string());

    if report.any_alert() {
        lines.push(report.alert_text());
    }

    lines
}

/// Writes reports to the log
///
/// Frames log at debug level; state changes (blinks, toggles, alerts) at info.
#[derive(Debug, Default)]
pub struct LogSink {
    alert_shown: bool,
}

impl LogSink {
    /// Create a new log sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for LogSink {
    fn on_frame(&mut self, report: &FrameReport) -> Result<()> {
        let lines = overlay_lines(report);
        debug!("{}", lines.join(" | "));

        if report.faces.iter().any(|f| f.blinked) {
            info!("Blinks: {}", report.total_blinks);
        }
        if report.toggled {
            info!("Mute: {}", report.mute_state);
        }

        // Only the first frame of each alert episode is reported
        let alert = report.any_alert();
        if alert && !self.alert_shown {
            warn!("{}", report.alert_text());
        }
        if report.timestamp.is_some() {
            self.alert_shown = alert;
        }

        Ok(())
    }

    fn on_summary(&mut self, summary: &SessionSummary) -> Result<()> {
        for line in summary.to_string().lines() {
            info!("{line}");
        }
        Ok(())
    }
}

/// Keeps everything it receives, for tests and embedding
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<FrameReport>,
    pub summary: Option<SessionSummary>,
}

impl FrameSink for RecordingSink {
    fn on_frame(&mut self, report: &FrameReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn on_summary(&mut self, summary: &SessionSummary) -> Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}
