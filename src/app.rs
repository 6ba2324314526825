//! Main application module: the frame loop.

use crate::{
    config::Config,
    error::Result,
    mute::MuteController,
    session::SessionSummary,
    sink::FrameSink,
    source::FrameSource,
    tracker::EyeTracker,
};
use log::info;
use std::time::Instant;

/// Wires a frame source, the detection pipeline and a sink together
pub struct EyeVectorApp {
    config: Config,
    source: Box<dyn FrameSource>,
    sink: Box<dyn FrameSink>,
    mute: MuteController,
    frame_limit: Option<usize>,
}

impl EyeVectorApp {
    /// Create the application
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: Config,
        source: Box<dyn FrameSource>,
        sink: Box<dyn FrameSink>,
        mute: MuteController,
    ) -> Result<Self> {
        info!("Initializing EyeVector");
        config.validate()?;

        Ok(Self {
            config,
            source,
            sink,
            mute,
            frame_limit: None,
        })
    }

    /// Stop after at most `limit` frames
    #[must_use]
    pub fn with_frame_limit(mut self, limit: Option<usize>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Run until the source is exhausted (or the frame limit is hit), then
    /// hand the session summary to the sink and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a frame or the sink
    /// fails to present one.
    pub fn run(mut self) -> Result<SessionSummary> {
        info!("Double Blink = Mute/Unmute");

        let wall_start = Instant::now();
        let mut frame_count = 0usize;
        let mut tracker: Option<EyeTracker> = None;
        let mut last_timestamp = 0.0;

        loop {
            if self.frame_limit.is_some_and(|limit| frame_count >= limit) {
                info!("Frame limit of {} reached", frame_count);
                break;
            }

            let Some(frame) = self.source.next_frame()? else {
                info!("End of frame source reached");
                break;
            };

            let tracker = tracker.get_or_insert_with(|| EyeTracker::new(&self.config, frame.timestamp));
            let report = tracker.step(&frame.samples(), &mut self.mute);
            self.sink.on_frame(&report)?;

            last_timestamp = frame.timestamp;
            frame_count += 1;
        }

        let elapsed = wall_start.elapsed().as_secs_f64();
        #[allow(clippy::cast_precision_loss)]
        let fps = if elapsed > 0.0 { frame_count as f64 / elapsed } else { 0.0 };
        info!("Processed {} frames ({:.1} frames/s)", frame_count, fps);

        let summary = tracker
            .unwrap_or_else(|| EyeTracker::new(&self.config, last_timestamp))
            .finish(last_timestamp);
        self.sink.on_summary(&summary)?;

        info!("Application shutting down");
        Ok(summary)
    }
}
