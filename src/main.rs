//! EyeVector: blink and gaze tracking with a double-blink mute toggle.

use anyhow::{Context, Result};
use clap::Parser;
use eyevector::{
    app::EyeVectorApp,
    config::{Config, EXAMPLE_CONFIG},
    mute::{MuteController, SimulatedMute},
    sink::LogSink,
    source::TraceSource,
};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark trace to replay (YAML)
    #[arg(short, long, required_unless_present = "example_config")]
    trace: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Start the simulated audio device muted
    #[arg(long)]
    start_muted: bool,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    info!("EyeVector - blink, gaze and double-blink mute toggle");

    // Load configuration if provided
    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let trace_path = args.trace.context("a trace file is required")?;
    let source = TraceSource::from_file(&trace_path, config.frame)
        .with_context(|| format!("failed to load trace {}", trace_path.display()))?;
    let mute = MuteController::new(Box::new(SimulatedMute::new(args.start_muted)));

    // Create and run application
    let app = EyeVectorApp::new(config, Box::new(source), Box::new(LogSink::new()), mute)?
        .with_frame_limit(args.max_frames);
    let summary = app.run()?;

    println!("{summary}");

    Ok(())
}
