//! TuneLog - Zoomable multi-field viewer for engine-tuning logs.
//!
//! Plots up to five log channels over a shared time axis, each with its
//! own vertical scale, and supports wheel zoom and drag panning.

use std::path::PathBuf;

use clap::Parser;
use iced::application;

use tunelog::config::default_config_path;
use tunelog::{AppConfig, TuneLog};

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(about = "Zoomable multi-field viewer for engine-tuning logs")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

/// Load the configuration named on the command line, else the per-user
/// default file if it exists, else built-in defaults.
fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    if let Some(ref path) = args.config {
        return Ok(AppConfig::load(path)?);
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(AppConfig::load(&path)?),
        _ => Ok(AppConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = load_config(&args)?;

    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    tunelog_core::init_tracing(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        width = config.plot.width,
        height = config.plot.height,
        "Starting TuneLog"
    );

    let window_size = (
        config.plot.width as f32 + 32.0,
        config.plot.height as f32 + 160.0,
    );

    // Run the Iced application
    application(
        move || TuneLog::boot(config.clone()),
        TuneLog::update,
        TuneLog::view,
    )
    .title(TuneLog::title)
    .theme(TuneLog::theme)
    .window_size(window_size)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
