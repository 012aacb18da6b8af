//! TuneLog Core Library
//!
//! Rendering and transform pipeline for plotting engine-tuning logs as
//! overlaid, independently scaled line series:
//!
//! - [`log`] - Sample data model (`Sample`, `RecordKind`)
//! - [`selection`] - Field selection entries and the field bound policy
//! - [`color`] - Per-field color assignment
//! - [`range`] - Per-field min/max discovery (`PlottableField`)
//! - [`scale`] - Linear scales and the per-frame axis set
//! - [`zoom`] - Zoom transform and the gesture-driven controller
//! - [`path`] - Polyline generation
//! - [`pipeline`] - Dependency-tracked frame recomputation
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod log;
pub mod path;
pub mod pipeline;
pub mod range;
pub mod scale;
pub mod selection;
pub mod zoom;

// Re-export commonly used types at the crate root
pub use color::{Hsl, field_color};
pub use config::{LogFormat, LoggingConfig, PlotConfig, load_config, parse_config};
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
pub use log::{RecordKind, Sample, TIME_FIELD};
pub use path::RenderedPath;
pub use pipeline::{Frame, Pipeline, PipelineOptions, render};
pub use range::{FieldMap, PlottableField, RangeOrigin};
pub use scale::{AxisScales, LinearScale, Viewport};
pub use selection::{FieldSelection, MAX_FIELDS, Numeric, OverflowPolicy};
pub use zoom::{Gesture, WheelDelta, ZoomBounds, ZoomController, ZoomState, ZoomTransform};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
