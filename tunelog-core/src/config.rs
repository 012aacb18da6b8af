use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pipeline::PipelineOptions;
use crate::range::RangeOrigin;
use crate::scale::Viewport;
use crate::selection::{FieldSelection, MAX_FIELDS, OverflowPolicy};
use crate::zoom::{DEFAULT_SCALE_EXTENT, ZoomBounds};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Plot surface and pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Viewport width in pixels (default: 800).
    #[serde(default = "default_width")]
    pub width: f64,

    /// Viewport height in pixels (default: 400).
    #[serde(default = "default_height")]
    pub height: f64,

    /// Maximum number of plotted fields (default: 5).
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,

    /// Number of color slots (default: 5).
    #[serde(default = "default_max_fields")]
    pub palette_size: usize,

    /// Allowed zoom factors as `[min, max]` (default: `[1, 1000]`).
    #[serde(default = "default_scale_extent")]
    pub scale_extent: [f64; 2],

    /// Line width in pixels (default: 2).
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,

    /// Draw time tick labels along the bottom edge.
    #[serde(default = "default_true")]
    pub show_ticks: bool,

    /// Range seeding: "zero" (default) or "observed".
    #[serde(default)]
    pub range_origin: RangeOrigin,

    /// Oversized selections: "truncate" (default) or "reject".
    #[serde(default)]
    pub overflow: OverflowPolicy,

    /// Fields selected at startup.
    #[serde(default)]
    pub selection: Vec<FieldSelection>,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    400.0
}

fn default_max_fields() -> usize {
    MAX_FIELDS
}

fn default_scale_extent() -> [f64; 2] {
    [DEFAULT_SCALE_EXTENT.0, DEFAULT_SCALE_EXTENT.1]
}

fn default_stroke_width() -> f32 {
    2.0
}

fn default_true() -> bool {
    true
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_fields: default_max_fields(),
            palette_size: default_max_fields(),
            scale_extent: default_scale_extent(),
            stroke_width: default_stroke_width(),
            show_ticks: true,
            range_origin: RangeOrigin::default(),
            overflow: OverflowPolicy::default(),
            selection: Vec::new(),
        }
    }
}

impl PlotConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        let [min, max] = self.scale_extent;
        if !(min >= 1.0 && max >= min && max.is_finite()) {
            return Err(Error::Config(format!(
                "scale_extent must satisfy 1 <= min <= max, got [{}, {}]",
                min, max
            )));
        }

        if self.max_fields == 0 || self.palette_size == 0 {
            return Err(Error::Config(
                "max_fields and palette_size must be at least 1".to_string(),
            ));
        }

        if self.stroke_width <= 0.0 {
            return Err(Error::Config("stroke_width must be positive".to_string()));
        }

        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_fields: self.max_fields,
            palette_size: self.palette_size,
            range_origin: self.range_origin,
            overflow: self.overflow,
        }
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds::for_viewport(
            self.viewport(),
            (self.scale_extent[0], self.scale_extent[1]),
        )
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plot_config() {
        let json5 = r#"
        {
            width: 640,
            height: 240,
            scale_extent: [1, 50],
            range_origin: "observed",
            overflow: "reject",
            selection: [
                { name: "rpm", label: "RPM", units: "rpm" },
                { name: "afr", label: "AFR", format: "%.2f" },
            ],
        }
        "#;

        let config: PlotConfig = parse_config(json5).unwrap();

        assert_eq!(config.viewport(), Viewport::new(640.0, 240.0));
        assert_eq!(config.zoom_bounds().scale_extent, (1.0, 50.0));
        assert_eq!(config.range_origin, RangeOrigin::Observed);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
        assert_eq!(config.selection.len(), 2);
        assert_eq!(config.selection[1].format, "%.2f");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config: PlotConfig = parse_config("{}").unwrap();

        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 400.0);
        assert_eq!(config.max_fields, 5);
        assert_eq!(config.scale_extent, [1.0, 1000.0]);
        assert_eq!(config.range_origin, RangeOrigin::Zero);
        assert_eq!(config.overflow, OverflowPolicy::Truncate);
        assert!(config.show_ticks);
        assert!(config.selection.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut config = PlotConfig::default();
        assert!(config.validate().is_ok());

        config.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidViewport { .. })
        ));

        config.width = 100.0;
        config.scale_extent = [0.5, 10.0];
        assert!(config.validate().is_err());

        config.scale_extent = [10.0, 1.0];
        assert!(config.validate().is_err());

        config.scale_extent = [1.0, 10.0];
        config.max_fields = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"{ level: "debug", format: "json" }"#;
        let config: LoggingConfig = parse_config(json5).unwrap();

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_config_file() {
        let path = std::env::temp_dir().join("tunelog-no-such-config.json5");
        let result: Result<PlotConfig> = load_config(&path);

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
