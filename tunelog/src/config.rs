//! Viewer configuration (JSON5).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tunelog_core::{LoggingConfig, PlotConfig, Result, load_config};

/// Default number of generated demo samples.
const DEFAULT_DEMO_SAMPLES: usize = 2_000;

/// Demo log generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of field samples to generate (default: 2000).
    #[serde(default = "default_demo_samples")]
    pub samples: usize,

    /// Fixed RNG seed. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_demo_samples() -> usize {
    DEFAULT_DEMO_SAMPLES
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            samples: default_demo_samples(),
            seed: None,
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.plot.validate()
    }
}

/// `<config dir>/tunelog/tunelog.json5`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tunelog").join("tunelog.json5"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunelog_core::{LogFormat, parse_config};

    #[test]
    fn test_parse_app_config() {
        let json5 = r#"
        {
            logging: { level: "debug", format: "json" },
            plot: {
                width: 1024,
                selection: [{ name: "rpm", label: "RPM", units: "rpm" }],
            },
            demo: { samples: 500, seed: 42 },
        }
        "#;

        let config: AppConfig = parse_config(json5).unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.plot.width, 1024.0);
        assert_eq!(config.plot.height, 400.0);
        assert_eq!(config.plot.selection.len(), 1);
        assert_eq!(config.demo.samples, 500);
        assert_eq!(config.demo.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = parse_config("{}").unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.demo.samples, DEFAULT_DEMO_SAMPLES);
        assert_eq!(config.demo.seed, None);
    }

    #[test]
    fn test_invalid_plot_rejected() {
        let config: AppConfig = parse_config("{ plot: { height: -1 } }").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("tunelog/tunelog.json5"));
        }
    }
}
