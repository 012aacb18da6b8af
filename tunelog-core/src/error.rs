use thiserror::Error;

/// Common error type for TuneLog components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Selection has {selected} fields, at most {max} can be plotted")]
    SelectionOverflow { selected: usize, max: usize },

    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Result type alias using TuneLog's Error.
pub type Result<T> = std::result::Result<T, Error>;
