//! TuneLog - Zoomable multi-field viewer for engine-tuning logs.
//!
//! This library exposes the application components for testing.

pub mod app;
pub mod config;
pub mod demo;
pub mod message;
pub mod mock;
pub mod view;

// Re-export commonly used types
pub use app::TuneLog;
pub use config::AppConfig;
pub use message::Message;
