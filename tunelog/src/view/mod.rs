//! View components for the TuneLog application.

pub mod canvas;
pub mod fields;
pub mod formatting;
pub mod legend;
