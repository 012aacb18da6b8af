//! Non-fatal anomalies recorded while rendering.

use std::fmt;

/// A recovered anomaly. None of these interrupt rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A selected label was absent from some samples; they were plotted as 0.
    MissingField { label: String, samples: usize },

    /// The selection was longer than the field bound and got cut.
    SelectionTruncated { selected: usize, kept: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingField { label, samples } => write!(
                f,
                "Field [{}] doesn't exist in {} sample(s) of this log",
                label, samples
            ),
            Diagnostic::SelectionTruncated { selected, kept } => write!(
                f,
                "{} fields selected, only the first {} are plotted",
                selected, kept
            ),
        }
    }
}
