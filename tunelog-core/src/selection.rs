//! Field selection entries and the selection bound policy.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};

/// Maximum number of concurrently plotted fields.
pub const MAX_FIELDS: usize = 5;

/// A number that may arrive either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Numeric value, `None` for unparsable text or NaN.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(v) => *v,
            Numeric::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl Default for Numeric {
    fn default() -> Self {
        Numeric::Number(0.0)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Number(v)
    }
}

fn default_scale() -> Numeric {
    Numeric::Number(1.0)
}

/// One field chosen for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    /// Stable render key.
    pub name: String,

    /// Key into each sample.
    pub label: String,

    /// Display units (e.g. "rpm", "kPa").
    #[serde(default)]
    pub units: String,

    /// Display multiplier.
    #[serde(default = "default_scale")]
    pub scale: Numeric,

    /// Display offset added after scaling.
    #[serde(default)]
    pub transform: Numeric,

    /// Display format, e.g. "%.1f".
    #[serde(default)]
    pub format: String,
}

impl FieldSelection {
    /// Create a selection entry with default scale, transform and format.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            units: String::new(),
            scale: default_scale(),
            transform: Numeric::default(),
            format: String::new(),
        }
    }

    /// Set the display units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the display scale multiplier.
    pub fn with_scale(mut self, scale: impl Into<Numeric>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Set the display offset.
    pub fn with_transform(mut self, transform: impl Into<Numeric>) -> Self {
        self.transform = transform.into();
        self
    }

    /// Set the display format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Scale multiplier; zero or unusable values fall back to 1.
    pub fn resolved_scale(&self) -> f64 {
        match self.scale.as_f64() {
            Some(v) if v != 0.0 => v,
            _ => 1.0,
        }
    }

    /// Offset; unusable values fall back to 0.
    pub fn resolved_transform(&self) -> f64 {
        self.transform.as_f64().unwrap_or(0.0)
    }
}

/// What to do with a selection longer than the field bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Plot the first entries up to the bound and ignore the rest.
    #[default]
    Truncate,
    /// Refuse the whole selection update.
    Reject,
}

/// Apply the bound policy to a selection.
///
/// Truncation reports a [`Diagnostic::SelectionTruncated`]; rejection
/// returns [`Error::SelectionOverflow`].
pub fn bound_selection(
    mut selection: Vec<FieldSelection>,
    max: usize,
    policy: OverflowPolicy,
) -> Result<(Vec<FieldSelection>, Option<Diagnostic>)> {
    let selected = selection.len();
    if selected <= max {
        return Ok((selection, None));
    }

    match policy {
        OverflowPolicy::Truncate => {
            tracing::warn!(selected, kept = max, "Selection exceeds field bound, truncating");
            selection.truncate(max);
            Ok((
                selection,
                Some(Diagnostic::SelectionTruncated {
                    selected,
                    kept: max,
                }),
            ))
        }
        OverflowPolicy::Reject => Err(Error::SelectionOverflow { selected, max }),
    }
}
