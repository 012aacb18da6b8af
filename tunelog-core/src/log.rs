use std::collections::HashMap;

/// Key of the universal X axis value in every sample.
pub const TIME_FIELD: &str = "Time";

/// Kind of record found in a tuning log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// A regular measurement row. Only these are plotted.
    #[default]
    Field,
    /// A marker inserted by the logger (button press, annotation).
    Marker,
}

/// One timestamped record of field -> value measurements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    /// Record discriminant.
    pub kind: RecordKind,

    /// Numeric values keyed by field label (e.g. "RPM", "MAP").
    pub values: HashMap<String, f64>,
}

impl Sample {
    /// Create an empty field record.
    pub fn field() -> Self {
        Self {
            kind: RecordKind::Field,
            values: HashMap::new(),
        }
    }

    /// Create an empty marker record.
    pub fn marker() -> Self {
        Self {
            kind: RecordKind::Marker,
            values: HashMap::new(),
        }
    }

    /// Add a value to this sample.
    pub fn with(mut self, label: impl Into<String>, value: f64) -> Self {
        self.values.insert(label.into(), value);
        self
    }

    /// Whether this record is plottable.
    pub fn is_field(&self) -> bool {
        self.kind == RecordKind::Field
    }

    /// Look up a field value, `None` when the label is absent or the
    /// reading is not finite.
    pub fn value(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied().filter(|v| v.is_finite())
    }

    /// Time of this sample; samples without a `Time` key sit at 0.
    pub fn time(&self) -> f64 {
        self.value(TIME_FIELD).unwrap_or(0.0)
    }
}

/// Keep only plottable records, preserving chronological order.
pub fn fields_only(samples: &[Sample]) -> Vec<Sample> {
    samples.iter().filter(|s| s.is_field()).cloned().collect()
}

/// Largest `Time` value in the sequence, 0 when empty.
///
/// Does not assume the last sample carries the maximum.
pub fn max_time(samples: &[Sample]) -> f64 {
    samples
        .iter()
        .map(Sample::time)
        .fold(None, |acc: Option<f64>, t| match acc {
            Some(m) if m >= t => Some(m),
            _ => Some(t),
        })
        .unwrap_or(0.0)
}
