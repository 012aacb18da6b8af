//! Per-field value range discovery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::{Hsl, field_color};
use crate::log::Sample;
use crate::selection::FieldSelection;

/// Where the running min/max of a field starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOrigin {
    /// Seed at 0, so every range includes 0.
    #[default]
    Zero,
    /// Seed at the first observed value.
    Observed,
}

/// Everything needed to plot and describe one selected field.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottableField {
    /// Lower bound of the Y domain.
    pub min: f64,
    /// Upper bound of the Y domain.
    pub max: f64,
    /// Smallest value actually seen (missing counts as 0).
    pub observed_min: f64,
    /// Largest value actually seen (missing counts as 0).
    pub observed_max: f64,
    pub scale: f64,
    pub transform: f64,
    pub units: String,
    pub format: String,
    pub color: Hsl,
}

impl PlottableField {
    /// Whether every observed value is the same.
    pub fn is_flat(&self) -> bool {
        self.observed_min == self.observed_max
    }

    /// Apply the display scale and offset to a raw value.
    pub fn display_value(&self, raw: f64) -> f64 {
        raw * self.scale + self.transform
    }
}

/// Descriptor mapping keyed by field label.
pub type FieldMap = HashMap<String, PlottableField>;

#[derive(Debug, Clone, Copy)]
struct Running {
    min: f64,
    max: f64,
    observed: Option<(f64, f64)>,
}

impl Running {
    fn push(&mut self, value: f64) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
        self.observed = Some(match self.observed {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
}

/// Scan the filtered samples once and describe every selected field.
///
/// The result always has exactly one entry per distinct selected label,
/// even when there are no samples. A label missing from a sample, or a
/// non-finite reading, counts as 0. Duplicate labels keep the color of their first position.
pub fn scan_ranges(
    samples: &[Sample],
    selection: &[FieldSelection],
    origin: RangeOrigin,
    palette_size: usize,
) -> FieldMap {
    // (selection index, entry) for the first occurrence of each label.
    let mut fields: Vec<(usize, &FieldSelection)> = Vec::with_capacity(selection.len());
    for (index, field) in selection.iter().enumerate() {
        if !fields.iter().any(|(_, f)| f.label == field.label) {
            fields.push((index, field));
        }
    }

    let mut running = vec![
        Running {
            min: 0.0,
            max: 0.0,
            observed: None,
        };
        fields.len()
    ];

    for (position, sample) in samples.iter().enumerate() {
        for ((_, field), acc) in fields.iter().zip(running.iter_mut()) {
            let value = sample.value(&field.label).unwrap_or(0.0);
            if position == 0 && origin == RangeOrigin::Observed {
                acc.min = value;
                acc.max = value;
            }
            acc.push(value);
        }
    }

    fields
        .into_iter()
        .zip(running)
        .map(|((index, field), acc)| {
            let (observed_min, observed_max) = acc.observed.unwrap_or((0.0, 0.0));
            (
                field.label.clone(),
                PlottableField {
                    min: acc.min,
                    max: acc.max,
                    observed_min,
                    observed_max,
                    scale: field.resolved_scale(),
                    transform: field.resolved_transform(),
                    units: field.units.clone(),
                    format: field.format.clone(),
                    color: field_color(index, palette_size),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpm_log() -> Vec<Sample> {
        vec![
            Sample::field().with("Time", 0.0).with("RPM", 1000.0),
            Sample::field().with("Time", 1.0).with("RPM", 2000.0),
            Sample::field().with("Time", 2.0).with("RPM", 1500.0),
        ]
    }

    #[test]
    fn test_zero_seeded_range() {
        let selection = vec![FieldSelection::new("rpm", "RPM").with_units("rpm")];
        let fields = scan_ranges(&rpm_log(), &selection, RangeOrigin::Zero, 5);

        let rpm = &fields["RPM"];
        assert_eq!(rpm.min, 0.0);
        assert_eq!(rpm.max, 2000.0);
        assert_eq!(rpm.observed_min, 1000.0);
        assert_eq!(rpm.observed_max, 2000.0);
        assert_eq!(rpm.units, "rpm");
        assert!(!rpm.is_flat());
    }

    #[test]
    fn test_observed_range() {
        let selection = vec![FieldSelection::new("rpm", "RPM")];
        let fields = scan_ranges(&rpm_log(), &selection, RangeOrigin::Observed, 5);

        assert_eq!(fields["RPM"].min, 1000.0);
        assert_eq!(fields["RPM"].max, 2000.0);
    }

    #[test]
    fn test_negative_field_keeps_zero_max() {
        let samples = vec![
            Sample::field().with("Ign", -4.0),
            Sample::field().with("Ign", -10.0),
        ];
        let selection = vec![FieldSelection::new("ign", "Ign")];
        let fields = scan_ranges(&samples, &selection, RangeOrigin::Zero, 5);

        assert_eq!(fields["Ign"].min, -10.0);
        assert_eq!(fields["Ign"].max, 0.0);
    }

    #[test]
    fn test_missing_label_counts_as_zero() {
        let samples = vec![
            Sample::field().with("MAP", 40.0),
            Sample::field(),
            Sample::field().with("MAP", 60.0),
        ];
        let selection = vec![FieldSelection::new("map", "MAP")];
        let fields = scan_ranges(&samples, &selection, RangeOrigin::Observed, 5);

        assert_eq!(fields["MAP"].min, 0.0);
        assert_eq!(fields["MAP"].observed_min, 0.0);
        assert_eq!(fields["MAP"].max, 60.0);
    }

    #[test]
    fn test_nan_reading_counts_as_zero() {
        let samples = vec![
            Sample::field().with("AFR", f64::NAN),
            Sample::field().with("AFR", 3.0),
        ];
        let selection = vec![FieldSelection::new("afr", "AFR")];
        let fields = scan_ranges(&samples, &selection, RangeOrigin::Observed, 5);

        let afr = &fields["AFR"];
        assert_eq!((afr.observed_min, afr.observed_max), (0.0, 3.0));
        assert_eq!((afr.min, afr.max), (0.0, 3.0));
        assert!(!afr.is_flat());
    }

    #[test]
    fn test_key_set_without_samples() {
        let selection = vec![
            FieldSelection::new("rpm", "RPM"),
            FieldSelection::new("afr", "AFR"),
        ];
        let fields = scan_ranges(&[], &selection, RangeOrigin::Zero, 5);

        assert_eq!(fields.len(), 2);
        assert!(fields["AFR"].is_flat());
    }

    #[test]
    fn test_duplicate_label_keeps_first_color() {
        let selection = vec![
            FieldSelection::new("rpm", "RPM"),
            FieldSelection::new("afr", "AFR"),
            FieldSelection::new("rpm2", "RPM"),
        ];
        let fields = scan_ranges(&rpm_log(), &selection, RangeOrigin::Zero, 5);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields["RPM"].color, field_color(0, 5));
        assert_eq!(fields["AFR"].color, field_color(1, 5));
    }

    #[test]
    fn test_display_value() {
        let selection = vec![
            FieldSelection::new("clt", "CLT")
                .with_scale(1.8)
                .with_transform(32.0),
        ];
        let samples = vec![Sample::field().with("CLT", 100.0)];
        let fields = scan_ranges(&samples, &selection, RangeOrigin::Zero, 5);

        assert_eq!(fields["CLT"].display_value(100.0), 212.0);
    }
}
