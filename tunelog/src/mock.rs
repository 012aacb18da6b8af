//! Fixed log fixtures for testing.
//!
//! Provides small, deterministic logs so views and the app can be
//! exercised without the random demo generator.

use tunelog_core::{FieldSelection, Sample, TIME_FIELD};

/// Build a field sample from `(label, value)` pairs at `time`.
pub fn sample(time: f64, values: &[(&str, f64)]) -> Sample {
    values
        .iter()
        .fold(Sample::field().with(TIME_FIELD, time), |s, (label, v)| {
            s.with(*label, *v)
        })
}

/// Three RPM readings over two seconds.
pub fn rpm_log() -> Vec<Sample> {
    vec![
        sample(0.0, &[("RPM", 1000.0)]),
        sample(1.0, &[("RPM", 2000.0)]),
        sample(2.0, &[("RPM", 1500.0)]),
    ]
}

/// A short pull with all demo channels and one marker.
pub fn pull_log() -> Vec<Sample> {
    vec![
        sample(
            0.0,
            &[
                ("RPM", 900.0),
                ("MAP", 30.0),
                ("AFR", 14.7),
                ("TPS", 0.0),
                ("CLT", 85.0),
            ],
        ),
        sample(
            0.5,
            &[
                ("RPM", 2500.0),
                ("MAP", 80.0),
                ("AFR", 13.1),
                ("TPS", 60.0),
                ("CLT", 85.5),
            ],
        ),
        Sample::marker().with(TIME_FIELD, 0.6),
        sample(
            1.0,
            &[
                ("RPM", 5200.0),
                ("MAP", 98.0),
                ("AFR", 12.4),
                ("TPS", 100.0),
                ("CLT", 86.0),
            ],
        ),
        sample(
            1.5,
            &[
                ("RPM", 3100.0),
                ("MAP", 25.0),
                ("AFR", 19.0),
                ("TPS", 0.0),
                ("CLT", 86.0),
            ],
        ),
    ]
}

/// Selection entry with units and display format.
pub fn field(label: &str, units: &str, format: &str) -> FieldSelection {
    FieldSelection::new(label.to_lowercase(), label)
        .with_units(units)
        .with_format(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_log() {
        let log = rpm_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1].value("RPM"), Some(2000.0));
        assert_eq!(log[2].time(), 2.0);
    }

    #[test]
    fn test_pull_log_has_marker() {
        let log = pull_log();
        assert_eq!(log.iter().filter(|s| !s.is_field()).count(), 1);
    }
}
