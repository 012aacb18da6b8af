//! Demo log generator.
//!
//! Produces a plausible engine-tuning log without an ECU attached: a
//! driver model picks throttle targets, and engine speed, manifold
//! pressure, mixture and coolant temperature follow with lag and noise.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tunelog_core::{FieldSelection, Sample, TIME_FIELD};

/// Seconds between consecutive samples (20 Hz logging).
pub const SAMPLE_INTERVAL: f64 = 0.05;

const IDLE_RPM: f64 = 850.0;
const REDLINE_RPM: f64 = 6800.0;
const AMBIENT_CLT: f64 = 20.0;
const OPERATING_CLT: f64 = 88.0;

/// Every channel the demo log carries, as selectable fields.
pub fn catalog() -> Vec<FieldSelection> {
    vec![
        FieldSelection::new("rpm", "RPM")
            .with_units("rpm")
            .with_format("%.0f"),
        FieldSelection::new("map", "MAP")
            .with_units("kPa")
            .with_format("%.1f"),
        FieldSelection::new("afr", "AFR")
            .with_units("AFR")
            .with_format("%.2f"),
        FieldSelection::new("tps", "TPS")
            .with_units("%")
            .with_format("%.0f"),
        FieldSelection::new("clt", "CLT")
            .with_units("°F")
            .with_scale(1.8)
            .with_transform(32.0)
            .with_format("%.1f"),
    ]
}

/// Seeded generator of demo logs.
pub struct DemoLog {
    rng: SmallRng,
}

impl DemoLog {
    /// Create a generator. Without a seed the log differs on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Generate `count` field samples, with marker records interleaved.
    pub fn generate(&mut self, count: usize) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(count + count / 100);

        let mut tps: f64 = 0.0;
        let mut tps_target = 0.0;
        let mut hold = 0usize;
        let mut rpm = IDLE_RPM;
        let mut clt = AMBIENT_CLT + self.rng.random_range(0.0..10.0);
        let mut next_marker = self.rng.random_range(150..400);

        for i in 0..count {
            let time = i as f64 * SAMPLE_INTERVAL;

            if hold == 0 {
                tps_target = match self.rng.random_range(0..10) {
                    0..=2 => 0.0,
                    3..=6 => self.rng.random_range(10.0..35.0),
                    7 | 8 => self.rng.random_range(35.0..70.0),
                    _ => 100.0,
                };
                hold = self.rng.random_range(40..160);
            }
            hold -= 1;

            tps += (tps_target - tps) * 0.2;
            let rpm_target = IDLE_RPM + (REDLINE_RPM - IDLE_RPM) * (tps / 100.0).powf(0.8);
            rpm += (rpm_target - rpm) * 0.04 + self.rng.random_range(-15.0..15.0);
            rpm = rpm.clamp(IDLE_RPM * 0.9, REDLINE_RPM);

            let map = 28.0 + tps * 0.72 + self.rng.random_range(-1.0..1.0);
            let afr_target = if tps > 80.0 {
                12.5
            } else if tps < 1.0 && rpm > 1500.0 {
                // Overrun fuel cut reads lean.
                19.0
            } else {
                14.7
            };
            let afr = afr_target + self.rng.random_range(-0.3..0.3);

            clt += (OPERATING_CLT - clt) * 0.002;

            samples.push(
                Sample::field()
                    .with(TIME_FIELD, time)
                    .with("RPM", rpm.round())
                    .with("MAP", map)
                    .with("AFR", afr)
                    .with("TPS", tps.round())
                    .with("CLT", clt),
            );

            if i == next_marker {
                samples.push(Sample::marker().with(TIME_FIELD, time));
                next_marker += self.rng.random_range(150..400);
            }
        }

        tracing::debug!(samples = samples.len(), "Generated demo log");
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_logs_repeat() {
        let a = DemoLog::new(Some(7)).generate(300);
        let b = DemoLog::new(Some(7)).generate(300);
        assert_eq!(a, b);
    }

    #[test]
    fn test_field_and_marker_counts() {
        let samples = DemoLog::new(Some(1)).generate(2_000);

        let fields = samples.iter().filter(|s| s.is_field()).count();
        assert_eq!(fields, 2_000);
        assert!(samples.iter().any(|s| !s.is_field()));
    }

    #[test]
    fn test_every_catalog_channel_present() {
        let samples = DemoLog::new(Some(3)).generate(50);

        for field in catalog() {
            assert!(
                samples
                    .iter()
                    .filter(|s| s.is_field())
                    .all(|s| s.value(&field.label).is_some()),
                "{} missing",
                field.label
            );
        }
    }

    #[test]
    fn test_values_plausible() {
        let samples = DemoLog::new(Some(11)).generate(1_000);

        for sample in samples.iter().filter(|s| s.is_field()) {
            let rpm = sample.value("RPM").unwrap();
            let tps = sample.value("TPS").unwrap();
            assert!((700.0..=REDLINE_RPM).contains(&rpm));
            assert!((0.0..=100.0).contains(&tps));
        }
    }

    #[test]
    fn test_time_steps() {
        let samples = DemoLog::new(Some(5)).generate(3);
        let times: Vec<f64> = samples.iter().map(|s| s.time()).collect();
        assert_eq!(times, vec![0.0, SAMPLE_INTERVAL, 2.0 * SAMPLE_INTERVAL]);
    }
}
