//! Shared formatting utilities for the TuneLog views.

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Decimal places requested by a printf-style format such as `%.2f`.
///
/// `%d` and `%i` mean 0. Anything unrecognized yields `None`.
pub fn format_precision(format: &str) -> Option<usize> {
    let spec = format.trim().strip_prefix('%')?;
    match spec {
        "d" | "i" => return Some(0),
        "f" => return Some(6),
        _ => {}
    }
    spec.strip_prefix('.')?
        .strip_suffix('f')?
        .parse()
        .ok()
}

/// Format a field value using its printf-style format, if it has one.
pub fn format_field_value(value: f64, format: &str) -> String {
    match format_precision(format) {
        Some(precision) => format!("{:.*}", precision, value),
        None => format_value(value),
    }
}

/// Format seconds for time axis labels.
///
/// Returns strings like "0s", "12.5s", "1:05", "1:02:03".
pub fn format_time(seconds: f64) -> String {
    if seconds.abs() < 60.0 {
        if seconds.fract() == 0.0 {
            format!("{:.0}s", seconds)
        } else {
            let text = format!("{:.2}", seconds);
            format!("{}s", text.trim_end_matches('0').trim_end_matches('.'))
        }
    } else {
        let total = seconds.round() as i64;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        if h > 0 {
            format!("{}:{:02}:{:02}", h, m, s)
        } else {
            format!("{}:{:02}", m, s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.14159), "3.14");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(2500000.0), "2.5M");
        assert_eq!(format_value(-1500.0), "-1.5K");
    }

    #[test]
    fn test_format_precision() {
        assert_eq!(format_precision("%.2f"), Some(2));
        assert_eq!(format_precision("%.0f"), Some(0));
        assert_eq!(format_precision("%d"), Some(0));
        assert_eq!(format_precision("%f"), Some(6));
        assert_eq!(format_precision(""), None);
        assert_eq!(format_precision("%s"), None);
    }

    #[test]
    fn test_format_field_value() {
        assert_eq!(format_field_value(14.678, "%.1f"), "14.7");
        assert_eq!(format_field_value(2000.0, "%.0f"), "2000");
        assert_eq!(format_field_value(2000.0, ""), "2.0K");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0s");
        assert_eq!(format_time(12.5), "12.5s");
        assert_eq!(format_time(0.25), "0.25s");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3723.0), "1:02:03");
    }
}
