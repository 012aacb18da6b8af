//! Legend listing each plotted field with its color and observed range.

use iced::widget::{Row, container, row, text};
use iced::{Alignment, Element, Length, Theme};

use tunelog_core::{Diagnostic, Frame, PlottableField};

use super::canvas::to_color;
use super::formatting::format_field_value;
use crate::message::Message;

/// Observed range of a field after its display transform, e.g. "900 to 5200 rpm".
pub fn range_label(field: &PlottableField) -> String {
    let a = field.display_value(field.observed_min);
    let b = field.display_value(field.observed_max);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let range = if lo == hi {
        format_field_value(lo, &field.format)
    } else {
        format!(
            "{} to {}",
            format_field_value(lo, &field.format),
            format_field_value(hi, &field.format)
        )
    };

    if field.units.is_empty() {
        range
    } else {
        format!("{} {}", range, field.units)
    }
}

/// Render the legend for a frame, one entry per distinct label.
pub fn legend_view(frame: &Frame) -> Element<'_, Message> {
    let mut entries: Vec<Element<'_, Message>> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for path in frame.paths() {
        if seen.contains(&path.label.as_str()) {
            continue;
        }
        seen.push(&path.label);

        let Some(field) = frame.fields().get(&path.label) else {
            continue;
        };
        let color = to_color(field.color);

        let swatch = container(text(""))
            .width(Length::Fixed(12.0))
            .height(Length::Fixed(12.0))
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(color)),
                border: iced::Border {
                    radius: 2.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            });

        let missing = frame.diagnostics().iter().any(
            |d| matches!(d, Diagnostic::MissingField { label, .. } if *label == path.label),
        );
        let name = if missing {
            format!("{} (not in log)", path.label)
        } else {
            path.label.clone()
        };

        let entry = row![
            swatch,
            text(name).size(13).style(move |_theme: &Theme| text::Style {
                color: Some(color),
            }),
            text(range_label(field))
                .size(12)
                .style(|_theme: &Theme| text::Style {
                    color: Some(iced::Color::from_rgb(0.6, 0.6, 0.6)),
                }),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        entries.push(entry.into());
    }

    Row::with_children(entries)
        .spacing(20)
        .align_y(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunelog_core::Hsl;

    fn field(observed_min: f64, observed_max: f64) -> PlottableField {
        PlottableField {
            min: 0.0,
            max: observed_max,
            observed_min,
            observed_max,
            scale: 1.0,
            transform: 0.0,
            units: "rpm".to_string(),
            format: "%.0f".to_string(),
            color: Hsl::new(220.0, 90.0, 50.0),
        }
    }

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(&field(900.0, 5200.0)), "900 to 5200 rpm");
    }

    #[test]
    fn test_range_label_flat() {
        assert_eq!(range_label(&field(850.0, 850.0)), "850 rpm");
    }

    #[test]
    fn test_range_label_applies_transform() {
        let mut clt = field(0.0, 100.0);
        clt.scale = 1.8;
        clt.transform = 32.0;
        clt.units = "°F".to_string();
        clt.format = "%.1f".to_string();

        assert_eq!(range_label(&clt), "32.0 to 212.0 °F");
    }

    #[test]
    fn test_range_label_negative_scale() {
        let mut f = field(10.0, 20.0);
        f.scale = -1.0;
        f.units = String::new();
        assert_eq!(range_label(&f), "-20 to -10");
    }
}
