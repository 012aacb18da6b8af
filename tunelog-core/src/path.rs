//! Polyline generation for selected fields.

use std::fmt::Write;

use crate::color::Hsl;
use crate::log::Sample;
use crate::scale::LinearScale;
use crate::selection::FieldSelection;

/// One field's plotted series in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    /// Render key of the selection entry.
    pub name: String,
    /// Sample key the values came from.
    pub label: String,
    pub color: Hsl,
    /// Points in sample order.
    pub points: Vec<[f64; 2]>,
    /// SVG-style path data, e.g. `M0,50L50,0`.
    pub descriptor: String,
}

/// Map every sample to `(x(time), y(value))` and join them into one path.
///
/// Returns the path and how many samples lacked the field's label; those
/// are plotted at value 0 so the line stays continuous.
pub fn generate_path(
    samples: &[Sample],
    field: &FieldSelection,
    color: Hsl,
    x: &LinearScale,
    y: &LinearScale,
) -> (RenderedPath, usize) {
    let mut missing = 0;
    let points: Vec<[f64; 2]> = samples
        .iter()
        .map(|sample| {
            let value = sample.value(&field.label).unwrap_or_else(|| {
                missing += 1;
                0.0
            });
            [x.apply(sample.time()), y.apply(value)]
        })
        .collect();

    let path = RenderedPath {
        name: field.name.clone(),
        label: field.label.clone(),
        color,
        descriptor: path_descriptor(&points),
        points,
    };
    (path, missing)
}

/// Serialize points as `M x,y L x,y ...` path data. Empty input gives "".
pub fn path_descriptor(points: &[[f64; 2]]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for (i, [x, y]) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        // Writing to a String cannot fail.
        let _ = write!(out, "{}{},{}", command, coord(*x), coord(*y));
    }
    out
}

/// Print -0 as 0.
fn coord(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_format() {
        let d = path_descriptor(&[[0.0, 50.0], [50.0, 0.0], [100.0, 12.5]]);
        assert_eq!(d, "M0,50L50,0L100,12.5");
    }

    #[test]
    fn test_descriptor_empty_and_single() {
        assert_eq!(path_descriptor(&[]), "");
        assert_eq!(path_descriptor(&[[1.5, -0.0]]), "M1.5,0");
    }

    #[test]
    fn test_missing_values_plot_as_zero() {
        let samples = vec![
            Sample::field().with("Time", 0.0).with("AFR", 14.7),
            Sample::field().with("Time", 1.0),
        ];
        let field = FieldSelection::new("afr", "AFR");
        let x = LinearScale::new((0.0, 1.0), (0.0, 10.0));
        let y = LinearScale::new((0.0, 14.7), (10.0, 0.0));

        let (path, missing) = generate_path(&samples, &field, Hsl::new(0.0, 90.0, 50.0), &x, &y);

        assert_eq!(missing, 1);
        assert_eq!(path.points, vec![[0.0, 0.0], [10.0, 10.0]]);
        assert_eq!(path.name, "afr");
    }
}
