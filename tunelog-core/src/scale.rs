//! Linear scales and the per-frame axis set.

use std::collections::HashMap;

use crate::range::{FieldMap, PlottableField};
use crate::zoom::ZoomTransform;

/// Fixed pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport box as `[[x0, y0], [x1, y1]]`.
    pub fn extent(&self) -> [[f64; 2]; 2] {
        [[0.0, 0.0], [self.width, self.height]]
    }
}

/// Maps a numeric domain onto a pixel range by linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Copy of this scale with a different domain.
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: self.range,
        }
    }

    /// Map a domain value to the range.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 - d0 != 0.0 {
            (value - d0) / (d1 - d0)
        } else {
            0.5
        };
        r0 + t * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if r1 - r0 != 0.0 {
            (pixel - r0) / (r1 - r0)
        } else {
            0.5
        };
        d0 + t * (d1 - d0)
    }

    /// Roughly `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        if count == 0 || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        if stop < start {
            let mut ticks = nice_ticks(stop, start, count);
            ticks.reverse();
            return ticks;
        }
        nice_ticks(start, stop, count)
    }
}

/// Tick values stepping by 1, 2 or 5 times a power of ten.
fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        // Work with the inverse step so tick values stay exact decimals.
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 {
            return Vec::new();
        }
        (0..=(i2 - i1) as i64)
            .map(|i| (i1 + i as f64) / inc)
            .collect()
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 {
            return Vec::new();
        }
        (0..=(i2 - i1) as i64)
            .map(|i| (i1 + i as f64) * inc)
            .collect()
    }
}

/// X scale shared by all fields plus one Y scale per field label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScales {
    /// Time scale for the current view. Its domain is the visible window.
    pub x: LinearScale,
    /// Full time domain `[0, max_time]`, independent of zoom.
    pub time_domain: (f64, f64),
    /// Value scales, inverted so larger values plot higher.
    pub y: HashMap<String, LinearScale>,
}

impl AxisScales {
    /// Build the scales for one frame.
    ///
    /// With a zoom transform the X scale is rescaled from the unzoomed base
    /// every time, so repeated gestures never accumulate rounding drift.
    pub fn build(
        max_time: f64,
        fields: &FieldMap,
        viewport: Viewport,
        transform: Option<&ZoomTransform>,
    ) -> Self {
        let base = LinearScale::new((0.0, max_time), (0.0, viewport.width));
        let x = match transform {
            Some(t) => t.rescale_x(&base),
            None => base,
        };

        let y = fields
            .iter()
            .map(|(label, field)| (label.clone(), y_scale(field, viewport)))
            .collect();

        Self {
            x,
            time_domain: base.domain(),
            y,
        }
    }

    /// Domain currently shown along X.
    pub fn visible_domain(&self) -> (f64, f64) {
        self.x.domain()
    }

    /// Round time values inside the visible window.
    pub fn time_ticks(&self, count: usize) -> Vec<f64> {
        self.x.ticks(count)
    }

    /// Value scale for a label.
    pub fn y_for(&self, label: &str) -> Option<&LinearScale> {
        self.y.get(label)
    }
}

/// Y scale for one field. Flat series collapse to the vertical midpoint.
pub fn y_scale(field: &PlottableField, viewport: Viewport) -> LinearScale {
    let domain = if field.is_flat() {
        (field.observed_min, field.observed_min)
    } else {
        (field.min, field.max)
    };
    LinearScale::new(domain, (viewport.height, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_invert() {
        let scale = LinearScale::new((0.0, 2.0), (0.0, 100.0));
        assert_eq!(scale.apply(1.0), 50.0);
        assert_eq!(scale.invert(25.0), 0.5);
    }

    #[test]
    fn test_inverted_range() {
        let scale = LinearScale::new((0.0, 2000.0), (50.0, 0.0));
        assert_eq!(scale.apply(2000.0), 0.0);
        assert_eq!(scale.apply(1500.0), 12.5);
        assert_eq!(scale.apply(0.0), 50.0);
    }

    #[test]
    fn test_degenerate_domain_is_midpoint() {
        let scale = LinearScale::new((7.0, 7.0), (50.0, 0.0));
        assert_eq!(scale.apply(7.0), 25.0);
        assert_eq!(scale.apply(-300.0), 25.0);
        assert!(!scale.apply(f64::MAX).is_nan());
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(
            scale.ticks(5),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );

        let small = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        assert_eq!(small.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let reversed = LinearScale::new((10.0, 0.0), (0.0, 100.0));
        assert_eq!(reversed.ticks(2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_time_ticks_follow_zoom() {
        let fields = FieldMap::new();
        let viewport = Viewport::new(100.0, 50.0);

        let full = AxisScales::build(10.0, &fields, viewport, None);
        assert_eq!(full.time_ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let zoomed = AxisScales::build(
            10.0,
            &fields,
            viewport,
            Some(&ZoomTransform::new(2.0, -50.0, 0.0)),
        );
        assert_eq!(zoomed.visible_domain(), (2.5, 7.5));
        assert_eq!(zoomed.time_ticks(5), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(zoomed.time_domain, (0.0, 10.0));
    }

    #[test]
    fn test_ticks_degenerate() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(scale.ticks(5), vec![3.0]);
        assert!(scale.ticks(0).is_empty());
    }
}
