//! Deterministic per-field color assignment.

use std::fmt;

/// Hue of the first palette slot (cold).
const COLD_HUE: f64 = 220.0;
/// Hue of the last palette slot (hot).
const HOT_HUE: f64 = 0.0;
const SATURATION: f64 = 90.0;
const LIGHTNESS: f64 = 50.0;

/// An HSL color; hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to RGB components in `0.0..=1.0`.
    pub fn to_rgb(&self) -> [f32; 3] {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        [(r + m) as f32, (g + m) as f32, (b + m) as f32]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Color for the field at `index` within a palette of `palette_size` slots.
///
/// Hues are spread evenly from cold to hot so neighbouring indices are far
/// apart. A palette of one slot (or none) always yields hue 0. Indices past
/// the palette wrap around.
pub fn field_color(index: usize, palette_size: usize) -> Hsl {
    if palette_size <= 1 {
        return Hsl::new(HOT_HUE, SATURATION, LIGHTNESS);
    }

    let slot = index % palette_size;
    let t = slot as f64 / (palette_size - 1) as f64;
    Hsl::new(COLD_HUE + t * (HOT_HUE - COLD_HUE), SATURATION, LIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_spread() {
        let hues: Vec<f64> = (0..5).map(|i| field_color(i, 5).hue).collect();
        assert_eq!(hues, vec![220.0, 165.0, 110.0, 55.0, 0.0]);
    }

    #[test]
    fn test_single_slot_palette() {
        assert_eq!(field_color(0, 1).hue, 0.0);
        assert_eq!(field_color(3, 0).hue, 0.0);
    }

    #[test]
    fn test_wraps_past_palette() {
        assert_eq!(field_color(5, 5), field_color(0, 5));
    }

    #[test]
    fn test_css_form() {
        assert_eq!(field_color(4, 5).to_string(), "hsl(0, 90%, 50%)");
    }

    #[test]
    fn test_to_rgb() {
        let [r, g, b] = Hsl::new(0.0, 100.0, 50.0).to_rgb();
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));

        let [r, g, b] = Hsl::new(220.0, 0.0, 50.0).to_rgb();
        assert_eq!((r, g, b), (0.5, 0.5, 0.5));
    }
}
