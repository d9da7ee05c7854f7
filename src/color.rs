//! Rainbow color mapping for curves and segments.

use bytemuck::{Pod, Zeroable};
use palette::{FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};

/// Lightness percent used for every curve
pub const CURVE_BRIGHTNESS: f32 = 50.0;

/// RGB color, components in [0, 1]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from HSL (hue in degrees, saturation and lightness in [0, 1])
    pub fn from_hsl(hue_deg: f32, saturation: f32, lightness: f32) -> Self {
        let hsl = Hsl::new(
            hue_deg.rem_euclid(360.0),
            saturation.clamp(0.0, 1.0),
            lightness.clamp(0.0, 1.0),
        );
        Self::from(Srgb::from_color(hsl))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// RGBA with the given alpha
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<Srgb> for Color {
    fn from(rgb: Srgb) -> Self {
        Self::rgb(rgb.red, rgb.green, rgb.blue)
    }
}

/// Hue in degrees for step `index` of `max_value`
pub fn rainbow_hue(index: usize, max_value: usize) -> f32 {
    if max_value == 0 {
        return 0.0;
    }
    // Reduce the index first so large indices keep full precision
    let step = index % max_value;
    360.0 * step as f32 / max_value as f32
}

/// Fully saturated rainbow color for step `index` of `max_value`
///
/// `brightness` is a lightness percent, floored after clamping to [0, 100].
pub fn rainbow(index: usize, max_value: usize, brightness: f32) -> Color {
    let lightness = brightness.clamp(0.0, 100.0).floor() / 100.0;
    Color::from_hsl(rainbow_hue(index, max_value), 1.0, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(rainbow(0, 3, 50.0), Color::rgb(1.0, 0.0, 0.0)));
        assert!(approx(rainbow(1, 3, 50.0), Color::rgb(0.0, 1.0, 0.0)));
        assert!(approx(rainbow(2, 3, 50.0), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_brightness_extremes() {
        assert_eq!(rainbow(5, 10, 0.0), Color::BLACK);
        assert!(approx(rainbow(5, 10, 100.0), Color::rgb(1.0, 1.0, 1.0)));
        // Out-of-range brightness is clamped rather than wrapped
        assert!(approx(rainbow(5, 10, 250.0), Color::rgb(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_brightness_is_floored() {
        assert_eq!(rainbow(4, 9, 37.9), rainbow(4, 9, 37.0));
        assert_ne!(rainbow(4, 9, 38.0), rainbow(4, 9, 37.0));
    }

    #[test]
    fn test_secondary_hues() {
        assert!(approx(Color::from_hsl(60.0, 1.0, 0.5), Color::rgb(1.0, 1.0, 0.0)));
        assert!(approx(Color::from_hsl(180.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 1.0)));
        // Hue wraps, saturation 0 is grey
        assert!(approx(Color::from_hsl(-60.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 1.0)));
        assert!(approx(Color::from_hsl(200.0, 0.0, 0.25), Color::rgb(0.25, 0.25, 0.25)));
    }

    #[test]
    fn test_zero_max_value() {
        assert_eq!(rainbow_hue(3, 0), 0.0);
    }

    proptest! {
        #[test]
        fn hue_is_periodic(index in 0usize..10_000, max_value in 1usize..512, brightness in 0.0f32..100.0) {
            prop_assert_eq!(rainbow_hue(index, max_value), rainbow_hue(index + max_value, max_value));
            prop_assert_eq!(
                rainbow(index, max_value, brightness),
                rainbow(index + max_value, max_value, brightness)
            );
        }

        #[test]
        fn hue_stays_in_range(index in 0usize..10_000, max_value in 1usize..512) {
            let hue = rainbow_hue(index, max_value);
            prop_assert!((0.0..360.0).contains(&hue));
        }
    }
}
