//! Perceptual color difference
//!
//! Converts 8-bit sRGB pixels to CIE Lab (D65) so that nearest-color
//! candidates can be annotated with a ΔE next to their Manhattan distance.

use palette::{FromColor, Lab, Srgb};

use crate::color::Rgb;

/// Color converter for Lab-based comparisons
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert an 8-bit sRGB pixel to Lab
    pub fn rgb_to_lab(&self, color: Rgb) -> Lab {
        let srgb: Srgb<f32> = Srgb::new(color.r, color.g, color.b).into_format();
        Lab::from_color(srgb)
    }

    /// Euclidean distance in Lab (ΔE76)
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f32 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// ΔE76 between two 8-bit sRGB pixels
    pub fn rgb_delta_e(&self, a: Rgb, b: Rgb) -> f32 {
        self.delta_e(self.rgb_to_lab(a), self.rgb_to_lab(b))
    }
}
