//! Color math for contrast analysis.
//!
//! Implements WCAG 2.x relative luminance and contrast ratio over
//! normalized RGB. The sRGB linearization knee is 0.03928, the constant
//! used by the WCAG 2.0 definition that PDF tooling conventionally follows.

use serde::{Deserialize, Serialize};

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a color, clamping each channel to `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Create a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a gray color with the given level.
    pub fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        let r = srgb_to_linear(self.r.clamp(0.0, 1.0) as f64);
        let g = srgb_to_linear(self.g.clamp(0.0, 1.0) as f64);
        let b = srgb_to_linear(self.b.clamp(0.0, 1.0) as f64);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Mean channel value, used by the sampling ink filter.
    pub fn channel_mean(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Format as an uppercase hex string, e.g. `#1A2B3C`.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8
        )
    }
}

/// Linearize one sRGB channel.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio between two colors, rounded to 3 decimal places.
///
/// The ratio is `(L_lighter + 0.05) / (L_darker + 0.05)`, ranging from
/// 1.0 (identical) to 21.0 (black on white).
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    let ratio = (lighter + 0.05) / (darker + 0.05);
    (ratio * 1000.0).round() / 1000.0
}
