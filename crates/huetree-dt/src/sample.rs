//! Labeled pixel samples and their derived color features.

use crate::color::ColorClass;
use crate::feature::Feature;

/// A labeled RGB pixel with every split feature precomputed.
///
/// Derived values are pure functions of the three channels and are fixed
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sample {
    label: ColorClass,
    red: u8,
    green: u8,
    blue: u8,
    hue: u32,
    cohue: u32,
    saturation: u32,
    value: u32,
    chroma: u32,
}

impl Sample {
    /// Build a sample from a label string, falling back to
    /// [`ColorClass::FALLBACK`] (with a warning) for unknown labels.
    #[must_use]
    pub fn new(label: &str, red: u8, green: u8, blue: u8) -> Self {
        Self::with_class(ColorClass::from_name_or_fallback(label), red, green, blue)
    }

    /// Build a sample with an already resolved class.
    #[must_use]
    pub fn with_class(label: ColorClass, red: u8, green: u8, blue: u8) -> Self {
        let hue = hue(red, green, blue);
        Self {
            label,
            red,
            green,
            blue,
            hue,
            cohue: (hue + 180) % 360,
            saturation: saturation(red, green, blue),
            value: value(red, green, blue),
            chroma: chroma(red, green, blue),
        }
    }

    /// Build an unlabeled sample for classification.
    ///
    /// The label is [`ColorClass::FALLBACK`] and plays no part in
    /// classification.
    #[must_use]
    pub fn unlabeled(red: u8, green: u8, blue: u8) -> Self {
        Self::with_class(ColorClass::FALLBACK, red, green, blue)
    }

    /// Return the value of a split feature.
    #[must_use]
    pub fn feature(&self, feature: Feature) -> u32 {
        match feature {
            Feature::Red => u32::from(self.red),
            Feature::Green => u32::from(self.green),
            Feature::Blue => u32::from(self.blue),
            Feature::Hue => self.hue,
            Feature::Cohue => self.cohue,
            Feature::Saturation => self.saturation,
            Feature::Value => self.value,
            Feature::Chroma => self.chroma,
        }
    }

    #[must_use]
    pub fn label(&self) -> ColorClass {
        self.label
    }

    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Hue angle in `[0, 360)`; 0 for achromatic pixels.
    #[must_use]
    pub fn hue(&self) -> u32 {
        self.hue
    }

    /// Hue rotated by 180 degrees.
    #[must_use]
    pub fn cohue(&self) -> u32 {
        self.cohue
    }

    /// Saturation in `[0, 100]`.
    #[must_use]
    pub fn saturation(&self) -> u32 {
        self.saturation
    }

    /// Brightness in `[0, 99]`.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Population variance of the three channels, truncated.
    #[must_use]
    pub fn chroma(&self) -> u32 {
        self.chroma
    }
}

fn hue(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0;
    }
    let spread = max - min;
    // Integer division truncates toward zero before the offset is added.
    let h = if max == r {
        60 * (g - b) / spread + 360
    } else if max == g {
        60 * (b - r) / spread + 120
    } else {
        60 * (r - g) / spread + 240
    };
    (h % 360) as u32
}

fn saturation(r: u8, g: u8, b: u8) -> u32 {
    let max = u32::from(r.max(g).max(b));
    let min = u32::from(r.min(g).min(b));
    if max == 0 { 0 } else { 100 * (max - min) / max }
}

fn value(r: u8, g: u8, b: u8) -> u32 {
    u32::from(r.max(g).max(b)) * 100 / 256
}

fn chroma(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let mean = (r + g + b) / 3.0;
    let mean_sq = (r * r + g * g + b * b) / 3.0;
    // Saturating cast: rounding noise below zero becomes 0.
    (mean_sq - mean * mean) as u32
}
