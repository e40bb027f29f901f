//! The closed palette of color classes a sample can be labeled with.

use std::fmt;

use tracing::warn;

/// One of the eleven canonical color names.
///
/// The declaration order is the class index used for frequency counting
/// and must not be changed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum ColorClass {
    Black,
    Blue,
    Brown,
    Gray,
    Green,
    Orange,
    Pink,
    Purple,
    Red,
    White,
    Yellow,
}

impl ColorClass {
    /// Number of classes in the palette.
    pub const COUNT: usize = 11;

    /// Every class, in index order.
    pub const ALL: [ColorClass; Self::COUNT] = [
        ColorClass::Black,
        ColorClass::Blue,
        ColorClass::Brown,
        ColorClass::Gray,
        ColorClass::Green,
        ColorClass::Orange,
        ColorClass::Pink,
        ColorClass::Purple,
        ColorClass::Red,
        ColorClass::White,
        ColorClass::Yellow,
    ];

    /// Class substituted for unknown labels and used for empty leaves.
    pub const FALLBACK: ColorClass = ColorClass::Gray;

    /// Return the zero-based palette index.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Return the lowercase color name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorClass::Black => "black",
            ColorClass::Blue => "blue",
            ColorClass::Brown => "brown",
            ColorClass::Gray => "gray",
            ColorClass::Green => "green",
            ColorClass::Orange => "orange",
            ColorClass::Pink => "pink",
            ColorClass::Purple => "purple",
            ColorClass::Red => "red",
            ColorClass::White => "white",
            ColorClass::Yellow => "yellow",
        }
    }

    /// Look up a class by its exact lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Look up a class by name, substituting [`ColorClass::FALLBACK`] for
    /// anything outside the palette.
    ///
    /// Emits a warning when the fallback is used; never fails.
    #[must_use]
    pub fn from_name_or_fallback(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(label = name, fallback = %Self::FALLBACK, "unknown color label");
            Self::FALLBACK
        })
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
