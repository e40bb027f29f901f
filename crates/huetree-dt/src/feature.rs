use std::fmt;
use std::str::FromStr;

/// A derived numeric axis a branch can split on.
///
/// The declaration order is the order the split search scans features in,
/// which decides ties between equal-cost candidates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub enum Feature {
    Red,
    Green,
    Blue,
    Hue,
    Cohue,
    Saturation,
    Value,
    Chroma,
}

impl Feature {
    /// Number of features.
    pub const COUNT: usize = 8;

    /// Every feature, in scan order.
    pub const ALL: [Feature; Self::COUNT] = [
        Feature::Red,
        Feature::Green,
        Feature::Blue,
        Feature::Hue,
        Feature::Cohue,
        Feature::Saturation,
        Feature::Value,
        Feature::Chroma,
    ];

    /// Return the zero-based scan position.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Return the name used in rendered trees.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Feature::Red => "red",
            Feature::Green => "green",
            Feature::Blue => "blue",
            Feature::Hue => "hue",
            Feature::Cohue => "cohue",
            Feature::Saturation => "saturation",
            Feature::Value => "value",
            Feature::Chroma => "chroma",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no feature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature \"{0}\"")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    /// Accepts the rendered names plus the short forms `sat`, `val`, `chrome`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sat" => Ok(Feature::Saturation),
            "val" => Ok(Feature::Value),
            "chrome" | "uvmag" => Ok(Feature::Chroma),
            other => Feature::ALL
                .iter()
                .copied()
                .find(|f| f.name() == other)
                .ok_or_else(|| UnknownFeature(other.to_string())),
        }
    }
}
