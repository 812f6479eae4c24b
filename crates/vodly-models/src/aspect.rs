//! Aspect-ratio classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse aspect-ratio bucket for an uploaded video.
///
/// Derived from the display aspect ratio reported by the prober and used
/// as the leading path segment of the object-storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectClass {
    Landscape,
    Portrait,
    Other,
}

impl AspectClass {
    /// Classify a display-aspect-ratio string.
    ///
    /// Only the two canonical ratios map to a named bucket; anything else,
    /// including empty or garbled values, falls into `Other`.
    pub fn from_ratio(ratio: &str) -> Self {
        match ratio {
            "16:9" => Self::Landscape,
            "9:16" => Self::Portrait,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ratios() {
        assert_eq!(AspectClass::from_ratio("16:9"), AspectClass::Landscape);
        assert_eq!(AspectClass::from_ratio("9:16"), AspectClass::Portrait);
    }

    #[test]
    fn everything_else_is_other() {
        for ratio in ["4:3", "1:1", "21:9", "16:10", "", "garbage", "9:16 ", "16x9"] {
            assert_eq!(AspectClass::from_ratio(ratio), AspectClass::Other, "{ratio:?}");
        }
    }

    #[test]
    fn display_matches_key_prefix() {
        assert_eq!(AspectClass::Landscape.to_string(), "landscape");
        assert_eq!(AspectClass::Portrait.to_string(), "portrait");
        assert_eq!(AspectClass::Other.to_string(), "other");
    }
}
