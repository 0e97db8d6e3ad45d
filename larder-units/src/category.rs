//! Physical categories and measurement systems

use std::fmt;
use serde::{Serialize, Deserialize};

/// Physical dimension a unit measures.
///
/// Units convert by fixed linear factors inside a category. Across
/// categories only the approximate mass/volume bridge applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mass,
    Volume,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Mass => "mass",
            Category::Volume => "volume",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Measurement system a unit belongs to.
///
/// The simplifier never leaves the system of the stored unit:
/// half a pound becomes ounces, not grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureSystem {
    Metric,
    /// US customary (oz, lb, tsp, tbsp, cup)
    Imperial,
}

impl fmt::Display for MeasureSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureSystem::Metric => write!(f, "metric"),
            MeasureSystem::Imperial => write!(f, "imperial"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Category::Mass), "mass");
        assert_eq!(format!("{}", Category::Volume), "volume");
        assert_eq!(format!("{}", MeasureSystem::Imperial), "imperial");
    }
}
