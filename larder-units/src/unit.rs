//! The closed set of units a pantry quantity can carry

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use crate::QuantityError;

/// A recognized unit symbol.
///
/// `Count` ("unit") and `Pinch` are pseudo-units: they belong to no
/// category and never convert to anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Millilitre,
    Litre,
    Teaspoon,
    Tablespoon,
    Cup,
    /// Discrete countable items ("3 eggs")
    Count,
    /// Unmeasurable small amount
    Pinch,
}

impl Unit {
    pub const ALL: [Unit; 11] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Ounce,
        Unit::Pound,
        Unit::Millilitre,
        Unit::Litre,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::Cup,
        Unit::Count,
        Unit::Pinch,
    ];

    /// Canonical symbol, as persisted
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::Count => "unit",
            Unit::Pinch => "pinch",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
            Unit::Ounce => "ounce",
            Unit::Pound => "pound",
            Unit::Millilitre => "millilitre",
            Unit::Litre => "litre",
            Unit::Teaspoon => "teaspoon",
            Unit::Tablespoon => "tablespoon",
            Unit::Cup => "cup",
            Unit::Count => "unit",
            Unit::Pinch => "pinch",
        }
    }

    /// Label shown in unit dropdowns
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Litre => "L",
            Unit::Count => "unit(s)",
            other => other.symbol(),
        }
    }

    /// Pseudo-units have no category and cannot be converted
    pub fn is_pseudo(&self) -> bool {
        matches!(self, Unit::Count | Unit::Pinch)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_unit(s)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_unique() {
        let mut symbols: Vec<_> = Unit::ALL.iter().map(|u| u.symbol()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), Unit::ALL.len());
    }

    #[test]
    fn test_pseudo_units() {
        assert!(Unit::Count.is_pseudo());
        assert!(Unit::Pinch.is_pseudo());
        assert!(!Unit::Gram.is_pseudo());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Unit::Litre.label(), "L");
        assert_eq!(Unit::Count.label(), "unit(s)");
        assert_eq!(Unit::Tablespoon.label(), "tbsp");
    }

    #[test]
    fn test_serde_uses_symbol_and_accepts_aliases() {
        assert_eq!(serde_json::to_string(&Unit::Tablespoon).unwrap(), "\"tbsp\"");
        let legacy: Unit = serde_json::from_str("\"Tbs\"").unwrap();
        assert_eq!(legacy, Unit::Tablespoon);
        let litre: Unit = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(litre, Unit::Litre);
        assert!(serde_json::from_str::<Unit>("\"furlong\"").is_err());
    }
}
