//! Errors raised while reconciling or converting quantities

use larder_core::{codes, ErrorReport};
use thiserror::Error;
use crate::Unit;

/// Why a unit or unit pairing cannot be handled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unsupported {
    /// Symbol not in the catalog
    #[error("unknown unit: {0}")]
    Unknown(String),

    /// Pseudo-unit (`unit`, `pinch`) used where a measured unit is needed
    #[error("{0} is not a measured unit and cannot be converted")]
    NotConvertible(Unit),

    /// Mass/volume pairing the density bridge does not cover
    #[error("no conversion from {from} to {to}")]
    NoBridge { from: Unit, to: Unit },
}

/// Validation failures from the reconciler, converter and parser.
///
/// All are deterministic input errors: surface them and abort the save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("you can't store ingredients as {unit}")]
    InvalidStorageUnit { unit: Unit },

    #[error("can't combine counted items with measured amounts ({current} and {delta})")]
    IncompatibleUnitKind { current: Unit, delta: Unit },

    #[error(transparent)]
    UnsupportedUnit(#[from] Unsupported),

    #[error("invalid quantity: {0}")]
    InvalidValue(String),
}

impl QuantityError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            QuantityError::InvalidStorageUnit { .. } => codes::INVALID_STORAGE_UNIT,
            QuantityError::IncompatibleUnitKind { .. } => codes::INCOMPATIBLE_UNIT_KIND,
            QuantityError::UnsupportedUnit(_) => codes::UNSUPPORTED_UNIT,
            QuantityError::InvalidValue(_) => codes::INVALID_VALUE,
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            QuantityError::InvalidStorageUnit { .. } => "Store the ingredient in g, kg, ml, l, oz, lb or unit(s)",
            QuantityError::IncompatibleUnitKind { .. } => "Use unit(s) on both sides, or a measured unit on both sides",
            QuantityError::UnsupportedUnit(Unsupported::Unknown(_)) => "Pick one of the listed units",
            QuantityError::UnsupportedUnit(_) => "Re-enter the amount in the stored unit",
            QuantityError::InvalidValue(_) => "Enter a non-negative number such as 2 or 0.5",
        }
    }
}

impl From<QuantityError> for ErrorReport {
    fn from(err: QuantityError) -> Self {
        ErrorReport::new(err.code(), err.to_string()).with_suggestion(err.suggestion())
    }
}

impl From<larder_core::NumberError> for QuantityError {
    fn from(err: larder_core::NumberError) -> Self {
        QuantityError::InvalidValue(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = QuantityError::InvalidStorageUnit { unit: Unit::Tablespoon };
        assert_eq!(err.to_string(), "you can't store ingredients as tbsp");

        let err: QuantityError = Unsupported::NoBridge { from: Unit::Cup, to: Unit::Ounce }.into();
        assert_eq!(err.to_string(), "no conversion from cup to oz");
    }

    #[test]
    fn test_report_codes() {
        let report: ErrorReport = QuantityError::IncompatibleUnitKind {
            current: Unit::Gram,
            delta: Unit::Count,
        }
        .into();
        assert_eq!(report.code, codes::INCOMPATIBLE_UNIT_KIND);
        assert!(report.suggestion.is_some());

        let report: ErrorReport = QuantityError::from(Unsupported::Unknown("furlong".into())).into();
        assert_eq!(report.code, codes::UNSUPPORTED_UNIT);
        assert_eq!(report.message, "unknown unit: furlong");
    }
}
