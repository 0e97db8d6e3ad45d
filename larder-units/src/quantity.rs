//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use larder_core::Number;
use crate::{QuantityError, Unit, CATALOG};

/// An amount of an ingredient: a numeric value in a unit.
///
/// Transient value type. The reconciler never mutates one; it returns
/// the quantity the caller should persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuantity")]
pub struct Quantity {
    /// The numeric value
    pub value: Number,
    /// The unit of measurement
    pub unit: Unit,
}

/// Wire shape, validated into a `Quantity`
#[derive(Deserialize)]
struct RawQuantity {
    value: Number,
    unit: Unit,
}

impl TryFrom<RawQuantity> for Quantity {
    type Error = QuantityError;

    fn try_from(raw: RawQuantity) -> Result<Self, Self::Error> {
        Quantity::try_new(raw.value, raw.unit)
    }
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a quantity, rejecting negative values
    pub fn try_new(value: Number, unit: Unit) -> Result<Self, QuantityError> {
        if value.is_negative() {
            return Err(QuantityError::InvalidValue(format!("{} is negative", value)));
        }
        Ok(Quantity { value, unit })
    }

    /// Create from a float as typed into a form field
    pub fn from_f64(value: f64, unit: Unit) -> Result<Self, QuantityError> {
        Self::try_new(Number::from_f64(value)?, unit)
    }

    pub fn zero(unit: Unit) -> Self {
        Quantity::new(Number::zero(), unit)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Whether this quantity may be persisted as-is
    pub fn is_storable(&self) -> bool {
        CATALOG.is_storage_unit(self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}
