//! Quantity reconciliation - apply a consumed or restocked amount to stored stock

use larder_core::Number;
use tracing::debug;
use crate::convert::convert_value;
use crate::{simplify, Quantity, QuantityError, Unit, CATALOG};

/// Direction of a stock change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Used up some of the stock
    Consume,
    /// Bought or added more
    Restock,
}

impl Adjustment {
    /// Apply `delta` to `current`; the result never drops below zero
    fn apply(&self, current: &Number, delta: &Number) -> Number {
        let raw = match self {
            Adjustment::Consume => current.sub(delta),
            Adjustment::Restock => current.add(delta),
        };
        raw.clamp_non_negative()
    }
}

/// Subtract `delta` from the stored `current` quantity.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. `current` must be in a storage unit
/// 2. counted units (`unit`) cannot mix with measured ones
/// 3. identical units subtract directly, exact and unrounded
/// 4. otherwise `delta` is converted into `current.unit`, subtracted and
///    the result simplified
///
/// Running out is normal: results below zero clamp to zero and the caller
/// decides whether an empty entry is deleted.
pub fn reduce(current: &Quantity, delta: &Quantity) -> Result<Quantity, QuantityError> {
    reconcile(current, delta, Adjustment::Consume)
}

/// Add `delta` to the stored `current` quantity, with the same rules as [`reduce`]
pub fn restock(current: &Quantity, delta: &Quantity) -> Result<Quantity, QuantityError> {
    reconcile(current, delta, Adjustment::Restock)
}

fn reconcile(current: &Quantity, delta: &Quantity, adjustment: Adjustment) -> Result<Quantity, QuantityError> {
    if !CATALOG.is_storage_unit(current.unit) {
        return Err(QuantityError::InvalidStorageUnit { unit: current.unit });
    }

    if (current.unit == Unit::Count) != (delta.unit == Unit::Count) {
        return Err(QuantityError::IncompatibleUnitKind {
            current: current.unit,
            delta: delta.unit,
        });
    }

    if current.unit == delta.unit {
        let value = adjustment.apply(&current.value, &delta.value);
        debug!(?adjustment, %current, %delta, result = %value, "reconciled in matching units");
        return Ok(Quantity::new(value, current.unit));
    }

    let converted = convert_value(&delta.value, delta.unit, current.unit)?;
    let value = adjustment.apply(&current.value, &converted);
    let result = simplify(&value, current.unit);
    debug!(?adjustment, %current, %delta, converted = %converted, %result, "reconciled across units");
    Ok(result)
}
