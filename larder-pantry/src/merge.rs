//! Merge a newly added entry into an existing one

use larder_units::{restock, QuantityError};
use tracing::debug;
use crate::PantryEntry;

/// Fold `incoming` into `existing` when both describe the same ingredient.
///
/// Entries match on name and type. The incoming amount is converted into
/// the existing entry's unit before adding; the location follows the
/// incoming entry. Returns `Ok(None)` when the entries do not match.
pub fn merge(existing: &PantryEntry, incoming: &PantryEntry) -> Result<Option<PantryEntry>, QuantityError> {
    if existing.name != incoming.name || existing.kind != incoming.kind {
        return Ok(None);
    }

    let total = restock(&existing.stock(), &incoming.stock())?;
    debug!(name = %existing.name, %total, "merged pantry entries");

    Ok(Some(PantryEntry {
        quantity: total.value,
        unit: total.unit,
        location: incoming.location.clone(),
        ..existing.clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::Number;
    use larder_units::{Quantity, Unit};

    fn entry(name: &str, kind: &str, value: &str, unit: Unit, location: &str) -> PantryEntry {
        let stock = Quantity::new(Number::from_str(value).unwrap(), unit);
        PantryEntry::new(name, kind, stock, location).unwrap()
    }

    #[test]
    fn test_same_unit_sums() {
        let a = entry("eggs", "Dairy", "6", Unit::Count, "Fridge");
        let b = entry("eggs", "Dairy", "12", Unit::Count, "Pantry");
        let merged = merge(&a, &b).unwrap().unwrap();
        assert_eq!(merged.stock().to_string(), "18 unit");
        assert_eq!(merged.location, "Pantry");
    }

    #[test]
    fn test_different_units_convert_into_existing() {
        let a = entry("rice", "Carbohydrate", "1", Unit::Kilogram, "Cupboard");
        let b = entry("rice", "Carbohydrate", "500", Unit::Gram, "Cupboard");
        let merged = merge(&a, &b).unwrap().unwrap();
        assert_eq!(merged.stock().to_string(), "1.5 kg");
    }

    #[test]
    fn test_mismatched_entries_do_not_merge() {
        let a = entry("rice", "Carbohydrate", "1", Unit::Kilogram, "Cupboard");
        let b = entry("rice flour", "Carbohydrate", "1", Unit::Kilogram, "Cupboard");
        assert_eq!(merge(&a, &b).unwrap(), None);

        let c = entry("rice", "Other", "1", Unit::Kilogram, "Cupboard");
        assert_eq!(merge(&a, &c).unwrap(), None);
    }

    #[test]
    fn test_unmergeable_units_error() {
        let a = entry("onions", "Vegetable", "3", Unit::Count, "Pantry");
        let b = entry("onions", "Vegetable", "500", Unit::Gram, "Pantry");
        assert!(matches!(merge(&a, &b), Err(QuantityError::IncompatibleUnitKind { .. })));
    }
}
