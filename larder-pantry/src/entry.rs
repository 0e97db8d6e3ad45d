//! Pantry entry record

use serde::{Deserialize, Serialize};
use larder_core::Number;
use larder_units::{reduce, Quantity, QuantityError, Unit, CATALOG};
use tracing::info;

/// One ingredient held in the pantry, as persisted per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct PantryEntry {
    pub name: String,
    /// Ingredient type, e.g. "Vegetable", "Dairy"
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: Number,
    pub unit: Unit,
    /// Where it is kept, e.g. "Fridge"
    pub location: String,
    #[serde(default)]
    pub shop: String,
}

/// Stored document shape, checked by `PantryEntry::new` on load
#[derive(Deserialize)]
struct StoredEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    quantity: Number,
    unit: Unit,
    location: String,
    #[serde(default)]
    shop: String,
}

impl TryFrom<StoredEntry> for PantryEntry {
    type Error = QuantityError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let stock = Quantity::try_new(stored.quantity, stored.unit)?;
        Ok(PantryEntry::new(stored.name, stored.kind, stock, stored.location)?.with_shop(stored.shop))
    }
}

/// What to persist after a reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReductionOutcome {
    /// Stock left; save the updated entry
    Remaining(PantryEntry),
    /// Nothing left; delete the entry
    Depleted,
}

impl PantryEntry {
    /// Create an entry, rejecting negative stock and units that cannot be stored
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        stock: Quantity,
        location: impl Into<String>,
    ) -> Result<Self, QuantityError> {
        if stock.value.is_negative() {
            return Err(QuantityError::InvalidValue(format!("{} is negative", stock)));
        }
        if !CATALOG.is_storage_unit(stock.unit) {
            return Err(QuantityError::InvalidStorageUnit { unit: stock.unit });
        }
        Ok(Self {
            name: name.into(),
            kind: kind.into(),
            quantity: stock.value,
            unit: stock.unit,
            location: location.into(),
            shop: String::new(),
        })
    }

    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = shop.into();
        self
    }

    /// Current stock as a quantity
    pub fn stock(&self) -> Quantity {
        Quantity::new(self.quantity.clone(), self.unit)
    }

    /// Record that `used` was consumed from this entry
    pub fn apply_reduction(&self, used: &Quantity) -> Result<ReductionOutcome, QuantityError> {
        let remaining = reduce(&self.stock(), used)?;

        if remaining.is_zero() {
            info!(name = %self.name, %used, "pantry entry used up");
            return Ok(ReductionOutcome::Depleted);
        }

        Ok(ReductionOutcome::Remaining(Self {
            quantity: remaining.value,
            unit: remaining.unit,
            ..self.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(value: &str, unit: Unit) -> Quantity {
        Quantity::new(Number::from_str(value).unwrap(), unit)
    }

    fn flour() -> PantryEntry {
        PantryEntry::new("flour", "Carbohydrate", q("500", Unit::Gram), "Cupboard")
            .unwrap()
            .with_shop("Lidl")
    }

    #[test]
    fn test_new_rejects_non_storage_unit() {
        assert!(matches!(
            PantryEntry::new("sugar", "Other", q("2", Unit::Cup), "Pantry"),
            Err(QuantityError::InvalidStorageUnit { unit: Unit::Cup })
        ));
    }

    #[test]
    fn test_reduction_keeps_other_fields() {
        let outcome = flour().apply_reduction(&q("2", Unit::Tablespoon)).unwrap();
        let ReductionOutcome::Remaining(entry) = outcome else {
            panic!("expected stock to remain");
        };
        assert_eq!(entry.stock().to_string(), "470.43 g");
        assert_eq!(entry.name, "flour");
        assert_eq!(entry.location, "Cupboard");
        assert_eq!(entry.shop, "Lidl");
    }

    #[test]
    fn test_reduction_can_change_unit() {
        let milk = PantryEntry::new("milk", "Dairy", q("1", Unit::Litre), "Fridge").unwrap();
        let outcome = milk.apply_reduction(&q("750", Unit::Millilitre)).unwrap();
        let ReductionOutcome::Remaining(entry) = outcome else {
            panic!("expected stock to remain");
        };
        assert_eq!(entry.stock(), q("250", Unit::Millilitre));
    }

    #[test]
    fn test_using_everything_depletes() {
        assert_eq!(flour().apply_reduction(&q("1", Unit::Kilogram)).unwrap(), ReductionOutcome::Depleted);
        assert_eq!(flour().apply_reduction(&q("500", Unit::Gram)).unwrap(), ReductionOutcome::Depleted);
    }

    #[test]
    fn test_reduction_errors_propagate() {
        assert!(matches!(
            flour().apply_reduction(&q("2", Unit::Count)),
            Err(QuantityError::IncompatibleUnitKind { .. })
        ));
    }

    #[test]
    fn test_serde_matches_stored_document() {
        let json = serde_json::to_value(flour()).unwrap();
        assert_eq!(json["type"], "Carbohydrate");
        assert_eq!(json["unit"], "g");
        assert_eq!(json["quantity"], "500");

        let doc = r#"{"name":"rice","type":"Carbohydrate","quantity":"2","unit":"kg","location":"Pantry"}"#;
        let entry: PantryEntry = serde_json::from_str(doc).unwrap();
        assert_eq!(entry.stock(), q("2", Unit::Kilogram));
        assert_eq!(entry.shop, "");
    }

    #[test]
    fn test_new_rejects_negative_stock() {
        assert!(matches!(
            PantryEntry::new("flour", "Carbohydrate", q("-5", Unit::Gram), "Cupboard"),
            Err(QuantityError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_stored_document_is_validated() {
        let negative = r#"{"name":"flour","type":"Carbohydrate","quantity":"-5","unit":"g","location":"Cupboard"}"#;
        let err = serde_json::from_str::<PantryEntry>(negative).unwrap_err();
        assert!(err.to_string().contains("negative"));

        let cups = r#"{"name":"sugar","type":"Other","quantity":"2","unit":"cup","location":"Pantry"}"#;
        let err = serde_json::from_str::<PantryEntry>(cups).unwrap_err();
        assert!(err.to_string().contains("you can't store ingredients as cup"));
    }
}
