//! Unit catalog - categories, conversion factors and storage rules
//!
//! Built once on first use and read-only afterwards, so any number of
//! callers may query it concurrently.

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use larder_core::Number;
use tracing::trace;
use crate::{Category, MeasureSystem, QuantityError, Unit, Unsupported};

/// Global unit catalog
pub static CATALOG: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::new);

/// Assumed density, in grams per millilitre, for the mass/volume bridge.
///
/// This is water. It is wrong for flour, sugar or honey, and is only an
/// estimate that lets "1 cup" reduce stock kept in grams. A per-ingredient
/// density table would replace this constant.
pub const BRIDGE_DENSITY_G_PER_ML: i64 = 1;

/// Mass units the bridge is anchored on. A mass/volume pairing is only
/// converted when its mass side is one of these (g <-> ml, kg <-> l).
pub const BRIDGE_MASS_ANCHORS: [Unit; 2] = [Unit::Gram, Unit::Kilogram];

/// Everything the catalog knows about one unit
#[derive(Debug, Clone)]
pub struct UnitEntry {
    pub unit: Unit,
    pub category: Option<Category>,
    pub system: Option<MeasureSystem>,
    /// How many base units (g or ml) one of this unit is
    pub factor_to_base: Option<Number>,
    /// May be used as the persisted unit of a pantry entry
    pub storage: bool,
}

/// A unit offered in a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOption {
    pub value: Unit,
    pub label: &'static str,
}

/// Registry of all known units
pub struct UnitCatalog {
    entries: HashMap<Unit, UnitEntry>,
    aliases: HashMap<String, Unit>,
}

impl UnitCatalog {
    fn new() -> Self {
        let mut catalog = UnitCatalog {
            entries: HashMap::new(),
            aliases: HashMap::new(),
        };
        catalog.register_mass_units();
        catalog.register_volume_units();
        catalog.register_pseudo_units();
        catalog
    }

    /// Category of a unit; `None` for the pseudo-units
    pub fn category_of(&self, unit: Unit) -> Option<Category> {
        self.entries.get(&unit).and_then(|e| e.category)
    }

    pub fn system_of(&self, unit: Unit) -> Option<MeasureSystem> {
        self.entries.get(&unit).and_then(|e| e.system)
    }

    /// Base units (g or ml) per one of `unit`
    pub fn factor_to_base(&self, unit: Unit) -> Result<Number, QuantityError> {
        self.entries
            .get(&unit)
            .and_then(|e| e.factor_to_base.clone())
            .ok_or(QuantityError::UnsupportedUnit(Unsupported::NotConvertible(unit)))
    }

    pub fn is_storage_unit(&self, unit: Unit) -> bool {
        self.entries.get(&unit).is_some_and(|e| e.storage)
    }

    pub fn entry(&self, unit: Unit) -> Option<&UnitEntry> {
        self.entries.get(&unit)
    }

    /// Resolve a symbol or alias.
    ///
    /// Canonical symbols and registered aliases match exactly first,
    /// then case-insensitively ("Tbs", "TBSP", "Grams").
    pub fn lookup(&self, symbol: &str) -> Option<Unit> {
        let symbol = symbol.trim();
        let found = self
            .aliases
            .get(symbol)
            .or_else(|| self.aliases.get(&symbol.to_lowercase()))
            .copied();
        trace!(symbol, unit = ?found, "unit lookup");
        found
    }

    /// Storage units in the same category and measurement system, excluding `unit`
    pub fn siblings(&self, unit: Unit) -> Vec<Unit> {
        let (Some(category), Some(system)) = (self.category_of(unit), self.system_of(unit)) else {
            return Vec::new();
        };
        Unit::ALL
            .iter()
            .copied()
            .filter(|&u| u != unit)
            .filter(|&u| self.is_storage_unit(u))
            .filter(|&u| self.category_of(u) == Some(category) && self.system_of(u) == Some(system))
            .collect()
    }

    /// Units a pantry entry may be stored in, in dropdown order
    pub fn storage_units(&self) -> Vec<UnitOption> {
        Unit::ALL
            .iter()
            .copied()
            .filter(|&u| self.is_storage_unit(u))
            .map(|u| UnitOption { value: u, label: u.label() })
            .collect()
    }

    /// Units accepted as the amount of a reduction: storage units plus kitchen measures
    pub fn input_units(&self) -> Vec<UnitOption> {
        let mut options = self.storage_units();
        options.extend(
            [Unit::Tablespoon, Unit::Teaspoon, Unit::Cup]
                .into_iter()
                .map(|u| UnitOption { value: u, label: u.label() }),
        );
        options
    }

    /// Whether the bridge covers a pairing of `mass_side` with any volume unit
    pub fn is_bridge_anchor(&self, mass_side: Unit) -> bool {
        BRIDGE_MASS_ANCHORS.contains(&mass_side)
    }

    /// Bridge density as a number
    pub fn bridge_density(&self) -> Number {
        Number::from_i64(BRIDGE_DENSITY_G_PER_ML)
    }

    fn register(&mut self, unit: Unit, category: Option<Category>, system: Option<MeasureSystem>, factor_to_base: Option<Number>, storage: bool) {
        self.entries.insert(unit, UnitEntry { unit, category, system, factor_to_base, storage });
        self.alias(unit.symbol(), unit);
        self.alias(unit.name(), unit);
    }

    fn alias(&mut self, alias: &str, unit: Unit) {
        self.aliases.insert(alias.to_string(), unit);
        self.aliases.insert(alias.to_lowercase(), unit);
    }

    fn register_mass_units(&mut self) {
        let mass = Some(Category::Mass);
        let metric = Some(MeasureSystem::Metric);
        let imperial = Some(MeasureSystem::Imperial);

        self.register(Unit::Gram, mass, metric, Some(Number::one()), true);
        self.register(Unit::Kilogram, mass, metric, Some(Number::from_parts(1, 3)), true);
        // International avoirdupois: 28.349523125 g, 453.59237 g
        self.register(Unit::Ounce, mass, imperial, Some(Number::from_parts(28_349_523_125, -9)), true);
        self.register(Unit::Pound, mass, imperial, Some(Number::from_parts(45_359_237, -5)), true);

        self.alias("grams", Unit::Gram);
        self.alias("gr", Unit::Gram);
        self.alias("kilograms", Unit::Kilogram);
        self.alias("kilo", Unit::Kilogram);
        self.alias("kilos", Unit::Kilogram);
        self.alias("ounces", Unit::Ounce);
        self.alias("pounds", Unit::Pound);
        self.alias("lbs", Unit::Pound);
    }

    fn register_volume_units(&mut self) {
        let volume = Some(Category::Volume);
        let metric = Some(MeasureSystem::Metric);
        let imperial = Some(MeasureSystem::Imperial);

        self.register(Unit::Millilitre, volume, metric, Some(Number::one()), true);
        self.register(Unit::Litre, volume, metric, Some(Number::from_parts(1, 3)), true);
        // US customary, from the US fluid ounce (29.5735295625 ml):
        // tsp 4.92892159375 ml, tbsp 14.78676478125 ml, cup 236.5882365 ml
        self.register(Unit::Teaspoon, volume, imperial, Some(Number::from_parts(492_892_159_375, -11)), false);
        self.register(Unit::Tablespoon, volume, imperial, Some(Number::from_parts(1_478_676_478_125, -11)), false);
        self.register(Unit::Cup, volume, imperial, Some(Number::from_parts(2_365_882_365, -7)), false);

        self.alias("millilitres", Unit::Millilitre);
        self.alias("milliliter", Unit::Millilitre);
        self.alias("milliliters", Unit::Millilitre);
        self.alias("mL", Unit::Millilitre);
        self.alias("L", Unit::Litre);
        self.alias("litres", Unit::Litre);
        self.alias("liter", Unit::Litre);
        self.alias("liters", Unit::Litre);
        self.alias("teaspoons", Unit::Teaspoon);
        self.alias("Tbs", Unit::Tablespoon);
        self.alias("tablespoons", Unit::Tablespoon);
        self.alias("cups", Unit::Cup);
    }

    fn register_pseudo_units(&mut self) {
        self.register(Unit::Count, None, None, None, true);
        self.register(Unit::Pinch, None, None, None, false);

        self.alias("units", Unit::Count);
        self.alias("unit(s)", Unit::Count);
        self.alias("pcs", Unit::Count);
        self.alias("pinches", Unit::Pinch);
    }
}
