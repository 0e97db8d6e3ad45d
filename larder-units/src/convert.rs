//! Unit conversion, within a category and across the density bridge

use larder_core::Number;
use tracing::debug;
use crate::{Category, Quantity, QuantityError, Unit, Unsupported, CATALOG};

/// Convert `value` from one unit to another, for rescaling a form field
/// when the user switches units.
///
/// Identical units return the value untouched. Pseudo-units (`unit`,
/// `pinch`) fail with `UnsupportedUnit`; showing a blank field instead is
/// the caller's choice. No rounding is applied.
pub fn convert(value: &Number, from: Unit, to: Unit) -> Result<Quantity, QuantityError> {
    let converted = convert_value(value, from, to)?;
    debug!(%value, %from, %to, result = %converted, "converted quantity");
    Ok(Quantity::new(converted, to))
}

/// Rescale a raw value between units
pub(crate) fn convert_value(value: &Number, from: Unit, to: Unit) -> Result<Number, QuantityError> {
    if from == to {
        return Ok(value.clone());
    }

    let from_category = CATALOG
        .category_of(from)
        .ok_or(Unsupported::NotConvertible(from))?;
    let to_category = CATALOG
        .category_of(to)
        .ok_or(Unsupported::NotConvertible(to))?;

    // value * from_factor gives base units (g or ml) of the source category
    let mut base = value.mul(&CATALOG.factor_to_base(from)?);

    if from_category != to_category {
        base = bridge(&base, from, to, from_category)?;
    }

    Ok(base.checked_div(&CATALOG.factor_to_base(to)?)?)
}

/// Move base units across the mass/volume bridge.
///
/// Only pairings whose mass side is g or kg are covered; cups to ounces
/// has no defined path.
fn bridge(base: &Number, from: Unit, to: Unit, from_category: Category) -> Result<Number, QuantityError> {
    let mass_side = match from_category {
        Category::Mass => from,
        Category::Volume => to,
    };
    if !CATALOG.is_bridge_anchor(mass_side) {
        return Err(Unsupported::NoBridge { from, to }.into());
    }

    let density = CATALOG.bridge_density();
    debug!(%from, %to, density = %density, "approximating across the density bridge");

    match from_category {
        // grams -> millilitres
        Category::Mass => Ok(base.checked_div(&density)?),
        // millilitres -> grams
        Category::Volume => Ok(base.mul(&density)),
    }
}
