//! Result simplification - pick a readable unit for a reconciled amount

use larder_core::Number;
use crate::convert::convert_value;
use crate::{Quantity, Unit, CATALOG};

/// Decimal places every simplified value is rounded to
const DISPLAY_PLACES: u32 = 2;

/// Re-express `value` in a friendlier unit and round it to hundredths.
///
/// Only fractions strictly between 0 and 1 move: they switch to the
/// smaller storage unit of the same category and system giving the
/// smallest value that is still at least 1 (0.5 kg -> 500 g,
/// 0.5 lb -> 8 oz). Everything else keeps its unit. Never fails.
pub fn simplify(value: &Number, unit: Unit) -> Quantity {
    let one = Number::one();
    let (value, unit) = if !value.is_zero() && !value.is_negative() && *value < one {
        smaller_unit(value, unit).unwrap_or_else(|| (value.clone(), unit))
    } else {
        (value.clone(), unit)
    };
    Quantity::new(value.round_dp(DISPLAY_PLACES), unit)
}

fn smaller_unit(value: &Number, unit: Unit) -> Option<(Number, Unit)> {
    let factor = CATALOG.factor_to_base(unit).ok()?;
    let one = Number::one();

    CATALOG
        .siblings(unit)
        .into_iter()
        .filter(|&sibling| {
            CATALOG
                .factor_to_base(sibling)
                .is_ok_and(|sibling_factor| sibling_factor < factor)
        })
        .filter_map(|sibling| {
            convert_value(value, unit, sibling)
                .ok()
                .map(|converted| (converted, sibling))
        })
        .filter(|(converted, _)| *converted >= one)
        .min_by(|a, b| a.0.cmp(&b.0))
}
