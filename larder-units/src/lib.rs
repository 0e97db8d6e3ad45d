//! Larder Units - Pantry quantities and unit reconciliation
//!
//! Lets a pantry record "used 2 tbsp" against stock held in grams.
//!
//! Responsibilities:
//! - Unit catalog: categories, conversion factors, storage rules
//! - Reconciler: `reduce` / `restock` a stored quantity by a delta in any unit
//! - Simplifier: pick a readable unit for small results (0.5 kg -> 500 g)
//! - Conversion: `convert` for rescaling when the user switches units
//!
//! Categories:
//! - Mass (g, kg, oz, lb)
//! - Volume (ml, l, tsp, tbsp, cup)
//! - Uncategorized pseudo-units: `unit` (counted items), `pinch`
//!
//! Mass and volume meet only through an approximate bridge
//! (1 g per ml, see [`catalog::BRIDGE_DENSITY_G_PER_ML`]).

mod category;
mod unit;
mod error;
mod quantity;
mod convert;
mod reconcile;
mod simplify;
mod parse;
pub mod catalog;

pub use category::{Category, MeasureSystem};
pub use unit::Unit;
pub use error::{QuantityError, Unsupported};
pub use quantity::Quantity;
pub use catalog::{UnitOption, CATALOG};
pub use convert::convert;
pub use reconcile::{reduce, restock, Adjustment};
pub use simplify::simplify;
pub use parse::{parse_unit, parse_quantity};
