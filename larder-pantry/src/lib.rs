//! Larder Pantry - stock records on top of the unit engine
//!
//! The persistence layer hands over plain `PantryEntry` records; this crate
//! applies reductions and merges duplicates and hands records back to save.

mod entry;
mod merge;

pub use entry::{PantryEntry, ReductionOutcome};
pub use merge::merge;
