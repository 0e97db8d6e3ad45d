//! Larder Core - Fundamental types
//!
//! This crate provides the core types used throughout Larder:
//! - `Number`: Arbitrary precision decimal numbers
//! - `ErrorReport`: Structured errors for callers outside the process

mod number;
mod error;

pub use number::{Number, NumberError};
pub use error::{ErrorReport, codes};
