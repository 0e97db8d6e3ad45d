//! Arbitrary precision numbers using dashu
//!
//! Quantities are stored as dashu-float decimals (DBig) so that
//! subtracting "0.1 kg" from "0.3 kg" gives exactly 0.2 and rounding
//! to hundredths never trips over binary float artifacts.

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Not a finite number: {0}")]
    NonFinite(String),
}

/// Working precision for calculations (decimal digits)
const WORK_PRECISION: usize = 50;

/// Arbitrary precision decimal number
///
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig carries the working precision.
    /// Integers come out of dashu with unlimited precision, which division rejects.
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION).value()
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "-42", "1.5e3"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }

        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self { inner: Self::with_work_precision(inner) })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create `significand * 10^exponent`, e.g. `from_parts(28349523125, -9)`
    /// is 28.349523125. Exact and infallible, for constants.
    pub fn from_parts(significand: i64, exponent: isize) -> Self {
        Self { inner: Self::with_work_precision(DBig::from_parts(IBig::from(significand), exponent)) }
    }

    /// Create from f64 using its shortest round-trip decimal form,
    /// so `0.1` becomes exactly one tenth rather than its binary neighbour.
    pub fn from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NonFinite(f.to_string()));
        }
        // `{}` on f64 never uses exponent notation
        Self::from_str(&format!("{}", f))
    }

    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    pub fn one() -> Self {
        Self::from_i64(1)
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -&self.inner }
    }

    /// Clamp negative values to zero
    pub fn clamp_non_negative(&self) -> Self {
        if self.is_negative() { Self::zero() } else { self.clone() }
    }

    // ========== Rounding ==========

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        Self { inner: self.inner.clone().floor() }
    }

    /// Round to `places` decimal digits, ties away from zero.
    ///
    /// `round_dp(2)` turns 470.4264704375 into 470.43 and 0.125 into 0.13.
    pub fn round_dp(&self, places: u32) -> Self {
        let scale = Self::from_parts(1, places as isize);
        let half = Self::from_parts(5, -1);

        let magnitude = if self.is_negative() { self.neg() } else { self.clone() };
        let shifted = magnitude.mul(&scale).add(&half).floor();
        let rounded = shifted.checked_div(&scale).unwrap_or(shifted);

        if self.is_negative() { rounded.neg() } else { rounded }
    }

    // ========== Conversion ==========

    /// Exact plain decimal text, no exponent and no trailing zeros:
    /// "470.43", "500", "0.0004", "12345678901234567890"
    fn to_plain_string(&self) -> String {
        // DBig stores significand * 10^exponent
        let (significand, exponent): (IBig, isize) = self.inner.clone().into_repr().into_parts();
        let text = significand.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        if digits == "0" {
            return "0".to_string();
        }

        let trimmed = digits.trim_end_matches('0');
        let exponent = exponent + (digits.len() - trimmed.len()) as isize;

        if exponent >= 0 {
            return format!("{}{}{}", sign, trimmed, "0".repeat(exponent as usize));
        }

        let fraction_len = exponent.unsigned_abs();
        if trimmed.len() > fraction_len {
            let (whole, fraction) = trimmed.split_at(trimmed.len() - fraction_len);
            format!("{}{}.{}", sign, whole, fraction)
        } else {
            format!("{}0.{}{}", sign, "0".repeat(fraction_len - trimmed.len()), trimmed)
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_from_str_decimal() {
        let n = num("3.14");
        assert_eq!(n.to_string(), "3.14");
    }

    #[test]
    fn test_display_is_exact_decimal() {
        assert_eq!(num("500").to_string(), "500");
        assert_eq!(num("1.5e3").to_string(), "1500");
        assert_eq!(num("0.0004").to_string(), "0.0004");
        assert_eq!(num("-2.50").to_string(), "-2.5");
        assert_eq!(Number::zero().to_string(), "0");
        assert_eq!(num("12345678901234567891").to_string(), "12345678901234567891");
        assert_eq!(num("0.30000000000000001").to_string(), "0.30000000000000001");
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Number::from_parts(28349523125, -9), num("28.349523125"));
        assert_eq!(Number::from_parts(1, 3), num("1000"));
        assert_eq!(Number::from_parts(-5, -1), num("-0.5"));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(Number::from_str("abc").is_err());
        assert!(Number::from_str("").is_err());
    }

    #[test]
    fn test_from_f64_uses_shortest_repr() {
        let n = Number::from_f64(0.1).unwrap();
        assert_eq!(n, num("0.1"));
        assert!(Number::from_f64(f64::NAN).is_err());
        assert!(Number::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_decimal_subtraction_is_exact() {
        let diff = num("0.3").sub(&num("0.1"));
        assert_eq!(diff, num("0.2"));
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(num("1000").checked_div(&num("4")).unwrap(), num("250"));
        assert_eq!(num("1").checked_div(&Number::zero()), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_round_dp_half_away_from_zero() {
        assert_eq!(num("470.4264704375").round_dp(2).to_string(), "470.43");
        assert_eq!(num("0.125").round_dp(2).to_string(), "0.13");
        assert_eq!(num("-0.125").round_dp(2).to_string(), "-0.13");
        assert_eq!(num("0.124").round_dp(2).to_string(), "0.12");
        assert_eq!(num("0.004").round_dp(2).to_string(), "0");
        assert_eq!(num("1.2").round_dp(2).to_string(), "1.2");
    }

    #[test]
    fn test_round_dp_many_places() {
        let n = num("0.123456789012345678901234");
        assert_eq!(n.round_dp(20).to_string(), "0.1234567890123456789");
        assert_eq!(num("2.5").round_dp(30), num("2.5"));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(num("-3").clamp_non_negative(), Number::zero());
        assert_eq!(num("3").clamp_non_negative(), num("3"));
    }

    #[test]
    fn test_ordering() {
        assert!(num("0.5") < Number::one());
        assert!(num("1.2") > Number::one());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&num("2.5")).unwrap();
        assert_eq!(json, "\"2.5\"");
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, num("2.5"));
    }

    #[test]
    fn test_serde_keeps_every_digit() {
        let big = num("12345678901234567891").sub(&Number::one());
        let json = serde_json::to_string(&big).unwrap();
        assert_eq!(json, "\"12345678901234567890\"");
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);

        let small = num("0.30000000000000001").sub(&num("0.1"));
        let json = serde_json::to_string(&small).unwrap();
        assert_eq!(json, "\"0.20000000000000001\"");
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, small);
    }
}
