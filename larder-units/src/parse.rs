//! Parse unit symbols and quantity strings like "2 tbsp" or "1/2 cup"

use larder_core::Number;
use crate::{Quantity, QuantityError, Unit, Unsupported, CATALOG};

/// Parse a unit symbol, name or alias ("g", "Tbs", "litres")
pub fn parse_unit(s: &str) -> Result<Unit, QuantityError> {
    CATALOG
        .lookup(s)
        .ok_or_else(|| Unsupported::Unknown(s.trim().to_string()).into())
}

/// Parse a quantity string
///
/// Supported formats:
/// - With unit: "2 tbsp", "2tbsp", "1.5 kg"
/// - Simple fractions: "1/2 cup"
/// - Bare numbers count items: "3" is 3 unit(s)
pub fn parse_quantity(s: &str) -> Result<Quantity, QuantityError> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
        .unwrap_or(s.len());
    let (number_part, unit_part) = s.split_at(split);

    if number_part.is_empty() {
        return Err(QuantityError::InvalidValue(format!("no amount in '{}'", s)));
    }

    let value = parse_amount(number_part)?;
    let unit = match unit_part.trim() {
        "" => Unit::Count,
        symbol => parse_unit(symbol)?,
    };

    Quantity::try_new(value, unit)
}

fn parse_amount(s: &str) -> Result<Number, QuantityError> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num = Number::from_str(num)?;
            let den = Number::from_str(den)?;
            Ok(num.checked_div(&den)?)
        }
        None => Ok(Number::from_str(s)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("kg").unwrap(), Unit::Kilogram);
        assert_eq!(parse_unit("Tbs").unwrap(), Unit::Tablespoon);
        assert!(matches!(
            parse_unit("furlong"),
            Err(QuantityError::UnsupportedUnit(Unsupported::Unknown(ref s))) if s == "furlong"
        ));
    }

    #[test]
    fn test_unit_from_str() {
        let unit: Unit = "cups".parse().unwrap();
        assert_eq!(unit, Unit::Cup);
    }

    #[test]
    fn test_parse_quantity_with_unit() {
        assert_eq!(parse_quantity("2 tbsp").unwrap(), Quantity::new(num("2"), Unit::Tablespoon));
        assert_eq!(parse_quantity("2tbsp").unwrap(), Quantity::new(num("2"), Unit::Tablespoon));
        assert_eq!(parse_quantity(" 1.5 kg ").unwrap(), Quantity::new(num("1.5"), Unit::Kilogram));
    }

    #[test]
    fn test_parse_quantity_fraction() {
        assert_eq!(parse_quantity("1/2 cup").unwrap(), Quantity::new(num("0.5"), Unit::Cup));
        assert!(matches!(parse_quantity("1/0 cup"), Err(QuantityError::InvalidValue(_))));
    }

    #[test]
    fn test_bare_number_counts_items() {
        assert_eq!(parse_quantity("3").unwrap(), Quantity::new(num("3"), Unit::Count));
    }

    #[test]
    fn test_parse_quantity_errors() {
        assert!(matches!(parse_quantity("-2 g"), Err(QuantityError::InvalidValue(_))));
        assert!(matches!(parse_quantity("some flour"), Err(QuantityError::InvalidValue(_))));
        assert!(matches!(parse_quantity("1..2 g"), Err(QuantityError::InvalidValue(_))));
        assert!(matches!(parse_quantity("2 handfuls"), Err(QuantityError::UnsupportedUnit(_))));
    }
}
