//! Structured error reports
//!
//! Domain errors stay typed inside the library crates. When they have to
//! leave the process (tool server responses, UI toasts) they are flattened
//! into an `ErrorReport`: a stable code, a message and an optional hint.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const INVALID_STORAGE_UNIT: &str = "INVALID_STORAGE_UNIT";
    pub const INCOMPATIBLE_UNIT_KIND: &str = "INCOMPATIBLE_UNIT_KIND";
    pub const UNSUPPORTED_UNIT: &str = "UNSUPPORTED_UNIT";
}

/// Flattened error for callers outside the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    /// Create a new report
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl From<NumberError> for ErrorReport {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::new(codes::PARSE_ERROR, format!("Parse error: {}", s))
                .with_suggestion("Enter a plain decimal number such as 2 or 0.5"),
            NumberError::DivisionByZero => Self::new(codes::DIV_ZERO, "Division by zero"),
            NumberError::NonFinite(s) => Self::new(codes::INVALID_VALUE, format!("Not a finite number: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_suggestion() {
        let report = ErrorReport::new(codes::UNSUPPORTED_UNIT, "cannot convert unit to g")
            .with_suggestion("pick a measured unit");
        assert_eq!(
            report.to_string(),
            "[UNSUPPORTED_UNIT] cannot convert unit to g (suggestion: pick a measured unit)"
        );
    }

    #[test]
    fn test_from_number_error() {
        let report: ErrorReport = NumberError::ParseError("abc".into()).into();
        assert_eq!(report.code, codes::PARSE_ERROR);
        assert!(report.suggestion.is_some());
    }

    #[test]
    fn test_serialize_skips_missing_suggestion() {
        let json = serde_json::to_value(ErrorReport::new(codes::DIV_ZERO, "Division by zero")).unwrap();
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["code"], "DIV_ZERO");
    }
}
