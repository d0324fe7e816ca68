//! Structured errors
//!
//! Dimensional errors are contract violations found from the operands'
//! shapes alone. They are returned before any value is produced, as values
//! carrying a machine-readable code and a suggestion for the caller.

use crate::RatioError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const REFERENCE_MISMATCH: &str = "REFERENCE_MISMATCH";
    pub const NARROWING: &str = "NARROWING";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const NOT_COMPARABLE: &str = "NOT_COMPARABLE";
    // Declaration-time error codes
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_DIMENSION: &str = "UNKNOWN_DIMENSION";
    pub const INVALID_DECLARATION: &str = "INVALID_DECLARATION";
    pub const INVALID_EXPONENT: &str = "INVALID_EXPONENT";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
}

/// Structured error for dimensional and numeric failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantaError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

impl QuantaError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            notes: Vec::new(),
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn dimension_mismatch(op: &str, left: impl std::fmt::Display, right: impl std::fmt::Display) -> Self {
        Self::new(codes::DIMENSION_MISMATCH,
            format!("{}: incompatible dimensions {} and {}", op, left, right))
            .with_suggestion("Only quantities of the same dimension can be combined this way")
    }

    pub fn reference_mismatch(op: &str, left: impl std::fmt::Display, right: impl std::fmt::Display) -> Self {
        Self::new(codes::REFERENCE_MISMATCH,
            format!("{}: {} and {} share base dimension names but use different reference units", op, left, right))
            .with_suggestion("Use cast_to to bridge unit systems explicitly")
    }

    pub fn narrowing(from: &str, to: &str, factor: impl std::fmt::Display) -> Self {
        Self::new(codes::NARROWING,
            format!("Converting {} to {} (factor {}) would lose precision", from, to, factor))
            .with_suggestion("Use cast_to for an explicit, truncating conversion or a floating representation")
    }

    pub fn overflow(details: impl Into<String>) -> Self {
        Self::new(codes::OVERFLOW, format!("Overflow: {}", details.into()))
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
            .with_suggestion("Ensure divisor is not zero")
    }

    pub fn out_of_range(value: impl std::fmt::Display, target: &str) -> Self {
        Self::new(codes::OUT_OF_RANGE, format!("Value {} does not fit {}", value, target))
    }

    pub fn not_comparable(details: impl Into<String>) -> Self {
        Self::new(codes::NOT_COMPARABLE, format!("Not comparable: {}", details.into()))
    }

    pub fn duplicate(kind: &str, name: &str) -> Self {
        Self::new(codes::DUPLICATE, format!("{} '{}' is already declared", kind, name))
    }

    pub fn unknown_unit(symbol: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", symbol))
    }

    pub fn unknown_dimension(name: &str) -> Self {
        Self::new(codes::UNKNOWN_DIMENSION, format!("Unknown dimension: {}", name))
    }

    pub fn invalid_declaration(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_DECLARATION, format!("Invalid declaration: {}", details.into()))
    }

    pub fn invalid_exponent(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_EXPONENT, format!("Invalid exponent: {}", details.into()))
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }
}

impl std::fmt::Display for QuantaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuantaError {}

impl From<RatioError> for QuantaError {
    fn from(err: RatioError) -> Self {
        match err {
            RatioError::ParseError(s) => Self::parse_error(s),
            RatioError::DivisionByZero => Self::div_zero(),
            RatioError::Overflow => Self::overflow("numeric result too large"),
            RatioError::NotFinite(v) => Self::overflow(format!("non-finite value {}", v)),
        }
    }
}
