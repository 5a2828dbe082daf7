//! # Error Types
//!
//! Structured error types for calc_core. Calculators turn these into
//! readable messages inside their own result area; the shell layers
//! (loader, reveal, currency) log them and keep going.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_total(total: f64) -> CalcResult<()> {
//!     if total <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "total",
//!             total.to_string(),
//!             "Total time must be greater than zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for the calculator suite.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not a number, out of its domain, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A computed value left the representable range
    #[error("Result out of range: {quantity} - {reason}")]
    OutOfRange { quantity: String, reason: String },

    /// No calculator registered under this category/subcategory/id
    #[error("Calculator not found: {category}/{subcategory}/{id}")]
    CalculatorNotFound {
        category: String,
        subcategory: String,
        id: String,
    },

    /// Two calculators registered with the same id
    #[error("Duplicate calculator id: {id}")]
    DuplicateCalculator { id: String },

    /// Calculator added to a subcategory that was never declared
    #[error("Unknown subcategory '{subcategory}' in category '{category}'")]
    UnknownSubcategory { category: String, subcategory: String },

    /// A document element could not be located
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    /// Markup could not be parsed
    #[error("Markup error at offset {offset}: {reason}")]
    Markup { offset: usize, reason: String },

    /// Math typesetting failed
    #[error("Typesetting failed: {reason}")]
    Typeset { reason: String },

    /// Network request failed or returned an unusable body
    #[error("Network error: {url} - {reason}")]
    Network { url: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField { field: field.into() }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::OutOfRange {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an ElementNotFound error
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        CalcError::ElementNotFound { selector: selector.into() }
    }

    /// Create a Markup error
    pub fn markup(offset: usize, reason: impl Into<String>) -> Self {
        CalcError::Markup {
            offset,
            reason: reason.into(),
        }
    }

    /// Create a Typeset error
    pub fn typeset(reason: impl Into<String>) -> Self {
        CalcError::Typeset { reason: reason.into() }
    }

    /// Create a Network error
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Message suitable for a calculator's result area.
    ///
    /// Validation errors show only their reason; everything else shows
    /// the full display string.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { reason, .. } => reason.clone(),
            CalcError::OutOfRange { reason, .. } => reason.clone(),
            CalcError::MissingField { .. } => "Please enter valid numbers".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::Network { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::CalculatorNotFound { .. } => "CALCULATOR_NOT_FOUND",
            CalcError::DuplicateCalculator { .. } => "DUPLICATE_CALCULATOR",
            CalcError::UnknownSubcategory { .. } => "UNKNOWN_SUBCATEGORY",
            CalcError::ElementNotFound { .. } => "ELEMENT_NOT_FOUND",
            CalcError::Markup { .. } => "MARKUP_ERROR",
            CalcError::Typeset { .. } => "TYPESET_ERROR",
            CalcError::Network { .. } => "NETWORK_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
