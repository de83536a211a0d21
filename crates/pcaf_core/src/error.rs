//! Error types for the calculation engine.
//!
//! This module provides structured error types using `thiserror`:
//! - `CalculationError`: Errors surfaced by [`crate::CalculationEngine::calculate`]
//! - `ValidationError`: Caller inputs that do not satisfy a formula's schema
//! - `RegistryError`: Inconsistent formula definitions rejected at build time

use thiserror::Error;

/// Errors raised while validating caller-supplied inputs.
///
/// Every variant names the offending field so that the transport layer can
/// report it back verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required input was absent (or explicitly null).
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name as declared by the formula.
        field: String,
    },

    /// An input could not be coerced to a number.
    #[error("Field '{field}' must be numeric, got {found}")]
    NotNumeric {
        /// Field name.
        field: String,
        /// Short description of the rejected value.
        found: String,
    },

    /// An input was NaN or infinite.
    #[error("Field '{field}' must be a finite number")]
    NonFinite {
        /// Field name.
        field: String,
    },

    /// An input fell outside its declared range.
    #[error("Field '{field}' value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        /// Field name.
        field: String,
        /// Rejected value.
        value: f64,
        /// Lower bound (inclusive), rendered as `-inf` when open.
        min: f64,
        /// Upper bound (inclusive), rendered as `inf` when open.
        max: f64,
    },

    /// Company type string was not recognised.
    #[error("Unknown company type: {0}. Must be one of: listed, unlisted, private")]
    UnknownCompanyType(String),
}

impl ValidationError {
    /// Name of the field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::NotNumeric { field, .. }
            | ValidationError::NonFinite { field }
            | ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::UnknownCompanyType(_) => None,
        }
    }
}

/// Errors surfaced by the calculation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// No formula is registered under the requested id.
    #[error("Formula not found: {0}")]
    NotFound(String),

    /// Inputs failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The attribution denominator was zero or negative.
    #[error("Invalid denominator: '{field}' must be greater than zero, got {value}")]
    InvalidDenominator {
        /// Denominator field name.
        field: String,
        /// Rejected value.
        value: f64,
    },
}

impl CalculationError {
    /// Whether the error was caused by caller-supplied data rather than an
    /// unknown formula id.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalculationError::Validation(_) | CalculationError::InvalidDenominator { .. }
        )
    }
}

/// Errors raised when assembling a formula registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two definitions share an id.
    #[error("Duplicate formula ID: {0}")]
    DuplicateFormula(String),

    /// A definition declares the same input twice.
    #[error("Duplicate input '{field}' in formula {formula}")]
    DuplicateInput {
        /// Formula id.
        formula: String,
        /// Repeated field.
        field: String,
    },

    /// A computation strategy references a field the definition never declares.
    #[error("Formula {formula} uses undeclared field '{field}'")]
    UndeclaredField {
        /// Formula id.
        formula: String,
        /// Missing field.
        field: String,
    },

    /// Data quality scores are restricted to 1..=5.
    #[error("Formula {formula} has invalid data quality score {score}")]
    InvalidDataQualityScore {
        /// Formula id.
        formula: String,
        /// Rejected score.
        score: u8,
    },

    /// Input range with min greater than max.
    #[error("Formula {formula} declares an empty range for '{field}'")]
    InvalidRange {
        /// Formula id.
        formula: String,
        /// Field with the inverted range.
        field: String,
    },
}
