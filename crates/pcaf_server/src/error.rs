//! API error responses
//!
//! Maps engine errors onto HTTP status codes with a JSON body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pcaf_core::CalculationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub error: String,
}

/// Errors surfaced by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Engine rejected the calculation
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Formula exists but belongs to the other emission category
    #[error("Formula '{formula_id}' is a {actual} formula, expected {expected}")]
    CategoryMismatch {
        /// Requested formula
        formula_id: String,
        /// Category served by the endpoint
        expected: String,
        /// Category of the formula
        actual: String,
    },

    /// Malformed query or body parameter
    #[error("{0}")]
    BadRequest(String),

    /// Request body is not valid JSON for the endpoint
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Calculation(CalculationError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Calculation(_) => StatusCode::BAD_REQUEST,
            ApiError::CategoryMismatch { .. }
            | ApiError::BadRequest(_)
            | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Calculation(CalculationError::NotFound(_)) => "formula_not_found",
            ApiError::Calculation(CalculationError::Validation(_)) => "validation_error",
            ApiError::Calculation(CalculationError::InvalidDenominator { .. }) => {
                "invalid_denominator"
            }
            ApiError::CategoryMismatch { .. } => "category_mismatch",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::InvalidBody(_) => "invalid_body",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), code = self.code(), error = %self, "request rejected");
        let body = ErrorResponse {
            success: false,
            code: self.code().to_string(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcaf_core::ValidationError;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(CalculationError::NotFound("x".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "formula_not_found");
        assert_eq!(err.to_string(), "Formula not found: x");
    }

    #[test]
    fn test_input_errors_map_to_400() {
        let err = ApiError::from(CalculationError::Validation(ValidationError::MissingField {
            field: "evic".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "validation_error");

        let err = ApiError::from(CalculationError::InvalidDenominator {
            field: "evic".to_string(),
            value: 0.0,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_denominator");
    }

    #[test]
    fn test_category_mismatch_message() {
        let err = ApiError::CategoryMismatch {
            formula_id: "1a-listed-equity".to_string(),
            expected: "facilitated_emission".to_string(),
            actual: "financed_emission".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Formula '1a-listed-equity' is a financed_emission formula, expected facilitated_emission"
        );
    }
}
