//! Financed and facilitated emission endpoints
//!
//! Both endpoints accept `{formula_id, company_type, inputs}` and return the
//! engine's [`CalculationResult`] wrapped in an [`EmissionResponse`] together
//! with its [`CalculationSummary`]. Each endpoint only serves formulas of its
//! own category.

use axum::{extract::State, response::Json, routing::post, Router};
use pcaf_core::{CalculationRequest, CalculationResult, CalculationSummary, FormulaCategory};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// Successful emission calculation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionResponse {
    /// Always true; failures use [`crate::error::ErrorResponse`]
    pub success: bool,
    /// Calculation result with audit trail
    pub result: Option<CalculationResult>,
    /// Quality label and recommendations for the result
    pub summary: Option<CalculationSummary>,
    /// Unused on success
    pub error: Option<String>,
    /// Persisted calculation id; results are not persisted
    pub calculation_id: Option<String>,
}

/// Build the emission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/finance-emission", post(finance_emission))
        .route("/facilitated-emission", post(facilitated_emission))
}

/// POST /finance-emission - Financed emissions for one exposure
async fn finance_emission(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Json<EmissionResponse>, ApiError> {
    calculate(&state, request, FormulaCategory::FinancedEmission)
}

/// POST /facilitated-emission - Facilitated emissions for one issuance
async fn facilitated_emission(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CalculationRequest>,
) -> Result<Json<EmissionResponse>, ApiError> {
    calculate(&state, request, FormulaCategory::FacilitatedEmission)
}

fn calculate(
    state: &AppState,
    request: CalculationRequest,
    category: FormulaCategory,
) -> Result<Json<EmissionResponse>, ApiError> {
    tracing::info!(
        formula_id = %request.formula_id,
        company_type = %request.company_type.as_str(),
        category = %category,
        "calculating emissions"
    );

    let formula = state.calculation.formula(&request.formula_id)?;
    if formula.category != category {
        return Err(ApiError::CategoryMismatch {
            formula_id: request.formula_id,
            expected: category.to_string(),
            actual: formula.category.to_string(),
        });
    }

    let result = state
        .calculation
        .calculate(&request.formula_id, &request.inputs, request.company_type)?;

    tracing::info!(
        formula_id = %request.formula_id,
        financed_emissions = result.financed_emissions,
        data_quality_score = result.data_quality_score,
        warnings = result.metadata.validation_warnings.len(),
        "emission calculation completed"
    );

    let summary = state.calculation.summary(&result);
    Ok(Json(EmissionResponse {
        success: true,
        result: Some(result),
        summary: Some(summary),
        error: None,
        calculation_id: None,
    }))
}
