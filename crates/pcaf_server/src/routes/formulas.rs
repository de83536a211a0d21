//! Formula catalogue endpoints

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use pcaf_core::{FormulaCategory, FormulaDefinition};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// Query parameters for the formula listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormulaQuery {
    /// Restrict to one category (`financed_emission` or `facilitated_emission`)
    pub category: Option<String>,
}

/// Formula listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaListResponse {
    /// Number of formulas returned
    pub count: usize,
    /// Formula definitions in registration order
    pub formulas: Vec<FormulaDefinition>,
}

/// Formula selection request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestFormulaRequest {
    /// Category to choose from
    pub category: String,
    /// Input names the caller has data for
    #[serde(default)]
    pub available_inputs: Vec<String>,
}

/// Formula selection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestFormulaResponse {
    /// Best fitting formula, if any
    pub formula: Option<FormulaDefinition>,
}

/// Build the formula routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/formulas", get(list_formulas))
        .route("/api/v1/formulas/best", post(best_formula))
        .route("/api/v1/formulas/{id}", get(get_formula))
}

/// GET /api/v1/formulas - List registered formulas
async fn list_formulas(
    State(state): State<AppState>,
    Query(query): Query<FormulaQuery>,
) -> Result<Json<FormulaListResponse>, ApiError> {
    let registry = state.calculation.registry();
    let formulas: Vec<FormulaDefinition> = match query.category.as_deref() {
        Some(raw) => {
            let category: FormulaCategory = raw.parse().map_err(ApiError::BadRequest)?;
            registry.by_category(category).cloned().collect()
        }
        None => registry.all().to_vec(),
    };

    Ok(Json(FormulaListResponse {
        count: formulas.len(),
        formulas,
    }))
}

/// GET /api/v1/formulas/{id} - Single formula definition
async fn get_formula(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormulaDefinition>, ApiError> {
    Ok(Json(state.calculation.formula(&id)?.clone()))
}

/// POST /api/v1/formulas/best - Highest-quality formula the caller can run
async fn best_formula(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BestFormulaRequest>,
) -> Result<Json<BestFormulaResponse>, ApiError> {
    let category: FormulaCategory = request.category.parse().map_err(ApiError::BadRequest)?;
    let formula = state
        .calculation
        .best_formula(request.available_inputs.iter().map(String::as_str), category)
        .cloned();

    Ok(Json(BestFormulaResponse { formula }))
}
