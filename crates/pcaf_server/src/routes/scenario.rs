//! Climate scenario endpoints
//!
//! `POST /scenario/calculate` runs a stress scenario over a submitted
//! portfolio. A failed run is answered with 400 and the full
//! [`pcaf_scenario::ScenarioResult`] (with `success = false`) as body. A body
//! that does not parse is answered with the common error body.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use pcaf_scenario::{
    standard_sectors, PhysicalImpact, ScenarioEntry, ScenarioType, TransitionImpact,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::extract::ApiJson;

/// Scenario calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Portfolio lines to stress
    #[serde(default)]
    pub portfolio_entries: Vec<ScenarioEntry>,
    /// Scenario identifier, e.g. `transition_shock`
    pub scenario_type: String,
}

/// One entry of the scenario listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    /// Wire identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
}

/// One entry of the sector listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorInfo {
    /// Sector identifier accepted in portfolio entries
    pub id: String,
    /// Display name
    pub name: String,
    /// Transition impacts in percent
    pub transition: TransitionImpact,
    /// Physical impacts in percent
    pub physical: PhysicalImpact,
    /// Typical baseline loss in percent of exposure
    pub estimated_portfolio_loss: f64,
    /// Multiplier per scenario identifier
    pub multipliers: BTreeMap<String, f64>,
}

/// Build the scenario routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scenario/calculate", post(calculate_scenario))
        .route("/api/v1/scenarios", get(list_scenarios))
        .route("/api/v1/sectors", get(list_sectors))
}

/// POST /scenario/calculate - Stress a portfolio under one scenario
async fn calculate_scenario(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScenarioRequest>,
) -> impl IntoResponse {
    tracing::info!(
        scenario = %request.scenario_type,
        entries = request.portfolio_entries.len(),
        "calculating scenario"
    );

    let result = state
        .scenario
        .calculate_scenario(&request.portfolio_entries, &request.scenario_type);

    let status = if result.success {
        tracing::info!(
            scenario = %result.scenario_type,
            total_loss_increase_pct = result.total_loss_increase_percentage,
            "scenario calculation completed"
        );
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(result))
}

/// GET /api/v1/scenarios - Supported scenario types
async fn list_scenarios() -> Json<Vec<ScenarioInfo>> {
    Json(
        ScenarioType::ALL
            .iter()
            .map(|scenario| ScenarioInfo {
                id: scenario.as_str().to_string(),
                name: scenario.name().to_string(),
                description: scenario.description().to_string(),
            })
            .collect(),
    )
}

/// GET /api/v1/sectors - Sector profiles with the multipliers in use
async fn list_sectors(State(state): State<AppState>) -> Json<Vec<SectorInfo>> {
    let table = state.scenario.multipliers();
    Json(
        standard_sectors()
            .into_iter()
            .filter(|profile| table.contains_sector(&profile.id))
            .map(|profile| {
                let multipliers = ScenarioType::ALL
                    .iter()
                    .filter_map(|&scenario| {
                        table
                            .get(&profile.id, scenario)
                            .map(|m| (scenario.as_str().to_string(), m))
                    })
                    .collect();
                SectorInfo {
                    id: profile.id,
                    name: profile.name,
                    transition: profile.transition,
                    physical: profile.physical,
                    estimated_portfolio_loss: profile.estimated_portfolio_loss,
                    multipliers,
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_transition_shock_reference_portfolio() {
        let router = routes().with_state(create_test_state());
        let body = json!({
            "scenario_type": "transition_shock",
            "portfolio_entries": [
                {"sector": "manufacturing", "exposure": 10000.0, "baseline_loss": 100.0},
                {"sector": "steel_cement", "exposure": 20000.0, "baseline_loss": 200.0}
            ]
        });

        let (status, body) =
            read_json(router.oneshot(post_json("/scenario/calculate", &body)).await.unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_relative_eq!(body["entries"][0]["stressed_loss"].as_f64().unwrap(), 110.0, epsilon = 1e-9);
        assert_relative_eq!(body["entries"][1]["stressed_loss"].as_f64().unwrap(), 240.0, epsilon = 1e-9);
        assert_relative_eq!(
            body["total_loss_increase_percentage"].as_f64().unwrap(),
            50.0 / 3.0,
            epsilon = 1e-9
        );
    }

    #[tokio::test]
    async fn test_empty_portfolio_is_400_with_result_body() {
        let router = routes().with_state(create_test_state());
        let body = json!({"scenario_type": "dual_stress", "portfolio_entries": []});

        let (status, body) =
            read_json(router.oneshot(post_json("/scenario/calculate", &body)).await.unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Portfolio is empty");
    }

    #[tokio::test]
    async fn test_unknown_sector_is_400() {
        let router = routes().with_state(create_test_state());
        let body = json!({
            "scenario_type": "baseline",
            "portfolio_entries": [{"sector": "space_mining", "exposure": 1.0, "baseline_loss": 1.0}]
        });

        let (status, body) =
            read_json(router.oneshot(post_json("/scenario/calculate", &body)).await.unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("space_mining"));
    }

    #[tokio::test]
    async fn test_missing_scenario_type_uses_error_body() {
        let router = routes().with_state(create_test_state());
        let body = json!({"portfolio_entries": []});

        let (status, body) =
            read_json(router.oneshot(post_json("/scenario/calculate", &body)).await.unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "invalid_body");
        assert!(body["error"].as_str().unwrap().contains("scenario_type"));
    }

    #[tokio::test]
    async fn test_list_scenarios() {
        let router = routes().with_state(create_test_state());

        let (status, body) = read_json(router.oneshot(get_request("/api/v1/scenarios")).await.unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["baseline", "transition_shock", "physical_shock", "dual_stress"]);
    }

    #[tokio::test]
    async fn test_list_sectors_includes_multipliers() {
        let router = routes().with_state(create_test_state());

        let (status, body) = read_json(router.oneshot(get_request("/api/v1/sectors")).await.unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        let sectors = body.as_array().unwrap();
        assert_eq!(sectors.len(), 17);
        let steel = sectors.iter().find(|s| s["id"] == "steel_cement").unwrap();
        assert_relative_eq!(steel["multipliers"]["transition_shock"].as_f64().unwrap(), 1.2);
        assert_eq!(steel["multipliers"]["baseline"], 1.0);
    }
}
