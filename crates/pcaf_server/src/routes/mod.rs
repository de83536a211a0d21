//! Route modules for the PCAF server
//!
//! This module contains endpoint group-specific routers:
//! - health: Health check and readiness endpoints
//! - formulas: Formula catalogue browsing
//! - emissions: Financed and facilitated emission calculation
//! - scenario: Climate stress scenarios

pub mod emissions;
pub mod formulas;
pub mod health;
pub mod scenario;

use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderValue, Request};
use axum::Router;
use pcaf_core::{CalculationEngine, RegistryError};
use pcaf_scenario::{ParallelConfig, ScenarioEngine};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Emission calculation engine
    pub calculation: Arc<CalculationEngine>,
    /// Climate scenario engine
    pub scenario: Arc<ScenarioEngine>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the standard formula catalogue and
    /// sector multipliers
    pub fn new(config: Arc<ServerConfig>) -> Result<Self, RegistryError> {
        let calculation = CalculationEngine::standard()?;
        let scenario = ScenarioEngine::standard()
            .with_parallel_config(ParallelConfig::new(config.scenario_parallel_threshold));
        Ok(Self::with_engines(config, calculation, scenario))
    }

    /// Create an AppState around existing engines
    pub fn with_engines(
        config: Arc<ServerConfig>,
        calculation: CalculationEngine,
        scenario: ScenarioEngine,
    ) -> Self {
        Self {
            config,
            calculation: Arc::new(calculation),
            scenario: Arc::new(scenario),
            start_time: Instant::now(),
        }
    }
}

/// Generates `x-request-id` values from random UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        .merge(health::routes())
        .merge(formulas::routes())
        .merge(emissions::routes())
        .merge(scenario::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = build_router(create_test_state());

        for uri in ["/health", "/ready", "/api/v1/formulas", "/api/v1/scenarios", "/api/v1/sectors"] {
            let response = router.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let response = router
            .clone()
            .oneshot(post_json(
                "/scenario/calculate",
                &json!({"portfolio_entries": [], "scenario_type": "baseline"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = build_router(create_test_state());
        let response = router.oneshot(get_request("/unknown/path")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let router = build_router(create_test_state());
        let response = router.oneshot(get_request("/health")).await.unwrap();
        let id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_caller_request_id_is_kept() {
        let router = build_router(create_test_state());
        let request = Request::builder()
            .uri("/ready")
            .header("x-request-id", "trace-123")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "trace-123");
    }

    #[test]
    fn test_app_state_uses_configured_threshold() {
        let config = ServerConfig {
            scenario_parallel_threshold: 42,
            ..Default::default()
        };
        let state = AppState::new(Arc::new(config)).unwrap();
        assert_eq!(state.scenario.parallel_config().parallel_threshold, 42);
        assert!(!state.calculation.list_formulas().is_empty());
    }
}
