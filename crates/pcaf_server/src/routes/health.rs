//! Health check endpoints
//!
//! Provides health and readiness endpoints for load balancer integration
//! and service availability monitoring.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Server version
    pub version: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Deployment environment
    pub environment: String,
    /// Engine status
    pub engines: EngineStatus,
}

/// Loaded engine contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Registered formulas
    pub formula_count: usize,
    /// Sectors with stress multipliers
    pub sector_count: usize,
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Ready status
    pub ready: bool,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        environment: state.config.environment.to_string(),
        engines: EngineStatus {
            formula_count: state.calculation.list_formulas().len(),
            sector_count: state.scenario.multipliers().sectors().len(),
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready - Readiness endpoint
///
/// Engines are built before the router, so a serving process is ready.
async fn ready_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(ReadyResponse { ready: true }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint_returns_json() {
        let router = routes().with_state(create_test_state());

        let response = router.oneshot(get_request("/health")).await.unwrap();
        let (status, body) = read_json(response).await;
        let health: HealthResponse = serde_json::from_value(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, crate::VERSION);
        assert_eq!(health.environment, "development");
        assert_eq!(health.engines.formula_count, 35);
        assert_eq!(health.engines.sector_count, 17);
    }

    #[tokio::test]
    async fn test_health_uses_snake_case() {
        let router = routes().with_state(create_test_state());

        let response = router.oneshot(get_request("/health")).await.unwrap();
        let (_, body) = read_json(response).await;

        assert!(body.get("uptime_secs").is_some());
        assert!(body["engines"].get("formula_count").is_some());
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let router = routes().with_state(create_test_state());

        let response = router.oneshot(get_request("/ready")).await.unwrap();
        let (status, body) = read_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
    }
}
