//! REST API server for the PCAF emission and climate scenario engines
//!
//! This crate exposes the formula catalogue, financed and facilitated
//! emission calculation, and sector-multiplier stress scenarios over HTTP.
//!
//! ## Endpoints
//!
//! | Method | Path                      | Purpose                        |
//! |--------|---------------------------|--------------------------------|
//! | GET    | `/health`, `/ready`       | Liveness and readiness         |
//! | GET    | `/api/v1/formulas`        | Formula catalogue              |
//! | GET    | `/api/v1/formulas/{id}`   | One formula definition         |
//! | POST   | `/api/v1/formulas/best`   | Best formula for given inputs  |
//! | POST   | `/finance-emission`       | Financed emissions             |
//! | POST   | `/facilitated-emission`   | Facilitated emissions          |
//! | POST   | `/scenario/calculate`     | Climate stress scenario        |
//! | GET    | `/api/v1/scenarios`       | Scenario types                 |
//! | GET    | `/api/v1/sectors`         | Sector profiles and multipliers|

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

// Re-export engine dependencies for integration
pub use pcaf_core;
pub use pcaf_scenario;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
