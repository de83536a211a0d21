//! Calculation pipeline.
//!
//! - [`validator`]: Raw input coercion and schema checks
//! - [`attribution`]: Attribution factor resolution
//! - [`emission`]: Emission quantity resolution and audit trail
//! - [`result`]: Output types
//! - [`summary`]: Quality label and recommendations for a result
//! - [`engine`]: Orchestrator and batch evaluation

pub mod attribution;
pub mod emission;
pub mod engine;
pub mod result;
pub mod summary;
pub mod validator;

pub use attribution::{resolve_attribution, Attribution, DenominatorDerivation};
pub use emission::{resolve_emissions, EmissionOutcome};
pub use engine::{CalculationEngine, CalculationRequest};
pub use result::{CalculationMetadata, CalculationResult, CalculationStep};
pub use summary::{data_quality_label, summarize, CalculationSummary, KeyMetrics};
pub use validator::{plausibility_warnings, validate, RawInputs, ValidatedInputs};
