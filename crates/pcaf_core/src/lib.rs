//! # PCAF Core
//!
//! Formula-driven calculation engine for financed and facilitated emissions.
//!
//! This crate provides:
//! - A typed input-field vocabulary and formula definitions
//! - The standard catalogue across corporate, real estate, vehicle,
//!   project finance, sovereign and facilitated asset classes
//! - An immutable, validated formula registry
//! - Input validation, attribution and emission resolution
//! - An auditable [`CalculationResult`] with a step-by-step trail
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               pcaf_core                 │
//! ├─────────────────────────────────────────┤
//! │  formula/     - InputField, Definition, │
//! │                 Catalogue, Registry     │
//! │  calculation/ - Validator, Attribution, │
//! │                 Emission, Engine        │
//! │  error        - thiserror enums         │
//! └─────────────────────────────────────────┘
//!          ↑
//! ┌─────────────────────────────────────────┐
//! │              pcaf_server                │
//! │  axum transport over CalculationEngine  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pcaf_core::{CalculationEngine, CompanyType};
//! use serde_json::json;
//!
//! let engine = CalculationEngine::standard().unwrap();
//! let inputs = json!({
//!     "outstanding_amount": 500_000.0,
//!     "evic": 1_000_000.0,
//!     "energy_consumption": 10_000.0,
//!     "emission_factor": 0.3
//! });
//! let result = engine
//!     .calculate("2a-listed-equity", inputs.as_object().unwrap(), CompanyType::Listed)
//!     .unwrap();
//! assert!((result.financed_emissions - 1500.0).abs() < 1e-9);
//! assert_eq!(result.data_quality_score, 3);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod error;
pub mod formula;

pub use calculation::{
    CalculationEngine, CalculationMetadata, CalculationRequest, CalculationResult,
    CalculationStep, CalculationSummary, KeyMetrics, RawInputs, ValidatedInputs,
};
pub use error::{CalculationError, RegistryError, ValidationError};
pub use formula::{
    AssetClass, CompanyType, ComputationMode, FormulaCategory, FormulaDefinition,
    FormulaRegistry, InputField, InputSpec, OptionCode, ScopeType,
};
