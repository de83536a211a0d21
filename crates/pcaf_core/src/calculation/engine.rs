//! Calculation engine orchestrating lookup, validation, attribution and
//! emission resolution.
//!
//! ```text
//! calculate(formula_id, inputs, company_type)
//!   │
//!   ├─ FormulaRegistry::get       → NotFound
//!   ├─ validate                   → Validation
//!   ├─ resolve_attribution        → Validation | InvalidDenominator
//!   ├─ resolve_emissions
//!   ├─ plausibility_warnings      (non-fatal, into metadata)
//!   └─ CalculationResult
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalculationError, RegistryError};
use crate::formula::{CompanyType, FormulaCategory, FormulaDefinition, FormulaRegistry};

use super::attribution::resolve_attribution;
use super::emission::resolve_emissions;
use super::result::{CalculationMetadata, CalculationResult};
use super::summary::{summarize, CalculationSummary};
use super::validator::{plausibility_warnings, validate, RawInputs};

/// One calculation request, as submitted to [`CalculationEngine::calculate_batch`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Formula id.
    pub formula_id: String,
    /// Company type; defaults to listed.
    #[serde(default)]
    pub company_type: CompanyType,
    /// Raw inputs keyed by field name.
    #[serde(default)]
    pub inputs: RawInputs,
}

/// Stateless calculation engine over a shared formula registry.
///
/// Cloning is cheap; clones share the registry.
///
/// # Example
///
/// ```
/// use pcaf_core::{CalculationEngine, CompanyType};
/// use serde_json::json;
///
/// let engine = CalculationEngine::standard().unwrap();
/// let inputs = json!({
///     "outstanding_amount": 1_000_000.0,
///     "evic": 5_000_000.0,
///     "verified_emissions": 1000.0
/// });
/// let result = engine
///     .calculate("1a-listed-equity", inputs.as_object().unwrap(), CompanyType::Listed)
///     .unwrap();
/// assert_eq!(result.financed_emissions, 200.0);
/// ```
#[derive(Clone, Debug)]
pub struct CalculationEngine {
    registry: Arc<FormulaRegistry>,
}

impl CalculationEngine {
    /// Creates an engine over an existing registry.
    pub fn new(registry: Arc<FormulaRegistry>) -> Self {
        Self { registry }
    }

    /// Creates an engine over the standard catalogue.
    pub fn standard() -> Result<Self, RegistryError> {
        Ok(Self::new(Arc::new(FormulaRegistry::standard()?)))
    }

    /// Underlying registry.
    #[inline]
    pub fn registry(&self) -> &FormulaRegistry {
        &self.registry
    }

    /// All formulas in registration order.
    #[inline]
    pub fn list_formulas(&self) -> &[FormulaDefinition] {
        self.registry.all()
    }

    /// Looks up a single formula.
    pub fn formula(&self, formula_id: &str) -> Result<&FormulaDefinition, CalculationError> {
        self.registry.get(formula_id)
    }

    /// Runs one calculation.
    ///
    /// Pure and deterministic: identical arguments yield identical results.
    ///
    /// # Errors
    ///
    /// - [`CalculationError::NotFound`] for an unknown formula id
    /// - [`CalculationError::Validation`] when inputs do not satisfy the schema
    /// - [`CalculationError::InvalidDenominator`] when the denominator is `<= 0`
    pub fn calculate(
        &self,
        formula_id: &str,
        inputs: &RawInputs,
        company_type: CompanyType,
    ) -> Result<CalculationResult, CalculationError> {
        let definition = self.registry.get(formula_id)?;
        let validated = validate(definition, inputs)?;
        let attribution = resolve_attribution(definition, &validated, company_type)?;
        let outcome = resolve_emissions(definition, &validated, &attribution)?;
        let validation_warnings = plausibility_warnings(definition, &validated);
        if !validation_warnings.is_empty() {
            debug!(
                formula_id = %definition.id,
                warnings = ?validation_warnings,
                "inputs raised plausibility warnings"
            );
        }

        debug!(
            formula_id = %definition.id,
            company_type = %company_type,
            mode = %outcome.mode,
            financed_emissions = outcome.financed_emissions,
            "calculation complete"
        );

        Ok(CalculationResult {
            attribution_factor: attribution.factor,
            emission_factor: outcome.emission_factor,
            financed_emissions: outcome.financed_emissions,
            data_quality_score: definition.data_quality_score,
            methodology: definition.name.clone(),
            calculation_steps: outcome.steps,
            metadata: CalculationMetadata {
                formula_id: definition.id.clone(),
                option_code: definition.option_code,
                category: definition.category,
                asset_class: definition.asset_class,
                company_type,
                exposure_field: attribution.exposure_field,
                denominator_field: attribution.denominator_field,
                computation_mode: outcome.mode,
                weighting_factor: outcome.weighting_factor,
                validation_warnings,
            },
        })
    }

    /// Highest-quality formula of `category` whose required inputs are all
    /// in `available`.
    ///
    /// Lower data quality scores win; ties go to the earlier registration.
    /// Company-value denominators are optional in the schema, so a returned
    /// corporate formula may still need `evic` or `total_equity_plus_debt`.
    pub fn best_formula<'a, I>(
        &self,
        available: I,
        category: FormulaCategory,
    ) -> Option<&FormulaDefinition>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: HashSet<&str> = available.into_iter().collect();
        self.registry
            .by_category(category)
            .filter(|formula| formula.required_inputs().all(|name| available.contains(name)))
            .min_by_key(|formula| formula.data_quality_score)
    }

    /// Quality label, headline figures and recommendations for a result.
    #[inline]
    pub fn summary(&self, result: &CalculationResult) -> CalculationSummary {
        summarize(result)
    }

    /// Runs independent requests in parallel, preserving input order.
    ///
    /// Each element carries its own result; one failure does not affect the
    /// others.
    pub fn calculate_batch(
        &self,
        requests: &[CalculationRequest],
    ) -> Vec<Result<CalculationResult, CalculationError>> {
        requests
            .par_iter()
            .map(|request| self.calculate(&request.formula_id, &request.inputs, request.company_type))
            .collect()
    }
}
