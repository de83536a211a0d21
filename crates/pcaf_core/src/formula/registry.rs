//! Immutable formula registry.
//!
//! The registry is assembled once through [`FormulaRegistryBuilder`], which
//! enforces catalogue invariants, and is then shared read-only.
//!
//! # Example
//!
//! ```
//! use pcaf_core::formula::{FormulaCategory, FormulaRegistry};
//!
//! let registry = FormulaRegistry::standard().unwrap();
//! let formula = registry.get("1a-listed-equity").unwrap();
//! assert_eq!(formula.data_quality_score, 1);
//! assert!(registry.by_category(FormulaCategory::FacilitatedEmission).count() > 0);
//! ```

use std::collections::{HashMap, HashSet};

use super::catalogue::standard_formulas;
use super::definition::FormulaDefinition;
use super::field::InputField;
use super::types::{AssetClass, FormulaCategory};
use crate::error::{CalculationError, RegistryError};

/// Read-only catalogue of formula definitions keyed by id.
#[derive(Clone, Debug, Default)]
pub struct FormulaRegistry {
    formulas: Vec<FormulaDefinition>,
    index: HashMap<String, usize>,
}

impl FormulaRegistry {
    /// Starts an empty builder.
    pub fn builder() -> FormulaRegistryBuilder {
        FormulaRegistryBuilder::new()
    }

    /// Builds the registry holding the standard catalogue.
    pub fn standard() -> Result<Self, RegistryError> {
        standard_formulas()
            .into_iter()
            .fold(FormulaRegistryBuilder::new(), FormulaRegistryBuilder::add)
            .build()
    }

    /// Looks up a formula by id.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NotFound`] when no formula has this id.
    pub fn get(&self, id: &str) -> Result<&FormulaDefinition, CalculationError> {
        self.find(id)
            .ok_or_else(|| CalculationError::NotFound(id.to_string()))
    }

    /// Looks up a formula by id without raising.
    pub fn find(&self, id: &str) -> Option<&FormulaDefinition> {
        self.index.get(id).map(|&i| &self.formulas[i])
    }

    /// All definitions in registration order.
    #[inline]
    pub fn all(&self) -> &[FormulaDefinition] {
        &self.formulas
    }

    /// Definitions in the given category, in registration order.
    pub fn by_category(
        &self,
        category: FormulaCategory,
    ) -> impl Iterator<Item = &FormulaDefinition> + '_ {
        self.formulas.iter().filter(move |f| f.category == category)
    }

    /// Definitions for the given asset class, in registration order.
    pub fn by_asset_class(
        &self,
        asset_class: AssetClass,
    ) -> impl Iterator<Item = &FormulaDefinition> + '_ {
        self.formulas
            .iter()
            .filter(move |f| f.asset_class == asset_class)
    }

    /// Whether a formula with this id is registered.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered formulas.
    #[inline]
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Whether the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

/// Builder validating definitions before they are frozen into a registry.
#[derive(Debug, Default)]
pub struct FormulaRegistryBuilder {
    formulas: Vec<FormulaDefinition>,
}

impl FormulaRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a definition.
    pub fn add(mut self, formula: FormulaDefinition) -> Self {
        self.formulas.push(formula);
        self
    }

    /// Validates every queued definition and freezes the registry.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateFormula`] when two definitions share an id
    /// - [`RegistryError::DuplicateInput`] when a definition repeats an input
    /// - [`RegistryError::InvalidDataQualityScore`] for scores outside 1..=5
    /// - [`RegistryError::InvalidRange`] when a declared min exceeds its max
    /// - [`RegistryError::UndeclaredField`] when a strategy reads an input the
    ///   definition never declares
    pub fn build(self) -> Result<FormulaRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.formulas.len());
        for (position, formula) in self.formulas.iter().enumerate() {
            check_definition(formula)?;
            if index.insert(formula.id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateFormula(formula.id.clone()));
            }
        }
        Ok(FormulaRegistry {
            formulas: self.formulas,
            index,
        })
    }
}

fn check_definition(formula: &FormulaDefinition) -> Result<(), RegistryError> {
    if !(1..=5).contains(&formula.data_quality_score) {
        return Err(RegistryError::InvalidDataQualityScore {
            formula: formula.id.clone(),
            score: formula.data_quality_score,
        });
    }

    let mut seen = HashSet::with_capacity(formula.inputs.len());
    for spec in &formula.inputs {
        if !seen.insert(spec.field) {
            return Err(RegistryError::DuplicateInput {
                formula: formula.id.clone(),
                field: spec.name().to_string(),
            });
        }
        if let (Some(min), Some(max)) = (spec.min, spec.max) {
            if min > max {
                return Err(RegistryError::InvalidRange {
                    formula: formula.id.clone(),
                    field: spec.name().to_string(),
                });
            }
        }
    }

    let undeclared = |field: InputField| RegistryError::UndeclaredField {
        formula: formula.id.clone(),
        field: field.as_str().to_string(),
    };

    let exposure = formula.category.exposure_field();
    if !seen.contains(&exposure) {
        return Err(undeclared(exposure));
    }
    let candidates = formula.attribution.candidate_fields();
    if formula.attribution.derived_from().is_some() {
        if let Some(&field) = candidates.iter().find(|field| !seen.contains(field)) {
            return Err(undeclared(field));
        }
    } else if !candidates.iter().any(|field| seen.contains(field)) {
        return Err(undeclared(candidates[0]));
    }
    if formula.is_facilitated() && !seen.contains(&InputField::WeightingFactor) {
        return Err(undeclared(InputField::WeightingFactor));
    }
    if let Some(field) = formula
        .emission_basis
        .fields()
        .into_iter()
        .find(|field| !seen.contains(field))
    {
        return Err(undeclared(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{AttributionBasis, EmissionBasis, InputSpec, OptionCode, ScopeType};

    fn sample(id: &str) -> FormulaDefinition {
        FormulaDefinition {
            id: id.to_string(),
            name: "Sample".to_string(),
            description: String::new(),
            category: FormulaCategory::FinancedEmission,
            asset_class: AssetClass::ProjectFinance,
            option_code: OptionCode::Tier1a,
            data_quality_score: 1,
            inputs: vec![
                InputSpec::required(InputField::OutstandingAmount, "PKR"),
                InputSpec::required(InputField::TotalProjectEquityPlusDebt, "PKR"),
                InputSpec::required(InputField::VerifiedEmissions, "tCO2e"),
            ],
            applicable_scopes: ScopeType::ALL.to_vec(),
            attribution: AttributionBasis::ProjectCapital,
            emission_basis: EmissionBasis::Direct {
                emissions: InputField::VerifiedEmissions,
            },
        }
    }

    // ========================================
    // Lookup Tests
    // ========================================

    #[test]
    fn test_standard_registry_lookup() {
        let registry = FormulaRegistry::standard().unwrap();
        assert_eq!(registry.len(), 35);
        assert!(registry.contains("2b-mortgage"));
        assert_eq!(
            registry.get("1a-listed-equity").unwrap().name,
            "Option 1a - Verified GHG Emissions (Listed)"
        );
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = FormulaRegistry::standard().unwrap();
        let err = registry.get("nonexistent-id").unwrap_err();
        assert_eq!(err, CalculationError::NotFound("nonexistent-id".to_string()));
        assert!(registry.find("nonexistent-id").is_none());
    }

    #[test]
    fn test_all_preserves_registration_order() {
        let registry = FormulaRegistry::builder()
            .add(sample("b"))
            .add(sample("a"))
            .build()
            .unwrap();
        let ids: Vec<&str> = registry.all().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_filters() {
        let registry = FormulaRegistry::standard().unwrap();
        assert_eq!(
            registry
                .by_category(FormulaCategory::FacilitatedEmission)
                .count(),
            8
        );
        assert_eq!(registry.by_asset_class(AssetClass::Mortgage).count(), 4);
    }

    // ========================================
    // Builder Validation Tests
    // ========================================

    #[test]
    fn test_duplicate_id_rejected() {
        let err = FormulaRegistry::builder()
            .add(sample("dup"))
            .add(sample("dup"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateFormula("dup".to_string()));
    }

    #[test]
    fn test_duplicate_input_rejected() {
        let mut formula = sample("x");
        formula
            .inputs
            .push(InputSpec::optional(InputField::VerifiedEmissions, "tCO2e"));
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateInput { .. }));
    }

    #[test]
    fn test_quality_score_bounds() {
        for score in [0, 6] {
            let mut formula = sample("x");
            formula.data_quality_score = score;
            let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
            assert!(matches!(err, RegistryError::InvalidDataQualityScore { .. }));
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut formula = sample("x");
        formula.inputs[2] = InputSpec::required(InputField::VerifiedEmissions, "tCO2e")
            .with_min(10.0)
            .with_max(1.0);
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { .. }));
    }

    #[test]
    fn test_undeclared_emission_field_rejected() {
        let mut formula = sample("x");
        formula.emission_basis = EmissionBasis::Energy {
            consumption: InputField::EnergyConsumption,
            factor: InputField::EmissionFactor,
        };
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::UndeclaredField {
                formula: "x".to_string(),
                field: "energy_consumption".to_string(),
            }
        );
    }

    #[test]
    fn test_undeclared_denominator_rejected() {
        let mut formula = sample("x");
        formula.attribution = AttributionBasis::SovereignGdp;
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert!(matches!(err, RegistryError::UndeclaredField { ref field, .. } if field == "ppp_adjustment_factor"));
    }

    #[test]
    fn test_derived_denominator_needs_every_operand() {
        let mut formula = sample("x");
        formula.attribution = AttributionBasis::SovereignGdp;
        formula.inputs[1] = InputSpec::required(InputField::PppAdjustmentFactor, "ratio");
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert!(matches!(err, RegistryError::UndeclaredField { ref field, .. } if field == "gdp"));
    }

    #[test]
    fn test_facilitated_requires_weighting_declaration() {
        let mut formula = sample("x");
        formula.category = FormulaCategory::FacilitatedEmission;
        formula.inputs[0] = InputSpec::required(InputField::FacilitatedAmount, "PKR");
        let err = FormulaRegistry::builder().add(formula).build().unwrap_err();
        assert!(matches!(err, RegistryError::UndeclaredField { ref field, .. } if field == "weighting_factor"));
    }
}
