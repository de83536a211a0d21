//! Calculation output types.

use serde::{Deserialize, Serialize};

use crate::formula::{
    AssetClass, CompanyType, ComputationMode, FormulaCategory, InputField, OptionCode,
};

/// One entry of the audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// What this step computes or records.
    pub description: String,
    /// Resulting value.
    pub value: f64,
    /// Arithmetic rendered with the actual operands.
    pub formula: String,
}

impl CalculationStep {
    /// Creates a step.
    pub fn new(description: impl Into<String>, value: f64, formula: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            value,
            formula: formula.into(),
        }
    }

    /// Records an input value as-is.
    pub(crate) fn input(field: InputField, value: f64, unit: &str) -> Self {
        let rendered = if unit.is_empty() {
            format!("{} = {}", field.as_str(), value)
        } else {
            format!("{} = {} {}", field.as_str(), value, unit)
        };
        Self::new(field.label(), value, rendered)
    }
}

/// Structured description of how a result was obtained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationMetadata {
    /// Formula id.
    pub formula_id: String,
    /// Methodology tier.
    pub option_code: OptionCode,
    /// Financed or facilitated.
    pub category: FormulaCategory,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Company type the calculation was run for.
    pub company_type: CompanyType,
    /// Field used as the attribution numerator.
    pub exposure_field: InputField,
    /// Field used as the attribution denominator.
    pub denominator_field: InputField,
    /// Emission computation mode.
    pub computation_mode: ComputationMode,
    /// Weighting factor, present for facilitated formulas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighting_factor: Option<f64>,
    /// Non-fatal plausibility warnings raised on the inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_warnings: Vec<String>,
}

/// Auditable result of a single calculation.
///
/// Created fresh per call; never cached or persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Exposure divided by the attribution denominator.
    pub attribution_factor: f64,
    /// Emission factor used; `1.0` for direct reported emissions.
    pub emission_factor: f64,
    /// Attributed emissions in tCO2e.
    pub financed_emissions: f64,
    /// Data quality score of the formula.
    pub data_quality_score: u8,
    /// Formula display name.
    pub methodology: String,
    /// Audit trail in computation order.
    pub calculation_steps: Vec<CalculationStep>,
    /// Structured provenance.
    pub metadata: CalculationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_step_rendering() {
        let step = CalculationStep::input(InputField::FloorArea, 1200.0, "m²");
        assert_eq!(step.description, "Floor Area");
        assert_eq!(step.value, 1200.0);
        assert_eq!(step.formula, "floor_area = 1200 m²");

        let bare = CalculationStep::input(InputField::WeightingFactor, 0.5, "");
        assert_eq!(bare.formula, "weighting_factor = 0.5");
    }

    #[test]
    fn test_metadata_omits_absent_weighting() {
        let metadata = CalculationMetadata {
            formula_id: "1a-mortgage".to_string(),
            option_code: OptionCode::Tier1a,
            category: FormulaCategory::FinancedEmission,
            asset_class: AssetClass::Mortgage,
            company_type: CompanyType::Listed,
            exposure_field: InputField::OutstandingAmount,
            denominator_field: InputField::PropertyValueAtOrigination,
            computation_mode: ComputationMode::EnergyBased,
            weighting_factor: None,
            validation_warnings: Vec::new(),
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("weighting_factor").is_none());
        assert!(json.get("validation_warnings").is_none());
        assert_eq!(json["computation_mode"], "energy_based");
        assert_eq!(json["option_code"], "1a");
    }
}
