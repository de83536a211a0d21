//! Formula definitions and the strategies they carry.
//!
//! A [`FormulaDefinition`] is the complete behaviour contract for one
//! calculable option: which inputs it accepts, how the attribution factor is
//! derived ([`AttributionBasis`]) and how the attributable emission quantity
//! is computed ([`EmissionBasis`]).

use serde::{Deserialize, Serialize};

use super::field::InputField;
use super::types::{AssetClass, CompanyType, FormulaCategory, OptionCode, ScopeType};

/// Declared schema for a single input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Field this spec describes.
    #[serde(rename = "name")]
    pub field: InputField,
    /// Display label.
    pub label: String,
    /// Value kind; always `"number"` for the current catalogue.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the caller must supply the field.
    pub required: bool,
    /// Unit string, informational only.
    pub unit: String,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Help text.
    #[serde(default)]
    pub description: String,
}

impl InputSpec {
    /// Creates a required numeric input labelled from the field.
    pub fn required(field: InputField, unit: impl Into<String>) -> Self {
        Self {
            field,
            label: field.label().to_string(),
            kind: "number".to_string(),
            required: true,
            unit: unit.into(),
            min: None,
            max: None,
            description: String::new(),
        }
    }

    /// Creates an optional numeric input labelled from the field.
    pub fn optional(field: InputField, unit: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(field, unit)
        }
    }

    /// Sets an inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets an inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets help text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Wire name of the field.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.field.as_str()
    }
}

/// Denominator policy used to compute the attribution factor.
///
/// The numerator is always the category's exposure field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionBasis {
    /// EVIC for listed companies, total equity plus debt otherwise.
    CompanyValue,
    /// Property value at origination.
    PropertyValue,
    /// Vehicle value at origination.
    VehicleValue,
    /// Total project equity plus debt.
    ProjectCapital,
    /// PPP-adjusted GDP, derived from the adjustment factor and nominal GDP.
    SovereignGdp,
}

impl AttributionBasis {
    /// Denominator field for the given company type.
    pub fn denominator_field(&self, company_type: CompanyType) -> InputField {
        match self {
            AttributionBasis::CompanyValue => company_type.company_value_field(),
            AttributionBasis::PropertyValue => InputField::PropertyValueAtOrigination,
            AttributionBasis::VehicleValue => InputField::TotalValueAtOrigination,
            AttributionBasis::ProjectCapital => InputField::TotalProjectEquityPlusDebt,
            AttributionBasis::SovereignGdp => InputField::PppAdjustedGdp,
        }
    }

    /// Operands the denominator is derived from, when it is not read directly.
    ///
    /// The denominator is the product of the two fields.
    pub fn derived_from(&self) -> Option<(InputField, InputField)> {
        match self {
            AttributionBasis::SovereignGdp => {
                Some((InputField::PppAdjustmentFactor, InputField::Gdp))
            }
            _ => None,
        }
    }

    /// Candidate denominator fields across all company types.
    ///
    /// For a derived denominator these are its operands.
    pub fn candidate_fields(&self) -> &'static [InputField] {
        match self {
            AttributionBasis::CompanyValue => {
                &[InputField::Evic, InputField::TotalEquityPlusDebt]
            }
            AttributionBasis::PropertyValue => &[InputField::PropertyValueAtOrigination],
            AttributionBasis::VehicleValue => &[InputField::TotalValueAtOrigination],
            AttributionBasis::ProjectCapital => &[InputField::TotalProjectEquityPlusDebt],
            AttributionBasis::SovereignGdp => &[InputField::PppAdjustmentFactor, InputField::Gdp],
        }
    }
}

/// How the emission quantity is obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationMode {
    /// Reported emissions are used as-is.
    Direct,
    /// Energy consumption times emission factor.
    EnergyBased,
    /// Production volume times emission factor.
    ProductionBased,
    /// Energy intensity times floor area times emission factor.
    FloorAreaBased,
    /// Distance times fuel efficiency times emission factor.
    DistanceBased,
}

impl ComputationMode {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputationMode::Direct => "direct",
            ComputationMode::EnergyBased => "energy_based",
            ComputationMode::ProductionBased => "production_based",
            ComputationMode::FloorAreaBased => "floor_area_based",
            ComputationMode::DistanceBased => "distance_based",
        }
    }
}

impl std::fmt::Display for ComputationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emission computation strategy together with the fields that feed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EmissionBasis {
    /// `financed = af × emissions`.
    Direct {
        /// Reported emissions field.
        emissions: InputField,
    },
    /// `financed = af × consumption × factor`.
    Energy {
        /// Energy consumption field.
        consumption: InputField,
        /// Emission factor field.
        factor: InputField,
    },
    /// `financed = af × volume × factor`.
    Production {
        /// Production volume field.
        volume: InputField,
        /// Emission factor field.
        factor: InputField,
    },
    /// `financed = af × (intensity × floor_area) × factor`.
    FloorArea {
        /// Energy intensity per unit of floor area.
        intensity: InputField,
        /// Floor area field.
        floor_area: InputField,
        /// Emission factor field.
        factor: InputField,
    },
    /// `financed = af × (distance × efficiency) × factor`.
    Distance {
        /// Distance field.
        distance: InputField,
        /// Fuel efficiency field.
        efficiency: InputField,
        /// Emission factor field.
        factor: InputField,
    },
}

impl EmissionBasis {
    /// Computation mode of this strategy.
    pub fn mode(&self) -> ComputationMode {
        match self {
            EmissionBasis::Direct { .. } => ComputationMode::Direct,
            EmissionBasis::Energy { .. } => ComputationMode::EnergyBased,
            EmissionBasis::Production { .. } => ComputationMode::ProductionBased,
            EmissionBasis::FloorArea { .. } => ComputationMode::FloorAreaBased,
            EmissionBasis::Distance { .. } => ComputationMode::DistanceBased,
        }
    }

    /// Fields read by this strategy, in computation order.
    pub fn fields(&self) -> Vec<InputField> {
        match *self {
            EmissionBasis::Direct { emissions } => vec![emissions],
            EmissionBasis::Energy {
                consumption,
                factor,
            } => vec![consumption, factor],
            EmissionBasis::Production { volume, factor } => vec![volume, factor],
            EmissionBasis::FloorArea {
                intensity,
                floor_area,
                factor,
            } => vec![intensity, floor_area, factor],
            EmissionBasis::Distance {
                distance,
                efficiency,
                factor,
            } => vec![distance, efficiency, factor],
        }
    }
}

/// Identity and behaviour contract for one calculable option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormulaDefinition {
    /// Unique key, e.g. `"1a-listed-equity"`.
    pub id: String,
    /// Display name, reported back as the result's methodology.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Financed or facilitated.
    pub category: FormulaCategory,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Methodology tier.
    pub option_code: OptionCode,
    /// Fixed data quality score, 1 (best) to 5.
    pub data_quality_score: u8,
    /// Ordered input schema.
    pub inputs: Vec<InputSpec>,
    /// Emission scopes covered.
    pub applicable_scopes: Vec<ScopeType>,
    /// Attribution denominator policy.
    pub attribution: AttributionBasis,
    /// Emission computation strategy.
    pub emission_basis: EmissionBasis,
}

impl FormulaDefinition {
    /// Looks up the declared spec for a field.
    pub fn input(&self, field: InputField) -> Option<&InputSpec> {
        self.inputs.iter().find(|spec| spec.field == field)
    }

    /// Whether the definition declares `field`.
    pub fn declares(&self, field: InputField) -> bool {
        self.input(field).is_some()
    }

    /// Whether a weighting factor is applied to the result.
    #[inline]
    pub fn is_facilitated(&self) -> bool {
        self.category == FormulaCategory::FacilitatedEmission
    }

    /// Names of required inputs, in declaration order.
    pub fn required_inputs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inputs
            .iter()
            .filter(|spec| spec.required)
            .map(InputSpec::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_spec_builders() {
        let spec = InputSpec::required(InputField::WeightingFactor, "ratio")
            .with_min(0.0)
            .with_max(1.0)
            .with_description("Share attributed to the facilitator");
        assert!(spec.required);
        assert_eq!(spec.label, "Weighting Factor");
        assert_eq!(spec.min, Some(0.0));
        assert_eq!(spec.max, Some(1.0));
        assert_eq!(spec.name(), "weighting_factor");

        let optional = InputSpec::optional(InputField::TotalAssets, "PKR");
        assert!(!optional.required);
    }

    #[test]
    fn test_input_spec_serialises_with_wire_name() {
        let spec = InputSpec::required(InputField::Evic, "PKR");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["name"], "evic");
        assert_eq!(json["type"], "number");
        assert!(json.get("min").is_none());
    }

    #[test]
    fn test_company_value_denominator_follows_company_type() {
        let basis = AttributionBasis::CompanyValue;
        assert_eq!(basis.denominator_field(CompanyType::Listed), InputField::Evic);
        assert_eq!(
            basis.denominator_field(CompanyType::Unlisted),
            InputField::TotalEquityPlusDebt
        );
        assert_eq!(basis.candidate_fields().len(), 2);
    }

    #[test]
    fn test_fixed_denominators_ignore_company_type() {
        for company_type in [CompanyType::Listed, CompanyType::Unlisted] {
            assert_eq!(
                AttributionBasis::SovereignGdp.denominator_field(company_type),
                InputField::PppAdjustedGdp
            );
        }
    }

    #[test]
    fn test_sovereign_denominator_is_derived() {
        let basis = AttributionBasis::SovereignGdp;
        assert_eq!(
            basis.derived_from(),
            Some((InputField::PppAdjustmentFactor, InputField::Gdp))
        );
        assert_eq!(basis.candidate_fields().len(), 2);
        assert_eq!(AttributionBasis::CompanyValue.derived_from(), None);
    }

    #[test]
    fn test_emission_basis_fields_in_order() {
        let basis = EmissionBasis::FloorArea {
            intensity: InputField::EstimatedEnergyConsumptionFromLabels,
            floor_area: InputField::FloorArea,
            factor: InputField::AverageEmissionFactor,
        };
        assert_eq!(basis.mode(), ComputationMode::FloorAreaBased);
        assert_eq!(
            basis.fields(),
            vec![
                InputField::EstimatedEnergyConsumptionFromLabels,
                InputField::FloorArea,
                InputField::AverageEmissionFactor,
            ]
        );
    }

    #[test]
    fn test_emission_basis_serialises_tagged() {
        let basis = EmissionBasis::Direct {
            emissions: InputField::VerifiedEmissions,
        };
        let json = serde_json::to_value(basis).unwrap();
        assert_eq!(json["mode"], "direct");
        assert_eq!(json["emissions"], "verified_emissions");
    }
}
