//! Closed set of input fields understood by the engine.
//!
//! Formula definitions reference fields through [`InputField`] rather than
//! free-form strings, so a typo in the catalogue fails to compile instead of
//! surfacing as a missing input at request time. Callers still address
//! fields by their wire name (e.g. `"outstanding_amount"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An input field a formula may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    // Exposure
    /// Outstanding loan or investment amount.
    OutstandingAmount,
    /// Amount facilitated through underwriting or issuance.
    FacilitatedAmount,
    /// Total assets of the investee (informational).
    TotalAssets,

    // Attribution denominators
    /// Enterprise value including cash.
    Evic,
    /// Total equity plus debt.
    TotalEquityPlusDebt,
    /// Property value at loan origination.
    PropertyValueAtOrigination,
    /// Vehicle value at loan origination.
    TotalValueAtOrigination,
    /// Total project equity plus debt.
    TotalProjectEquityPlusDebt,
    /// Purchasing-power-parity adjusted GDP, derived as
    /// `ppp_adjustment_factor × gdp`.
    PppAdjustedGdp,
    /// Purchasing-power-parity adjustment factor of the country.
    PppAdjustmentFactor,
    /// Nominal gross domestic product of the country.
    Gdp,

    /// Facilitated weighting factor in `[0, 1]`.
    WeightingFactor,

    // Reported emissions
    /// Third-party verified emissions.
    VerifiedEmissions,
    /// Reported but unverified emissions.
    UnverifiedEmissions,
    /// Emissions aggregated from the financed vehicles.
    TotalVehicleEmissions,
    /// Verified production emissions of a country.
    VerifiedCountryEmissions,
    /// Unverified production emissions of a country.
    UnverifiedCountryEmissions,

    // Activity data
    /// Energy consumption.
    EnergyConsumption,
    /// Production volume.
    Production,
    /// Emission factor per unit of activity.
    EmissionFactor,
    /// Metered building energy consumption.
    ActualEnergyConsumption,
    /// Supplier-specific grid emission factor.
    SupplierSpecificEmissionFactor,
    /// Average grid emission factor.
    AverageEmissionFactor,
    /// Energy intensity derived from energy labels.
    EstimatedEnergyConsumptionFromLabels,
    /// Energy intensity derived from building statistics.
    EstimatedEnergyConsumptionFromStatistics,
    /// Building floor area.
    FloorArea,
    /// Distance travelled by the vehicle.
    DistanceTraveled,
    /// Vehicle fuel efficiency.
    Efficiency,
}

impl InputField {
    /// Every field, in declaration order.
    pub const ALL: [InputField; 28] = [
        InputField::OutstandingAmount,
        InputField::FacilitatedAmount,
        InputField::TotalAssets,
        InputField::Evic,
        InputField::TotalEquityPlusDebt,
        InputField::PropertyValueAtOrigination,
        InputField::TotalValueAtOrigination,
        InputField::TotalProjectEquityPlusDebt,
        InputField::PppAdjustedGdp,
        InputField::PppAdjustmentFactor,
        InputField::Gdp,
        InputField::WeightingFactor,
        InputField::VerifiedEmissions,
        InputField::UnverifiedEmissions,
        InputField::TotalVehicleEmissions,
        InputField::VerifiedCountryEmissions,
        InputField::UnverifiedCountryEmissions,
        InputField::EnergyConsumption,
        InputField::Production,
        InputField::EmissionFactor,
        InputField::ActualEnergyConsumption,
        InputField::SupplierSpecificEmissionFactor,
        InputField::AverageEmissionFactor,
        InputField::EstimatedEnergyConsumptionFromLabels,
        InputField::EstimatedEnergyConsumptionFromStatistics,
        InputField::FloorArea,
        InputField::DistanceTraveled,
        InputField::Efficiency,
    ];

    /// Wire name used as the key in caller input mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::OutstandingAmount => "outstanding_amount",
            InputField::FacilitatedAmount => "facilitated_amount",
            InputField::TotalAssets => "total_assets",
            InputField::Evic => "evic",
            InputField::TotalEquityPlusDebt => "total_equity_plus_debt",
            InputField::PropertyValueAtOrigination => "property_value_at_origination",
            InputField::TotalValueAtOrigination => "total_value_at_origination",
            InputField::TotalProjectEquityPlusDebt => "total_project_equity_plus_debt",
            InputField::PppAdjustedGdp => "ppp_adjusted_gdp",
            InputField::PppAdjustmentFactor => "ppp_adjustment_factor",
            InputField::Gdp => "gdp",
            InputField::WeightingFactor => "weighting_factor",
            InputField::VerifiedEmissions => "verified_emissions",
            InputField::UnverifiedEmissions => "unverified_emissions",
            InputField::TotalVehicleEmissions => "total_vehicle_emissions",
            InputField::VerifiedCountryEmissions => "verified_country_emissions",
            InputField::UnverifiedCountryEmissions => "unverified_country_emissions",
            InputField::EnergyConsumption => "energy_consumption",
            InputField::Production => "production",
            InputField::EmissionFactor => "emission_factor",
            InputField::ActualEnergyConsumption => "actual_energy_consumption",
            InputField::SupplierSpecificEmissionFactor => "supplier_specific_emission_factor",
            InputField::AverageEmissionFactor => "average_emission_factor",
            InputField::EstimatedEnergyConsumptionFromLabels => {
                "estimated_energy_consumption_from_labels"
            }
            InputField::EstimatedEnergyConsumptionFromStatistics => {
                "estimated_energy_consumption_from_statistics"
            }
            InputField::FloorArea => "floor_area",
            InputField::DistanceTraveled => "distance_traveled",
            InputField::Efficiency => "efficiency",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            InputField::OutstandingAmount => "Outstanding Amount",
            InputField::FacilitatedAmount => "Facilitated Amount",
            InputField::TotalAssets => "Total Assets",
            InputField::Evic => "Enterprise Value Including Cash (EVIC)",
            InputField::TotalEquityPlusDebt => "Total Equity + Debt",
            InputField::PropertyValueAtOrigination => "Property Value at Origination",
            InputField::TotalValueAtOrigination => "Total Value at Origination",
            InputField::TotalProjectEquityPlusDebt => "Total Project Equity + Debt",
            InputField::PppAdjustedGdp => "PPP-Adjusted GDP",
            InputField::PppAdjustmentFactor => "PPP Adjustment Factor",
            InputField::Gdp => "GDP (Gross Domestic Product)",
            InputField::WeightingFactor => "Weighting Factor",
            InputField::VerifiedEmissions => "Verified GHG Emissions",
            InputField::UnverifiedEmissions => "Unverified GHG Emissions",
            InputField::TotalVehicleEmissions => "Total Vehicle Emissions",
            InputField::VerifiedCountryEmissions => "Verified Country Emissions",
            InputField::UnverifiedCountryEmissions => "Unverified Country Emissions",
            InputField::EnergyConsumption => "Energy Consumption",
            InputField::Production => "Production Volume",
            InputField::EmissionFactor => "Emission Factor",
            InputField::ActualEnergyConsumption => "Actual Energy Consumption",
            InputField::SupplierSpecificEmissionFactor => "Supplier-Specific Emission Factor",
            InputField::AverageEmissionFactor => "Average Emission Factor",
            InputField::EstimatedEnergyConsumptionFromLabels => {
                "Estimated Energy Consumption (Energy Labels)"
            }
            InputField::EstimatedEnergyConsumptionFromStatistics => {
                "Estimated Energy Consumption (Building Statistics)"
            }
            InputField::FloorArea => "Floor Area",
            InputField::DistanceTraveled => "Distance Traveled",
            InputField::Efficiency => "Fuel Efficiency",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown input field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_names_are_unique() {
        let names: HashSet<&str> = InputField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names.len(), InputField::ALL.len());
    }

    #[test]
    fn test_from_str_round_trips_every_field() {
        for field in InputField::ALL {
            assert_eq!(field.as_str().parse::<InputField>().unwrap(), field);
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for field in InputField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_vehicle_and_sovereign_wire_names() {
        assert_eq!(InputField::Efficiency.as_str(), "efficiency");
        assert_eq!("efficiency".parse::<InputField>().unwrap(), InputField::Efficiency);
        assert_eq!("ppp_adjustment_factor".parse::<InputField>().unwrap(), InputField::PppAdjustmentFactor);
        assert_eq!("gdp".parse::<InputField>().unwrap(), InputField::Gdp);
        assert_eq!(
            "verified_country_emissions".parse::<InputField>().unwrap(),
            InputField::VerifiedCountryEmissions
        );
        assert!("fuel_efficiency".parse::<InputField>().is_err());
    }

    #[test]
    fn test_unknown_field() {
        assert!("outstanding".parse::<InputField>().is_err());
    }
}
