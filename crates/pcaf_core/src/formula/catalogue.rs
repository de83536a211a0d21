//! Standard formula catalogue.
//!
//! One definition per methodology option × asset class, with listed and
//! unlisted variants generated from a single template parameterised by
//! [`CompanyType`].
//!
//! | Asset class            | Ids                                         | DQ      |
//! |------------------------|---------------------------------------------|---------|
//! | Corporate finance      | `{1a,1b,2a,2b}-{listed,unlisted}-equity`    | 1,2,3,3 |
//! | Commercial real estate | `{1a,1b,2a,2b}-commercial-real-estate`      | 1,2,3,4 |
//! | Mortgage               | `{1a,1b,2a,2b}-mortgage`                    | 1,2,3,4 |
//! | Motor vehicle loan     | `{1a,1b,2a,2b}-motor-vehicle`               | 1,1,2,3 |
//! | Project finance        | `{1a,1b,2a,2b}-project-finance`             | 1,2,3,3 |
//! | Sovereign debt         | `{1a,1b,2a}-sovereign-debt`                 | 1,2,3   |
//! | Facilitated            | `{1a,1b,2a,2b}-facilitated-*-{listed,unlisted}` | 1,2,3,3 |

use super::definition::{AttributionBasis, EmissionBasis, FormulaDefinition, InputSpec};
use super::field::InputField;
use super::types::{AssetClass, CompanyType, FormulaCategory, OptionCode, ScopeType};

const CURRENCY: &str = "PKR";
const PROPERTY_CURRENCY: &str = "USD";
const EMISSIONS_UNIT: &str = "tCO2e";

/// Builds every definition of the standard catalogue in registration order.
pub fn standard_formulas() -> Vec<FormulaDefinition> {
    let mut formulas = Vec::with_capacity(35);
    for company_type in [CompanyType::Listed, CompanyType::Unlisted] {
        formulas.extend(corporate_formulas(company_type));
    }
    formulas.extend(real_estate_formulas(PropertyKind::Commercial));
    formulas.extend(real_estate_formulas(PropertyKind::Residential));
    formulas.extend(motor_vehicle_formulas());
    formulas.extend(project_finance_formulas());
    formulas.extend(sovereign_debt_formulas());
    for company_type in [CompanyType::Listed, CompanyType::Unlisted] {
        formulas.extend(facilitated_formulas(company_type));
    }
    formulas
}

// ============================================================================
// Shared option templates
// ============================================================================

/// Reported-emissions and activity-data options shared by corporate,
/// project finance and facilitated formulas.
struct OptionTemplate {
    code: OptionCode,
    slug: &'static str,
    score: u8,
    title: &'static str,
    description: &'static str,
    scopes: &'static [ScopeType],
    activity: Vec<InputSpec>,
    basis: EmissionBasis,
}

fn company_options() -> Vec<OptionTemplate> {
    vec![
        OptionTemplate {
            code: OptionCode::Tier1a,
            slug: "verified",
            score: 1,
            title: "Verified GHG Emissions",
            description: "Verified GHG emissions data in accordance with the GHG Protocol",
            scopes: ScopeType::ALL,
            activity: vec![emissions_input(InputField::VerifiedEmissions)
                .with_description("Verified GHG emissions reported by the company")],
            basis: EmissionBasis::Direct {
                emissions: InputField::VerifiedEmissions,
            },
        },
        OptionTemplate {
            code: OptionCode::Tier1b,
            slug: "unverified",
            score: 2,
            title: "Unverified GHG Emissions",
            description: "Unverified GHG emissions data calculated in accordance with the GHG Protocol",
            scopes: ScopeType::ALL,
            activity: vec![emissions_input(InputField::UnverifiedEmissions)
                .with_description("Unverified GHG emissions calculated by the company")],
            basis: EmissionBasis::Direct {
                emissions: InputField::UnverifiedEmissions,
            },
        },
        OptionTemplate {
            code: OptionCode::Tier2a,
            slug: "energy",
            score: 3,
            title: "Energy Consumption Data",
            description: "Primary physical activity data for energy consumption by energy source",
            scopes: ScopeType::OPERATIONAL,
            activity: vec![
                InputSpec::required(InputField::EnergyConsumption, "MWh")
                    .with_min(0.0)
                    .with_description("Primary physical activity data for energy consumption"),
                InputSpec::required(InputField::EmissionFactor, "tCO2e/MWh")
                    .with_min(0.0)
                    .with_description("How much carbon is released per unit of energy used"),
            ],
            basis: EmissionBasis::Energy {
                consumption: InputField::EnergyConsumption,
                factor: InputField::EmissionFactor,
            },
        },
        OptionTemplate {
            code: OptionCode::Tier2b,
            slug: "production",
            score: 3,
            title: "Production Data",
            description: "Primary physical activity data for production output",
            scopes: ScopeType::ALL,
            activity: vec![
                InputSpec::required(InputField::Production, "tonnes")
                    .with_min(0.0)
                    .with_description("Primary physical activity data for production"),
                InputSpec::required(InputField::EmissionFactor, "tCO2e/tonne")
                    .with_min(0.0)
                    .with_description("How much carbon is released per unit of production"),
            ],
            basis: EmissionBasis::Production {
                volume: InputField::Production,
                factor: InputField::EmissionFactor,
            },
        },
    ]
}

fn emissions_input(field: InputField) -> InputSpec {
    InputSpec::required(field, EMISSIONS_UNIT).with_min(0.0)
}

fn exposure_input(category: FormulaCategory, currency: &str) -> InputSpec {
    let description = match category {
        FormulaCategory::FinancedEmission => "Outstanding amount of the loan or investment",
        FormulaCategory::FacilitatedEmission => {
            "Total amount of financial services provided to the client"
        }
    };
    InputSpec::required(category.exposure_field(), currency)
        .with_min(0.0)
        .with_description(description)
}

/// Company-value inputs: both denominators are declared and the one matching
/// the request's company type is enforced at attribution time.
fn company_value_inputs() -> Vec<InputSpec> {
    vec![
        InputSpec::optional(InputField::TotalAssets, CURRENCY)
            .with_description("Total assets value, informational"),
        InputSpec::optional(InputField::Evic, CURRENCY)
            .with_description("EVIC, required for listed companies"),
        InputSpec::optional(InputField::TotalEquityPlusDebt, CURRENCY)
            .with_description("Total equity plus debt, required for unlisted companies"),
    ]
}

fn company_suffix(company_type: CompanyType) -> &'static str {
    match company_type {
        CompanyType::Listed => "Listed",
        CompanyType::Unlisted => "Unlisted/Private",
    }
}

// ============================================================================
// Corporate finance and facilitated emissions
// ============================================================================

fn corporate_formulas(company_type: CompanyType) -> Vec<FormulaDefinition> {
    company_options()
        .into_iter()
        .map(|option| {
            let mut inputs = vec![exposure_input(FormulaCategory::FinancedEmission, CURRENCY)];
            inputs.extend(company_value_inputs());
            inputs.extend(option.activity);
            FormulaDefinition {
                id: format!("{}-{}-equity", option.code, company_type),
                name: format!(
                    "Option {} - {} ({})",
                    option.code,
                    option.title,
                    company_suffix(company_type)
                ),
                description: option.description.to_string(),
                category: FormulaCategory::FinancedEmission,
                asset_class: AssetClass::CorporateFinance,
                option_code: option.code,
                data_quality_score: option.score,
                inputs,
                applicable_scopes: option.scopes.to_vec(),
                attribution: AttributionBasis::CompanyValue,
                emission_basis: option.basis,
            }
        })
        .collect()
}

fn facilitated_formulas(company_type: CompanyType) -> Vec<FormulaDefinition> {
    let suffix = match company_type {
        CompanyType::Listed => "Listed",
        CompanyType::Unlisted => "Unlisted",
    };
    company_options()
        .into_iter()
        .map(|option| {
            let mut inputs = vec![exposure_input(FormulaCategory::FacilitatedEmission, CURRENCY)];
            inputs.extend(company_value_inputs());
            inputs.push(
                InputSpec::required(InputField::WeightingFactor, "ratio")
                    .with_min(0.0)
                    .with_max(1.0)
                    .with_description("Proportion of services provided (0-1)"),
            );
            inputs.extend(option.activity);
            FormulaDefinition {
                id: format!("{}-facilitated-{}-{}", option.code, option.slug, company_type),
                name: format!(
                    "Option {} - {} (Facilitated - {})",
                    option.code, option.title, suffix
                ),
                description: format!("{} for facilitated capital-markets activity", option.description),
                category: FormulaCategory::FacilitatedEmission,
                asset_class: AssetClass::CapitalMarkets,
                option_code: option.code,
                data_quality_score: option.score,
                inputs,
                applicable_scopes: option.scopes.to_vec(),
                attribution: AttributionBasis::CompanyValue,
                emission_basis: option.basis,
            }
        })
        .collect()
}

fn project_finance_formulas() -> Vec<FormulaDefinition> {
    company_options()
        .into_iter()
        .map(|option| {
            let mut inputs = vec![
                exposure_input(FormulaCategory::FinancedEmission, CURRENCY),
                InputSpec::required(InputField::TotalProjectEquityPlusDebt, CURRENCY)
                    .with_description("Total equity plus debt raised for the project"),
            ];
            inputs.extend(option.activity);
            FormulaDefinition {
                id: format!("{}-project-finance", option.code),
                name: format!("Option {} - {} (Project Finance)", option.code, option.title),
                description: format!("{} for the financed project", option.description),
                category: FormulaCategory::FinancedEmission,
                asset_class: AssetClass::ProjectFinance,
                option_code: option.code,
                data_quality_score: option.score,
                inputs,
                applicable_scopes: option.scopes.to_vec(),
                attribution: AttributionBasis::ProjectCapital,
                emission_basis: option.basis,
            }
        })
        .collect()
}

// ============================================================================
// Real estate
// ============================================================================

#[derive(Clone, Copy)]
enum PropertyKind {
    Commercial,
    Residential,
}

impl PropertyKind {
    fn slug(self) -> &'static str {
        match self {
            PropertyKind::Commercial => "commercial-real-estate",
            PropertyKind::Residential => "mortgage",
        }
    }

    fn display(self) -> &'static str {
        match self {
            PropertyKind::Commercial => "Commercial Real Estate",
            PropertyKind::Residential => "Mortgage",
        }
    }

    fn asset_class(self) -> AssetClass {
        match self {
            PropertyKind::Commercial => AssetClass::CommercialRealEstate,
            PropertyKind::Residential => AssetClass::Mortgage,
        }
    }

    fn energy_unit(self) -> &'static str {
        match self {
            PropertyKind::Commercial => "kWh",
            PropertyKind::Residential => "MWh",
        }
    }
}

fn real_estate_formulas(kind: PropertyKind) -> Vec<FormulaDefinition> {
    let energy = kind.energy_unit();
    let intensity_unit = format!("{}/m²", energy);
    let factor_unit = format!("tCO2e/{}", energy);

    let (label_title, statistics_title) = match kind {
        PropertyKind::Commercial => (
            "Estimated Energy Consumption from Energy Labels",
            "Estimated Energy Consumption from Statistics",
        ),
        PropertyKind::Residential => ("Energy Labels Data", "Statistical Data"),
    };

    let actual = InputSpec::required(InputField::ActualEnergyConsumption, energy)
        .with_min(0.0)
        .with_description("Metered building energy consumption");
    let floor_area = InputSpec::required(InputField::FloorArea, "m²")
        .with_min(0.0)
        .with_description("Gross floor area of the building");
    let average = InputSpec::required(InputField::AverageEmissionFactor, factor_unit.as_str())
        .with_min(0.0)
        .with_description("Average grid emission factor for the region");

    let options = [
        (
            OptionCode::Tier1a,
            1,
            "Supplier-Specific Emission Factors",
            vec![
                actual.clone(),
                InputSpec::required(InputField::SupplierSpecificEmissionFactor, factor_unit.as_str())
                    .with_min(0.0)
                    .with_description("Emission factor supplied by the energy provider"),
            ],
            EmissionBasis::Energy {
                consumption: InputField::ActualEnergyConsumption,
                factor: InputField::SupplierSpecificEmissionFactor,
            },
        ),
        (
            OptionCode::Tier1b,
            2,
            "Average Emission Factors",
            vec![actual, average.clone()],
            EmissionBasis::Energy {
                consumption: InputField::ActualEnergyConsumption,
                factor: InputField::AverageEmissionFactor,
            },
        ),
        (
            OptionCode::Tier2a,
            3,
            label_title,
            vec![
                InputSpec::required(
                    InputField::EstimatedEnergyConsumptionFromLabels,
                    intensity_unit.as_str(),
                )
                .with_min(0.0)
                .with_description("Energy intensity implied by the building's energy label"),
                floor_area.clone(),
                average.clone(),
            ],
            EmissionBasis::FloorArea {
                intensity: InputField::EstimatedEnergyConsumptionFromLabels,
                floor_area: InputField::FloorArea,
                factor: InputField::AverageEmissionFactor,
            },
        ),
        (
            OptionCode::Tier2b,
            4,
            statistics_title,
            vec![
                InputSpec::required(
                    InputField::EstimatedEnergyConsumptionFromStatistics,
                    intensity_unit.as_str(),
                )
                .with_min(0.0)
                .with_description("Energy intensity from regional building statistics"),
                floor_area,
                average,
            ],
            EmissionBasis::FloorArea {
                intensity: InputField::EstimatedEnergyConsumptionFromStatistics,
                floor_area: InputField::FloorArea,
                factor: InputField::AverageEmissionFactor,
            },
        ),
    ];

    options
        .into_iter()
        .map(|(code, score, title, activity, basis)| {
            let mut inputs = vec![
                exposure_input(FormulaCategory::FinancedEmission, PROPERTY_CURRENCY),
                InputSpec::required(InputField::PropertyValueAtOrigination, PROPERTY_CURRENCY)
                    .with_description("Property value at the time of loan origination"),
            ];
            inputs.extend(activity);
            FormulaDefinition {
                id: format!("{}-{}", code, kind.slug()),
                name: format!("Option {} - {} ({})", code, title, kind.display()),
                description: format!("{} for {} exposures", title, kind.display().to_lowercase()),
                category: FormulaCategory::FinancedEmission,
                asset_class: kind.asset_class(),
                option_code: code,
                data_quality_score: score,
                inputs,
                applicable_scopes: ScopeType::OPERATIONAL.to_vec(),
                attribution: AttributionBasis::PropertyValue,
                emission_basis: basis,
            }
        })
        .collect()
}

// ============================================================================
// Motor vehicle loans
// ============================================================================

fn motor_vehicle_formulas() -> Vec<FormulaDefinition> {
    let reported = |code: OptionCode, title: &str, description: &str| {
        vehicle_formula(
            code,
            1,
            title,
            description,
            vec![emissions_input(InputField::TotalVehicleEmissions)
                .with_description("Total emissions aggregated from the financed vehicles")],
            EmissionBasis::Direct {
                emissions: InputField::TotalVehicleEmissions,
            },
        )
    };
    let statistical = |code: OptionCode, score: u8, title: &str, description: &str| {
        vehicle_formula(
            code,
            score,
            title,
            description,
            vec![
                InputSpec::required(InputField::DistanceTraveled, "km")
                    .with_min(0.0)
                    .with_description("Distance travelled over the reporting period"),
                InputSpec::required(InputField::Efficiency, "L/km")
                    .with_min(0.0)
                    .with_description("Fuel consumed per kilometre"),
                InputSpec::required(InputField::EmissionFactor, "tCO2e/L")
                    .with_min(0.0)
                    .with_description("Emission factor of the fuel type"),
            ],
            EmissionBasis::Distance {
                distance: InputField::DistanceTraveled,
                efficiency: InputField::Efficiency,
                factor: InputField::EmissionFactor,
            },
        )
    };

    vec![
        reported(
            OptionCode::Tier1a,
            "Primary Data on Actual Vehicle Fuel Consumption",
            "Primary data on actual vehicle fuel consumption",
        ),
        reported(
            OptionCode::Tier1b,
            "Primary Data on Actual Vehicle Distance Traveled",
            "Primary data on actual distance traveled plus fuel efficiency and fuel type",
        ),
        statistical(
            OptionCode::Tier2a,
            2,
            "Local Statistical Data for Distance Traveled",
            "Local statistical data on distance traveled for the vehicle type",
        ),
        statistical(
            OptionCode::Tier2b,
            3,
            "Regional Statistical Data for Distance Traveled",
            "Regional statistical data on distance traveled for the vehicle type",
        ),
    ]
}

fn vehicle_formula(
    code: OptionCode,
    score: u8,
    title: &str,
    description: &str,
    activity: Vec<InputSpec>,
    basis: EmissionBasis,
) -> FormulaDefinition {
    let mut inputs = vec![
        exposure_input(FormulaCategory::FinancedEmission, CURRENCY),
        InputSpec::required(InputField::TotalValueAtOrigination, CURRENCY)
            .with_description("Vehicle value when the loan was first approved"),
    ];
    inputs.extend(activity);
    FormulaDefinition {
        id: format!("{}-motor-vehicle", code),
        name: format!("Option {} - {} (Motor Vehicle Loan)", code, title),
        description: description.to_string(),
        category: FormulaCategory::FinancedEmission,
        asset_class: AssetClass::MotorVehicleLoan,
        option_code: code,
        data_quality_score: score,
        inputs,
        applicable_scopes: vec![ScopeType::Scope1],
        attribution: AttributionBasis::VehicleValue,
        emission_basis: basis,
    }
}

// ============================================================================
// Sovereign debt
// ============================================================================

fn sovereign_debt_formulas() -> Vec<FormulaDefinition> {
    let options = [
        (
            OptionCode::Tier1a,
            1,
            "Verified Country Emissions",
            vec![emissions_input(InputField::VerifiedCountryEmissions)
                .with_description("Verified GHG emissions of the country, reported to the UNFCCC")],
            EmissionBasis::Direct {
                emissions: InputField::VerifiedCountryEmissions,
            },
        ),
        (
            OptionCode::Tier1b,
            2,
            "Unverified Country Emissions",
            vec![emissions_input(InputField::UnverifiedCountryEmissions)
                .with_description("Unverified GHG emissions of the country")],
            EmissionBasis::Direct {
                emissions: InputField::UnverifiedCountryEmissions,
            },
        ),
        (
            OptionCode::Tier2a,
            3,
            "Energy Consumption Data",
            vec![
                InputSpec::required(InputField::EnergyConsumption, "MWh")
                    .with_min(0.0)
                    .with_description("National energy consumption"),
                InputSpec::required(InputField::EmissionFactor, "tCO2e/MWh")
                    .with_min(0.0)
                    .with_description("National energy-mix emission factor"),
            ],
            EmissionBasis::Energy {
                consumption: InputField::EnergyConsumption,
                factor: InputField::EmissionFactor,
            },
        ),
    ];

    options
        .into_iter()
        .map(|(code, score, title, activity, basis)| {
            let mut inputs = vec![
                exposure_input(FormulaCategory::FinancedEmission, PROPERTY_CURRENCY),
                InputSpec::required(InputField::PppAdjustmentFactor, "ratio")
                    .with_min(0.0)
                    .with_description("Purchasing power parity adjustment factor for the country"),
                InputSpec::required(InputField::Gdp, PROPERTY_CURRENCY)
                    .with_min(0.0)
                    .with_description("Gross domestic product of the country in nominal terms"),
            ];
            inputs.extend(activity);
            FormulaDefinition {
                id: format!("{}-sovereign-debt", code),
                name: format!("Option {} - {} (Sovereign Debt)", code, title),
                description: format!("{} attributed on PPP-adjusted GDP", title),
                category: FormulaCategory::FinancedEmission,
                asset_class: AssetClass::SovereignDebt,
                option_code: code,
                data_quality_score: score,
                inputs,
                applicable_scopes: ScopeType::ALL.to_vec(),
                attribution: AttributionBasis::SovereignGdp,
                emission_basis: basis,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn find<'a>(formulas: &'a [FormulaDefinition], id: &str) -> &'a FormulaDefinition {
        formulas.iter().find(|f| f.id == id).unwrap()
    }

    #[test]
    fn test_catalogue_size_and_unique_ids() {
        let formulas = standard_formulas();
        assert_eq!(formulas.len(), 35);
        let ids: HashSet<&str> = formulas.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), formulas.len());
    }

    #[test]
    fn test_listed_and_unlisted_variants_share_template() {
        let formulas = standard_formulas();
        let listed = find(&formulas, "2a-listed-equity");
        let unlisted = find(&formulas, "2a-unlisted-equity");
        assert_eq!(listed.inputs, unlisted.inputs);
        assert_eq!(listed.emission_basis, unlisted.emission_basis);
        assert_eq!(listed.name, "Option 2a - Energy Consumption Data (Listed)");
        assert_eq!(
            unlisted.name,
            "Option 2a - Energy Consumption Data (Unlisted/Private)"
        );
    }

    #[test]
    fn test_facilitated_ids_and_weighting_range() {
        let formulas = standard_formulas();
        for id in [
            "1a-facilitated-verified-listed",
            "1b-facilitated-unverified-unlisted",
            "2a-facilitated-energy-listed",
            "2b-facilitated-production-unlisted",
        ] {
            let formula = find(&formulas, id);
            assert!(formula.is_facilitated());
            let weighting = formula.input(InputField::WeightingFactor).unwrap();
            assert!(weighting.required);
            assert_eq!(weighting.min, Some(0.0));
            assert_eq!(weighting.max, Some(1.0));
        }
        assert_eq!(
            find(&formulas, "1a-facilitated-verified-listed").name,
            "Option 1a - Verified GHG Emissions (Facilitated - Listed)"
        );
    }

    #[test]
    fn test_real_estate_units_follow_property_kind() {
        let formulas = standard_formulas();
        let cre = find(&formulas, "1a-commercial-real-estate");
        let mortgage = find(&formulas, "1a-mortgage");
        assert_eq!(cre.input(InputField::ActualEnergyConsumption).unwrap().unit, "kWh");
        assert_eq!(
            mortgage.input(InputField::ActualEnergyConsumption).unwrap().unit,
            "MWh"
        );
        assert_eq!(find(&formulas, "2b-mortgage").data_quality_score, 4);
        assert_eq!(
            find(&formulas, "2b-commercial-real-estate").name,
            "Option 2b - Estimated Energy Consumption from Statistics (Commercial Real Estate)"
        );
    }

    #[test]
    fn test_motor_vehicle_scores() {
        let formulas = standard_formulas();
        let scores: Vec<u8> = ["1a", "1b", "2a", "2b"]
            .iter()
            .map(|code| find(&formulas, &format!("{}-motor-vehicle", code)).data_quality_score)
            .collect();
        assert_eq!(scores, vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_sovereign_debt_has_three_options() {
        let formulas = standard_formulas();
        let count = formulas
            .iter()
            .filter(|f| f.asset_class == AssetClass::SovereignDebt)
            .count();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_sovereign_debt_declares_gdp_operands() {
        let formulas = standard_formulas();
        let sovereign = find(&formulas, "1a-sovereign-debt");
        assert!(sovereign.declares(InputField::PppAdjustmentFactor));
        assert!(sovereign.declares(InputField::Gdp));
        assert!(!sovereign.declares(InputField::PppAdjustedGdp));
        assert_eq!(
            sovereign.emission_basis,
            EmissionBasis::Direct {
                emissions: InputField::VerifiedCountryEmissions
            }
        );
    }
}
