//! Classification enums shared by formula definitions and results.
//!
//! All enums serialise in `snake_case` so that they round-trip through the
//! JSON transport unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::InputField;
use crate::error::ValidationError;

/// Whether a formula measures financed or facilitated emissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaCategory {
    /// Emissions attributable to loans and investments on the balance sheet.
    FinancedEmission,
    /// Emissions attributable to capital-markets underwriting and issuance.
    FacilitatedEmission,
}

impl FormulaCategory {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaCategory::FinancedEmission => "financed_emission",
            FormulaCategory::FacilitatedEmission => "facilitated_emission",
        }
    }

    /// Input field holding the exposure amount for this category.
    pub fn exposure_field(&self) -> InputField {
        match self {
            FormulaCategory::FinancedEmission => InputField::OutstandingAmount,
            FormulaCategory::FacilitatedEmission => InputField::FacilitatedAmount,
        }
    }
}

impl fmt::Display for FormulaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormulaCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "financed_emission" | "financed" => Ok(FormulaCategory::FinancedEmission),
            "facilitated_emission" | "facilitated" => Ok(FormulaCategory::FacilitatedEmission),
            other => Err(format!("Unknown formula category: {}", other)),
        }
    }
}

/// Greenhouse-gas emission scopes a formula covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScopeType {
    /// Direct emissions.
    #[serde(rename = "scope1")]
    Scope1,
    /// Indirect emissions from purchased energy.
    #[serde(rename = "scope2")]
    Scope2,
    /// Other value-chain emissions.
    #[serde(rename = "scope3")]
    Scope3,
}

impl ScopeType {
    /// Scope 1 and 2 only.
    pub const OPERATIONAL: &'static [ScopeType] = &[ScopeType::Scope1, ScopeType::Scope2];
    /// All three scopes.
    pub const ALL: &'static [ScopeType] = &[ScopeType::Scope1, ScopeType::Scope2, ScopeType::Scope3];
}

/// Listed or unlisted (private) counterparty.
///
/// Selects the company-value denominator used by corporate attribution.
/// Deserialisation goes through [`FromStr`], so wire values are
/// case-insensitive and accept `private` for unlisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CompanyType {
    /// Publicly listed company, attributed on EVIC.
    #[default]
    Listed,
    /// Unlisted or private company, attributed on total equity plus debt.
    Unlisted,
}

impl CompanyType {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Listed => "listed",
            CompanyType::Unlisted => "unlisted",
        }
    }

    /// Company-value field used as the attribution denominator.
    pub fn company_value_field(&self) -> InputField {
        match self {
            CompanyType::Listed => InputField::Evic,
            CompanyType::Unlisted => InputField::TotalEquityPlusDebt,
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for CompanyType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for CompanyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listed" => Ok(CompanyType::Listed),
            "unlisted" | "private" => Ok(CompanyType::Unlisted),
            _ => Err(ValidationError::UnknownCompanyType(s.to_string())),
        }
    }
}

/// Asset class a formula applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Listed equity, corporate bonds, business loans and unlisted equity.
    CorporateFinance,
    /// Commercial real estate.
    CommercialRealEstate,
    /// Residential mortgages.
    Mortgage,
    /// Motor vehicle loans.
    MotorVehicleLoan,
    /// Project finance.
    ProjectFinance,
    /// Sovereign debt.
    SovereignDebt,
    /// Capital-markets issuance facilitated by the institution.
    CapitalMarkets,
}

impl AssetClass {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::CorporateFinance => "corporate_finance",
            AssetClass::CommercialRealEstate => "commercial_real_estate",
            AssetClass::Mortgage => "mortgage",
            AssetClass::MotorVehicleLoan => "motor_vehicle_loan",
            AssetClass::ProjectFinance => "project_finance",
            AssetClass::SovereignDebt => "sovereign_debt",
            AssetClass::CapitalMarkets => "capital_markets",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Methodology tier of a formula.
///
/// Option 1 uses reported emissions (1a verified, 1b unverified); option 2
/// estimates from physical activity (2a energy, 2b production or statistics).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionCode {
    /// Option 1a.
    #[serde(rename = "1a")]
    Tier1a,
    /// Option 1b.
    #[serde(rename = "1b")]
    Tier1b,
    /// Option 2a.
    #[serde(rename = "2a")]
    Tier2a,
    /// Option 2b.
    #[serde(rename = "2b")]
    Tier2b,
}

impl OptionCode {
    /// Returns the code as written in formula ids (`"1a"` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionCode::Tier1a => "1a",
            OptionCode::Tier1b => "1b",
            OptionCode::Tier2a => "2a",
            OptionCode::Tier2b => "2b",
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_type_parse_case_insensitive() {
        assert_eq!("listed".parse::<CompanyType>().unwrap(), CompanyType::Listed);
        assert_eq!("LISTED".parse::<CompanyType>().unwrap(), CompanyType::Listed);
        assert_eq!("Unlisted".parse::<CompanyType>().unwrap(), CompanyType::Unlisted);
        assert_eq!("private".parse::<CompanyType>().unwrap(), CompanyType::Unlisted);
    }

    #[test]
    fn test_company_type_parse_rejects_unknown() {
        let err = "public".parse::<CompanyType>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCompanyType("public".to_string()));
    }

    #[test]
    fn test_company_type_serde_accepts_private_alias() {
        let parsed: CompanyType = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(parsed, CompanyType::Unlisted);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"unlisted\"");
    }

    #[test]
    fn test_company_type_serde_is_case_insensitive() {
        let listed: CompanyType = serde_json::from_str("\"Listed\"").unwrap();
        assert_eq!(listed, CompanyType::Listed);
        let private: CompanyType = serde_json::from_str("\" PRIVATE \"").unwrap();
        assert_eq!(private, CompanyType::Unlisted);
        let err = serde_json::from_str::<CompanyType>("\"public\"").unwrap_err();
        assert!(err.to_string().contains("public"));
    }

    #[test]
    fn test_company_value_field() {
        assert_eq!(CompanyType::Listed.company_value_field(), InputField::Evic);
        assert_eq!(
            CompanyType::Unlisted.company_value_field(),
            InputField::TotalEquityPlusDebt
        );
    }

    #[test]
    fn test_category_exposure_field() {
        assert_eq!(
            FormulaCategory::FinancedEmission.exposure_field(),
            InputField::OutstandingAmount
        );
        assert_eq!(
            FormulaCategory::FacilitatedEmission.exposure_field(),
            InputField::FacilitatedAmount
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "facilitated_emission".parse::<FormulaCategory>().unwrap(),
            FormulaCategory::FacilitatedEmission
        );
        assert!("other".parse::<FormulaCategory>().is_err());
    }

    #[test]
    fn test_option_code_serialises_as_short_code() {
        assert_eq!(serde_json::to_string(&OptionCode::Tier2b).unwrap(), "\"2b\"");
        assert_eq!(OptionCode::Tier1a.to_string(), "1a");
    }

    #[test]
    fn test_scope_sets() {
        assert_eq!(ScopeType::OPERATIONAL.len(), 2);
        assert_eq!(ScopeType::ALL.len(), 3);
    }
}
