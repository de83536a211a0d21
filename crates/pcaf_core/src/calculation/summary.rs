//! Reader-facing digest of a calculation result.
//!
//! ```text
//! score  label
//!   1    Excellent (Verified Data)
//!   2    Good (Unverified Data)
//!   3    Fair (Activity Data)
//!   4    Poor (Sector Data)
//!   5    Very Poor (Estimated Data)
//! ```

use serde::{Deserialize, Serialize};

use super::result::CalculationResult;

/// Attribution factors above this share of the counterparty are flagged.
pub const HIGH_ATTRIBUTION_FACTOR: f64 = 0.5;

/// Headline figures of a result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// Attribution factor.
    pub attribution_factor: f64,
    /// Emission factor applied.
    pub emission_factor: f64,
    /// Attributed emissions in tCO2e.
    pub financed_emissions: f64,
}

/// Quality label, headline figures and recommendations for one result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    /// Label for the data quality score.
    pub data_quality: String,
    /// Formula display name.
    pub methodology: String,
    /// Headline figures.
    pub key_metrics: KeyMetrics,
    /// Suggested follow-ups, possibly empty.
    pub recommendations: Vec<String>,
}

/// Label for a data quality score; `"Unknown"` outside 1..=5.
pub fn data_quality_label(score: u8) -> &'static str {
    match score {
        1 => "Excellent (Verified Data)",
        2 => "Good (Unverified Data)",
        3 => "Fair (Activity Data)",
        4 => "Poor (Sector Data)",
        5 => "Very Poor (Estimated Data)",
        _ => "Unknown",
    }
}

/// Summarises a result.
pub fn summarize(result: &CalculationResult) -> CalculationSummary {
    let mut recommendations = Vec::new();
    if result.data_quality_score > 2 {
        recommendations.push(
            "Consider collecting more detailed company-specific data to improve accuracy"
                .to_string(),
        );
    }
    if result.data_quality_score > 3 {
        recommendations
            .push("This calculation has significant uncertainty - use with caution".to_string());
    }
    if result.attribution_factor > HIGH_ATTRIBUTION_FACTOR {
        recommendations.push(
            "High attribution factor - this represents a significant portion of the company"
                .to_string(),
        );
    }

    CalculationSummary {
        data_quality: data_quality_label(result.data_quality_score).to_string(),
        methodology: result.methodology.clone(),
        key_metrics: KeyMetrics {
            attribution_factor: result.attribution_factor,
            emission_factor: result.emission_factor,
            financed_emissions: result.financed_emissions,
        },
        recommendations,
    }
}
