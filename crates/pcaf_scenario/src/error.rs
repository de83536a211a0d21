//! Error types for scenario evaluation.

use thiserror::Error;

/// Reasons a scenario run cannot produce a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    /// The portfolio contained no entries.
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// The scenario type is not recognised.
    #[error("Unknown scenario type: {0}")]
    UnknownScenario(String),

    /// An entry carries an unusable amount.
    #[error("Invalid entry {index} ({sector}): {reason}")]
    InvalidEntry {
        /// Zero-based position in the portfolio.
        index: usize,
        /// Sector of the offending entry.
        sector: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No multiplier exists for the (sector, scenario) pair.
    #[error("No multiplier for sector '{sector}' under scenario '{scenario}'")]
    MissingMultiplier {
        /// Sector identifier.
        sector: String,
        /// Scenario identifier.
        scenario: String,
    },
}
