//! Scenario execution engine.
//!
//! Applies sector stress multipliers to each portfolio entry and aggregates
//! the resulting losses:
//!
//! ```text
//! stressed_loss_i = baseline_loss_i × multiplier(sector_i, scenario)
//! increase %      = (Σ stressed − Σ baseline) / Σ baseline × 100   (0 when Σ baseline = 0)
//! ```
//!
//! [`ScenarioEngine::run`] is the typed entry point. [`ScenarioEngine::calculate_scenario`]
//! wraps it for callers that expect a result object with a `success` flag
//! rather than an `Err`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScenarioError;
use crate::multipliers::SectorMultiplierTable;
use crate::parallel::ParallelConfig;
use crate::presets::ScenarioType;

/// Number of entries reported in [`ScenarioOutcome::top_exposures`].
pub const TOP_EXPOSURE_COUNT: usize = 5;

/// One portfolio line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    /// Sector identifier.
    pub sector: String,
    /// Exposure amount.
    pub exposure: f64,
    /// Loss measure before stress.
    pub baseline_loss: f64,
}

impl ScenarioEntry {
    /// Creates an entry.
    pub fn new(sector: impl Into<String>, exposure: f64, baseline_loss: f64) -> Self {
        Self {
            sector: sector.into(),
            exposure,
            baseline_loss,
        }
    }

    fn check(&self, index: usize) -> Result<(), ScenarioError> {
        let invalid = |reason: String| ScenarioError::InvalidEntry {
            index,
            sector: self.sector.clone(),
            reason,
        };
        for (name, value) in [("exposure", self.exposure), ("baseline_loss", self.baseline_loss)] {
            if !value.is_finite() {
                return Err(invalid(format!("{} must be finite", name)));
            }
            if value < 0.0 {
                return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        Ok(())
    }
}

/// Stressed loss for one portfolio line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressedEntry {
    /// Position in the submitted portfolio.
    pub index: usize,
    /// Sector identifier.
    pub sector: String,
    /// Exposure amount.
    pub exposure: f64,
    /// Loss before stress.
    pub baseline_loss: f64,
    /// Multiplier applied.
    pub multiplier: f64,
    /// `baseline_loss × multiplier`.
    pub stressed_loss: f64,
    /// `stressed_loss − baseline_loss`.
    pub loss_increase: f64,
}

/// Losses aggregated per sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorBreakdown {
    /// Sector identifier.
    pub sector: String,
    /// Number of entries in the sector.
    pub entry_count: usize,
    /// Total exposure.
    pub exposure: f64,
    /// Total baseline loss.
    pub baseline_loss: f64,
    /// Total stressed loss.
    pub stressed_loss: f64,
    /// Loss increase relative to baseline, in percent.
    pub loss_increase_percentage: f64,
}

/// Successful scenario evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario evaluated.
    pub scenario_type: ScenarioType,
    /// Per-entry breakdown in portfolio order.
    pub entries: Vec<StressedEntry>,
    /// Per-sector aggregates in first-seen order.
    pub sector_breakdown: Vec<SectorBreakdown>,
    /// Entries with the largest loss increase, descending.
    pub top_exposures: Vec<StressedEntry>,
    /// Σ exposure.
    pub total_exposure: f64,
    /// Σ baseline loss.
    pub total_baseline_loss: f64,
    /// Σ stressed loss.
    pub total_stressed_loss: f64,
    /// Aggregate loss increase in percent.
    pub total_loss_increase_percentage: f64,
}

/// Result object returned by [`ScenarioEngine::calculate_scenario`].
///
/// `error` is present iff `success` is false; numeric fields are zero and
/// collections empty on failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Whether the scenario was evaluated.
    pub success: bool,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Scenario identifier as requested.
    pub scenario_type: String,
    /// Display name, when the scenario is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    /// Per-entry breakdown.
    pub entries: Vec<StressedEntry>,
    /// Per-sector aggregates.
    pub sector_breakdown: Vec<SectorBreakdown>,
    /// Largest loss increases.
    pub top_exposures: Vec<StressedEntry>,
    /// Σ exposure.
    pub total_exposure: f64,
    /// Σ baseline loss.
    pub total_baseline_loss: f64,
    /// Σ stressed loss.
    pub total_stressed_loss: f64,
    /// Aggregate loss increase in percent.
    pub total_loss_increase_percentage: f64,
}

impl ScenarioResult {
    /// Failed result carrying the error message.
    pub fn failure(scenario_type: impl Into<String>, error: &ScenarioError) -> Self {
        let scenario_type = scenario_type.into();
        let scenario_name = scenario_type
            .parse::<ScenarioType>()
            .ok()
            .map(|t| t.name().to_string());
        Self {
            success: false,
            error: Some(error.to_string()),
            scenario_type,
            scenario_name,
            entries: Vec::new(),
            sector_breakdown: Vec::new(),
            top_exposures: Vec::new(),
            total_exposure: 0.0,
            total_baseline_loss: 0.0,
            total_stressed_loss: 0.0,
            total_loss_increase_percentage: 0.0,
        }
    }
}

impl From<ScenarioOutcome> for ScenarioResult {
    fn from(outcome: ScenarioOutcome) -> Self {
        Self {
            success: true,
            error: None,
            scenario_type: outcome.scenario_type.as_str().to_string(),
            scenario_name: Some(outcome.scenario_type.name().to_string()),
            entries: outcome.entries,
            sector_breakdown: outcome.sector_breakdown,
            top_exposures: outcome.top_exposures,
            total_exposure: outcome.total_exposure,
            total_baseline_loss: outcome.total_baseline_loss,
            total_stressed_loss: outcome.total_stressed_loss,
            total_loss_increase_percentage: outcome.total_loss_increase_percentage,
        }
    }
}

/// Percentage increase guarded against a zero base.
fn increase_percentage(baseline: f64, stressed: f64) -> f64 {
    if baseline != 0.0 {
        (stressed - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

/// Engine for stress-testing portfolios against climate scenarios.
///
/// # Example
///
/// ```
/// use pcaf_scenario::{ScenarioEngine, ScenarioEntry};
///
/// let engine = ScenarioEngine::standard();
/// let entries = vec![
///     ScenarioEntry::new("manufacturing", 10_000.0, 100.0),
///     ScenarioEntry::new("steel_cement", 20_000.0, 200.0),
/// ];
/// let result = engine.calculate_scenario(&entries, "transition_shock");
/// assert!(result.success);
/// assert!((result.total_loss_increase_percentage - 50.0 / 3.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioEngine {
    multipliers: Arc<SectorMultiplierTable>,
    parallel: ParallelConfig,
}

impl Default for ScenarioEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScenarioEngine {
    /// Creates an engine over a shared multiplier table.
    pub fn new(multipliers: Arc<SectorMultiplierTable>) -> Self {
        Self {
            multipliers,
            parallel: ParallelConfig::default(),
        }
    }

    /// Creates an engine over the standard multiplier table.
    pub fn standard() -> Self {
        Self::new(Arc::new(SectorMultiplierTable::standard()))
    }

    /// Overrides the parallel execution configuration.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Multiplier table in use.
    pub fn multipliers(&self) -> &SectorMultiplierTable {
        &self.multipliers
    }

    /// Parallel execution configuration in use.
    pub fn parallel_config(&self) -> ParallelConfig {
        self.parallel
    }

    /// Evaluates a scenario over a portfolio.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::EmptyPortfolio`] when `entries` is empty
    /// - [`ScenarioError::InvalidEntry`] for a negative or non-finite amount
    /// - [`ScenarioError::MissingMultiplier`] when a sector has no multiplier
    ///   for the scenario
    ///
    /// When several entries fail, the one with the lowest index is reported.
    pub fn run(
        &self,
        entries: &[ScenarioEntry],
        scenario: ScenarioType,
    ) -> Result<ScenarioOutcome, ScenarioError> {
        if entries.is_empty() {
            return Err(ScenarioError::EmptyPortfolio);
        }

        let stressed = self
            .parallel
            .map(entries, |index, entry| self.stress_entry(index, entry, scenario))
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let mut total_exposure = 0.0;
        let mut total_baseline_loss = 0.0;
        let mut total_stressed_loss = 0.0;
        let mut sector_breakdown: Vec<SectorBreakdown> = Vec::new();
        let mut sector_index: HashMap<&str, usize> = HashMap::new();

        for entry in &stressed {
            total_exposure += entry.exposure;
            total_baseline_loss += entry.baseline_loss;
            total_stressed_loss += entry.stressed_loss;

            let position = *sector_index.entry(entry.sector.as_str()).or_insert_with(|| {
                sector_breakdown.push(SectorBreakdown {
                    sector: entry.sector.clone(),
                    entry_count: 0,
                    exposure: 0.0,
                    baseline_loss: 0.0,
                    stressed_loss: 0.0,
                    loss_increase_percentage: 0.0,
                });
                sector_breakdown.len() - 1
            });
            let sector = &mut sector_breakdown[position];
            sector.entry_count += 1;
            sector.exposure += entry.exposure;
            sector.baseline_loss += entry.baseline_loss;
            sector.stressed_loss += entry.stressed_loss;
        }

        for sector in &mut sector_breakdown {
            sector.loss_increase_percentage =
                increase_percentage(sector.baseline_loss, sector.stressed_loss);
        }

        let mut top_exposures = stressed.clone();
        top_exposures.sort_by(|a, b| b.loss_increase.total_cmp(&a.loss_increase));
        top_exposures.truncate(TOP_EXPOSURE_COUNT);

        Ok(ScenarioOutcome {
            scenario_type: scenario,
            entries: stressed,
            sector_breakdown,
            top_exposures,
            total_exposure,
            total_baseline_loss,
            total_stressed_loss,
            total_loss_increase_percentage: increase_percentage(
                total_baseline_loss,
                total_stressed_loss,
            ),
        })
    }

    /// Evaluates a scenario given by identifier; never returns `Err`.
    ///
    /// Failures are reported through `success = false` and `error`.
    pub fn calculate_scenario(&self, entries: &[ScenarioEntry], scenario_type: &str) -> ScenarioResult {
        let outcome = scenario_type
            .parse::<ScenarioType>()
            .and_then(|scenario| self.run(entries, scenario));

        match outcome {
            Ok(outcome) => {
                debug!(
                    scenario = %outcome.scenario_type,
                    entries = outcome.entries.len(),
                    increase_pct = outcome.total_loss_increase_percentage,
                    "scenario evaluated"
                );
                outcome.into()
            }
            Err(error) => {
                warn!(scenario = scenario_type, error = %error, "scenario failed");
                ScenarioResult::failure(scenario_type, &error)
            }
        }
    }

    fn stress_entry(
        &self,
        index: usize,
        entry: &ScenarioEntry,
        scenario: ScenarioType,
    ) -> Result<StressedEntry, ScenarioError> {
        entry.check(index)?;
        let multiplier = self
            .multipliers
            .get(&entry.sector, scenario)
            .ok_or_else(|| ScenarioError::MissingMultiplier {
                sector: entry.sector.clone(),
                scenario: scenario.as_str().to_string(),
            })?;
        let stressed_loss = entry.baseline_loss * multiplier;
        Ok(StressedEntry {
            index,
            sector: entry.sector.clone(),
            exposure: entry.exposure,
            baseline_loss: entry.baseline_loss,
            multiplier,
            stressed_loss,
            loss_increase: stressed_loss - entry.baseline_loss,
        })
    }
}
