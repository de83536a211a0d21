//! # PCAF Scenario
//!
//! Sector-multiplier climate stress testing for financed portfolios.
//!
//! Each portfolio entry carries a sector, an exposure and a baseline loss.
//! A scenario scales the baseline loss by a sector-specific multiplier and
//! the engine reports per-entry and aggregate stressed losses.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             pcaf_scenario               │
//! ├─────────────────────────────────────────┤
//! │  presets     - ScenarioType             │
//! │  sectors     - SectorProfile impacts    │
//! │  multipliers - SectorMultiplierTable    │
//! │  engine      - ScenarioEngine, results  │
//! │  parallel    - order-preserving map     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Scenarios
//!
//! | Scenario           | Multiplier                                 |
//! |--------------------|--------------------------------------------|
//! | `baseline`         | 1                                          |
//! | `transition_shock` | 1 + transition impact                      |
//! | `physical_shock`   | 1 + physical impact                        |
//! | `dual_stress`      | 1 + transition impact + physical impact    |
//!
//! ## Example
//!
//! ```
//! use pcaf_scenario::{ScenarioEngine, ScenarioEntry, ScenarioType};
//!
//! let engine = ScenarioEngine::standard();
//! let portfolio = vec![ScenarioEntry::new("manufacturing", 10_000.0, 100.0)];
//! let outcome = engine.run(&portfolio, ScenarioType::TransitionShock).unwrap();
//! assert!((outcome.total_stressed_loss - 110.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod multipliers;
pub mod parallel;
pub mod presets;
pub mod sectors;

pub use engine::{
    ScenarioEngine, ScenarioEntry, ScenarioOutcome, ScenarioResult, SectorBreakdown,
    StressedEntry, TOP_EXPOSURE_COUNT,
};
pub use error::ScenarioError;
pub use multipliers::SectorMultiplierTable;
pub use parallel::ParallelConfig;
pub use presets::ScenarioType;
pub use sectors::{standard_sectors, PhysicalImpact, SectorProfile, TransitionImpact};
