//! Climate stress scenario types.
//!
//! - Baseline: normal macro conditions, no additional carbon tax
//! - Transition shock: rapid policy enforcement, sudden carbon tax
//! - Physical shock: major weather events, flooding, heat
//! - Dual stress: transition and physical stress together

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Supported climate stress scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioType {
    /// Control scenario.
    Baseline,
    /// Policy and market transition shock.
    TransitionShock,
    /// Acute and chronic physical climate shock.
    PhysicalShock,
    /// Combined transition and physical shock.
    DualStress,
}

impl ScenarioType {
    /// Every scenario type.
    pub const ALL: [ScenarioType; 4] = [
        ScenarioType::Baseline,
        ScenarioType::TransitionShock,
        ScenarioType::PhysicalShock,
        ScenarioType::DualStress,
    ];

    /// Identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::TransitionShock => "transition_shock",
            Self::PhysicalShock => "physical_shock",
            Self::DualStress => "dual_stress",
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Baseline => "Baseline (2025–2030)",
            Self::TransitionShock => "Transition Shock",
            Self::PhysicalShock => "Physical Shock",
            Self::DualStress => "Dual Stress",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Baseline => "Normal macro conditions; no additional carbon tax",
            Self::TransitionShock => {
                "Rapid climate policy enforcement; sudden carbon tax, stranded assets"
            }
            Self::PhysicalShock => "Major weather shocks; temperature rise, flooding",
            Self::DualStress => "Transition and physical stress together",
        }
    }

    /// Whether transition impacts apply.
    #[inline]
    pub fn includes_transition(&self) -> bool {
        matches!(self, Self::TransitionShock | Self::DualStress)
    }

    /// Whether physical impacts apply.
    #[inline]
    pub fn includes_physical(&self) -> bool {
        matches!(self, Self::PhysicalShock | Self::DualStress)
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScenarioType {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_types() {
        for scenario in ScenarioType::ALL {
            assert_eq!(scenario.as_str().parse::<ScenarioType>().unwrap(), scenario);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "zombie_apocalypse".parse::<ScenarioType>().unwrap_err(),
            ScenarioError::UnknownScenario("zombie_apocalypse".to_string())
        );
    }

    #[test]
    fn test_component_flags() {
        assert!(!ScenarioType::Baseline.includes_transition());
        assert!(!ScenarioType::Baseline.includes_physical());
        assert!(ScenarioType::TransitionShock.includes_transition());
        assert!(!ScenarioType::TransitionShock.includes_physical());
        assert!(ScenarioType::DualStress.includes_transition());
        assert!(ScenarioType::DualStress.includes_physical());
    }

    #[test]
    fn test_names() {
        assert_eq!(ScenarioType::PhysicalShock.name(), "Physical Shock");
        assert!(ScenarioType::TransitionShock
            .description()
            .contains("carbon tax"));
    }
}
