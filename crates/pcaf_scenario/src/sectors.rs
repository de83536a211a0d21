//! Sector impact profiles.
//!
//! Each profile records the percentage impacts a sector suffers under
//! transition and physical climate stress. Multipliers are derived from
//! these impacts:
//!
//! ```text
//! transition rate = (|revenue change| + |cost increase| + |demand change|) / 100
//! physical rate   = (damage + efficiency loss + output loss) / 100
//!
//! baseline         = 1
//! transition_shock = 1 + transition rate
//! physical_shock   = 1 + physical rate
//! dual_stress      = 1 + transition rate + physical rate
//! ```
//!
//! Stranded-asset share is reported but does not enter the multiplier.

use serde::{Deserialize, Serialize};

use crate::presets::ScenarioType;

/// Transition-risk impacts in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionImpact {
    /// Revenue change (negative for a decline).
    pub revenue_change: f64,
    /// Share of assets at risk of stranding.
    pub stranded_assets: f64,
    /// Operating cost increase.
    pub cost_increase: f64,
    /// Demand change (negative for a decline).
    pub demand_change: f64,
}

impl TransitionImpact {
    /// Sum of absolute loss drivers in percent.
    pub fn loss_percent(&self) -> f64 {
        self.revenue_change.abs() + self.cost_increase.abs() + self.demand_change.abs()
    }
}

/// Physical-risk impacts in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalImpact {
    /// Physical asset damage.
    pub damage: f64,
    /// Operational efficiency loss.
    pub efficiency_loss: f64,
    /// Output or yield loss.
    pub output_loss: f64,
}

impl PhysicalImpact {
    /// Sum of absolute loss drivers in percent.
    pub fn loss_percent(&self) -> f64 {
        self.damage.abs() + self.efficiency_loss.abs() + self.output_loss.abs()
    }
}

/// Climate impact profile of one sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorProfile {
    /// Sector identifier, e.g. `"oil_gas"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Transition impacts.
    pub transition: TransitionImpact,
    /// Physical impacts.
    pub physical: PhysicalImpact,
    /// Typical baseline portfolio loss in percent of exposure.
    pub estimated_portfolio_loss: f64,
}

impl SectorProfile {
    /// Stress multiplier applied to baseline loss under `scenario`.
    ///
    /// Baseline applies no stress, so its multiplier is always 1.0;
    /// `estimated_portfolio_loss` is descriptive and never scales losses.
    pub fn multiplier(&self, scenario: ScenarioType) -> f64 {
        let mut percent = 0.0;
        if scenario.includes_transition() {
            percent += self.transition.loss_percent();
        }
        if scenario.includes_physical() {
            percent += self.physical.loss_percent();
        }
        1.0 + percent / 100.0
    }
}

fn profile(
    id: &str,
    name: &str,
    (revenue_change, stranded_assets, cost_increase, demand_change): (f64, f64, f64, f64),
    (damage, efficiency_loss, output_loss): (f64, f64, f64),
    estimated_portfolio_loss: f64,
) -> SectorProfile {
    SectorProfile {
        id: id.to_string(),
        name: name.to_string(),
        transition: TransitionImpact {
            revenue_change,
            stranded_assets,
            cost_increase,
            demand_change,
        },
        physical: PhysicalImpact {
            damage,
            efficiency_loss,
            output_loss,
        },
        estimated_portfolio_loss,
    }
}

/// Standard sector profiles.
pub fn standard_sectors() -> Vec<SectorProfile> {
    vec![
        profile("oil_gas", "Oil & Gas", (-25.0, 30.0, 0.0, 0.0), (10.0, 0.0, 0.0), 3.5),
        profile(
            "power_fossil",
            "Power Generation (Fossil)",
            (0.0, 0.0, 20.0, -15.0),
            (0.0, 5.0, 0.0),
            2.5,
        ),
        profile(
            "power_renewable",
            "Power Generation (Renewable)",
            (0.0, 0.0, 0.0, 0.0),
            (0.0, 0.0, 5.0),
            0.5,
        ),
        profile("steel_cement", "Steel & Cement", (0.0, 0.0, 20.0, 0.0), (0.0, 0.0, 0.0), 2.0),
        profile(
            "chemicals",
            "Chemicals & Fertilizers",
            (0.0, 0.0, 15.0, 0.0),
            (10.0, 0.0, 0.0),
            1.5,
        ),
        profile("agriculture", "Agriculture", (0.0, 0.0, 10.0, 0.0), (0.0, 0.0, 25.0), 2.5),
        profile("livestock", "Livestock", (0.0, 0.0, 10.0, 0.0), (0.0, 0.0, 15.0), 1.8),
        profile("forestry", "Forestry & Pulp", (-10.0, 0.0, 0.0, 0.0), (0.0, 0.0, 20.0), 2.0),
        profile(
            "real_estate",
            "Real Estate (Commercial & Residential)",
            (0.0, 0.0, 15.0, 0.0),
            (20.0, 0.0, 0.0),
            2.5,
        ),
        profile("construction", "Construction", (0.0, 0.0, 15.0, 0.0), (0.0, 0.0, 10.0), 1.2),
        profile(
            "transport",
            "Transport (Road, Rail, Shipping, Aviation)",
            (0.0, 0.0, 20.0, 0.0),
            (0.0, 0.0, 0.0),
            1.8,
        ),
        profile("manufacturing", "Manufacturing", (0.0, 0.0, 10.0, 0.0), (5.0, 0.0, 0.0), 1.0),
        profile("retail", "Retail", (0.0, 0.0, 10.0, 0.0), (0.0, 0.0, 0.0), 0.8),
        profile(
            "food_processing",
            "Food Processing",
            (0.0, 0.0, 10.0, 0.0),
            (20.0, 0.0, 0.0),
            2.0,
        ),
        profile("banking_finance", "Banking / Finance", (0.0, 0.0, 0.0, 0.0), (5.0, 0.0, 0.0), 0.5),
        profile("insurance", "Insurance", (0.0, 0.0, 20.0, 0.0), (30.0, 0.0, 0.0), 1.5),
        profile(
            "sovereign_public",
            "Sovereign / Public Sector",
            (-2.0, 0.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            0.7,
        ),
    ]
}
