//! Sector × scenario stress multiplier table.
//!
//! The table is built once and shared read-only. A lookup for a pair that
//! was never inserted returns `None`; there is no implicit default.

use std::collections::HashMap;

use crate::presets::ScenarioType;
use crate::sectors::{standard_sectors, SectorProfile};

/// Read-only map from `(sector, scenario)` to stress multiplier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorMultiplierTable {
    entries: HashMap<String, HashMap<ScenarioType, f64>>,
}

impl SectorMultiplierTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table derived from the standard sector profiles.
    pub fn standard() -> Self {
        Self::from_profiles(&standard_sectors())
    }

    /// Derives every scenario multiplier for each profile.
    pub fn from_profiles(profiles: &[SectorProfile]) -> Self {
        let mut table = Self::new();
        for profile in profiles {
            for scenario in ScenarioType::ALL {
                table.insert(profile.id.clone(), scenario, profile.multiplier(scenario));
            }
        }
        table
    }

    /// Builds a table from explicit entries.
    pub fn from_entries<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, ScenarioType, f64)>,
    ) -> Self {
        let mut table = Self::new();
        for (sector, scenario, multiplier) in entries {
            table.insert(sector, scenario, multiplier);
        }
        table
    }

    /// Sets the multiplier for a pair, replacing any previous value.
    pub fn insert(&mut self, sector: impl Into<String>, scenario: ScenarioType, multiplier: f64) {
        self.entries
            .entry(sector.into())
            .or_default()
            .insert(scenario, multiplier);
    }

    /// Multiplier for a pair, if one was defined.
    pub fn get(&self, sector: &str, scenario: ScenarioType) -> Option<f64> {
        self.entries
            .get(sector)
            .and_then(|by_scenario| by_scenario.get(&scenario))
            .copied()
    }

    /// Whether any multiplier exists for the sector.
    pub fn contains_sector(&self, sector: &str) -> bool {
        self.entries.contains_key(sector)
    }

    /// Sector identifiers, sorted.
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        sectors.sort_unstable();
        sectors
    }

    /// Number of `(sector, scenario)` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
