//! Emission quantity resolution.
//!
//! ```text
//! Direct       : financed = af × emissions
//! Energy       : financed = af × (consumption × factor)
//! Production   : financed = af × (volume × factor)
//! Floor area   : financed = af × ((intensity × floor_area) × factor)
//! Distance     : financed = af × ((distance × efficiency) × factor)
//! Facilitated  : financed = af × weighting × quantity
//! ```
//!
//! Each intermediate value is appended to the audit trail in the order it is
//! computed, so the final figure can be re-derived from the steps alone.

use crate::error::CalculationError;
use crate::formula::{ComputationMode, EmissionBasis, FormulaDefinition, InputField};

use super::attribution::Attribution;
use super::result::CalculationStep;
use super::validator::ValidatedInputs;

/// Outcome of the emission computation, including the full audit trail.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionOutcome {
    /// Emission factor applied; `1.0` for direct reported emissions.
    pub emission_factor: f64,
    /// Attributed emissions in tCO2e.
    pub financed_emissions: f64,
    /// Computation mode used.
    pub mode: ComputationMode,
    /// Weighting factor, for facilitated formulas.
    pub weighting_factor: Option<f64>,
    /// Audit trail, starting with the attribution steps.
    pub steps: Vec<CalculationStep>,
}

/// Running audit trail for one computation.
struct Trail<'a> {
    definition: &'a FormulaDefinition,
    inputs: &'a ValidatedInputs,
    steps: Vec<CalculationStep>,
}

impl<'a> Trail<'a> {
    fn read(&mut self, field: InputField) -> Result<f64, CalculationError> {
        let value = self.inputs.require(field)?;
        let unit = self
            .definition
            .input(field)
            .map(|spec| spec.unit.as_str())
            .unwrap_or("");
        self.steps.push(CalculationStep::input(field, value, unit));
        Ok(value)
    }

    fn product(&mut self, description: &str, lhs: f64, rhs: f64) -> f64 {
        let value = lhs * rhs;
        self.steps.push(CalculationStep::new(
            description,
            value,
            format!("{} × {} = {}", lhs, rhs, value),
        ));
        value
    }
}

/// Computes the attributable emission quantity.
///
/// # Errors
///
/// Returns [`CalculationError::Validation`] if a field the strategy needs was
/// not supplied. The registry guarantees every such field is declared, and
/// the validator guarantees required ones are present.
pub fn resolve_emissions(
    definition: &FormulaDefinition,
    inputs: &ValidatedInputs,
    attribution: &Attribution,
) -> Result<EmissionOutcome, CalculationError> {
    let mut trail = Trail {
        definition,
        inputs,
        steps: attribution.steps(),
    };

    let (quantity, emission_factor) = match definition.emission_basis {
        EmissionBasis::Direct { emissions } => (trail.read(emissions)?, 1.0),
        EmissionBasis::Energy {
            consumption,
            factor,
        } => {
            let consumption = trail.read(consumption)?;
            let factor = trail.read(factor)?;
            (trail.product("Absolute Emissions", consumption, factor), factor)
        }
        EmissionBasis::Production { volume, factor } => {
            let volume = trail.read(volume)?;
            let factor = trail.read(factor)?;
            (trail.product("Absolute Emissions", volume, factor), factor)
        }
        EmissionBasis::FloorArea {
            intensity,
            floor_area,
            factor,
        } => {
            let intensity = trail.read(intensity)?;
            let area = trail.read(floor_area)?;
            let factor = trail.read(factor)?;
            let consumption = trail.product("Estimated Energy Consumption", intensity, area);
            (trail.product("Absolute Emissions", consumption, factor), factor)
        }
        EmissionBasis::Distance {
            distance,
            efficiency,
            factor,
        } => {
            let distance = trail.read(distance)?;
            let efficiency = trail.read(efficiency)?;
            let factor = trail.read(factor)?;
            let fuel = trail.product("Fuel Consumed", distance, efficiency);
            (trail.product("Absolute Emissions", fuel, factor), factor)
        }
    };

    let af = attribution.factor;
    let (financed_emissions, weighting_factor) = if definition.is_facilitated() {
        let weighting = trail.read(InputField::WeightingFactor)?;
        let financed = af * weighting * quantity;
        trail.steps.push(CalculationStep::new(
            "Facilitated Emissions",
            financed,
            format!("{:.6} × {} × {} = {}", af, weighting, quantity, financed),
        ));
        (financed, Some(weighting))
    } else {
        let financed = af * quantity;
        trail.steps.push(CalculationStep::new(
            "Financed Emissions",
            financed,
            format!("{:.6} × {} = {}", af, quantity, financed),
        ));
        (financed, None)
    };

    Ok(EmissionOutcome {
        emission_factor,
        financed_emissions,
        mode: definition.emission_basis.mode(),
        weighting_factor,
        steps: trail.steps,
    })
}
