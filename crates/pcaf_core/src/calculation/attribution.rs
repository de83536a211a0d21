//! Attribution factor resolution.
//!
//! The attribution factor is the share of the counterparty's emissions that
//! belongs to the institution:
//!
//! ```text
//! af = exposure / denominator
//! ```
//!
//! The exposure field follows the formula category and the denominator
//! follows the formula's [`AttributionBasis`] (and, for company value, the
//! company type). Sovereign debt derives its denominator as
//! `ppp_adjustment_factor × gdp`. Factors above 1 are reported as computed.

use crate::error::{CalculationError, ValidationError};
use crate::formula::{AttributionBasis, CompanyType, FormulaDefinition, InputField};

use super::result::CalculationStep;
use super::validator::ValidatedInputs;

/// Resolved attribution factor and the operands it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attribution {
    /// `exposure / denominator`.
    pub factor: f64,
    /// Numerator field.
    pub exposure_field: InputField,
    /// Numerator value.
    pub exposure: f64,
    /// Denominator field.
    pub denominator_field: InputField,
    /// Denominator value, strictly positive.
    pub denominator: f64,
    /// Operands of a derived denominator.
    pub derivation: Option<DenominatorDerivation>,
}

/// Two inputs whose product forms the denominator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenominatorDerivation {
    /// Left operand field.
    pub lhs_field: InputField,
    /// Left operand value.
    pub lhs: f64,
    /// Right operand field.
    pub rhs_field: InputField,
    /// Right operand value.
    pub rhs: f64,
}

impl Attribution {
    /// Audit steps: exposure, denominator (with its operands when derived),
    /// then the factor.
    pub fn steps(&self) -> Vec<CalculationStep> {
        let mut steps = vec![CalculationStep::input(self.exposure_field, self.exposure, "")];
        match self.derivation {
            Some(d) => {
                steps.push(CalculationStep::input(d.lhs_field, d.lhs, ""));
                steps.push(CalculationStep::input(d.rhs_field, d.rhs, ""));
                steps.push(CalculationStep::new(
                    self.denominator_field.label(),
                    self.denominator,
                    format!("{} × {} = {}", d.lhs, d.rhs, self.denominator),
                ));
            }
            None => steps.push(CalculationStep::input(
                self.denominator_field,
                self.denominator,
                "",
            )),
        }
        steps.push(CalculationStep::new(
            "Attribution Factor",
            self.factor,
            format!("{} / {} = {:.6}", self.exposure, self.denominator, self.factor),
        ));
        steps
    }
}

/// Computes the attribution factor for a validated request.
///
/// # Errors
///
/// - [`ValidationError::MissingField`] when the denominator selected for the
///   company type was not supplied
/// - [`CalculationError::InvalidDenominator`] when the denominator is `<= 0`
pub fn resolve_attribution(
    definition: &FormulaDefinition,
    inputs: &ValidatedInputs,
    company_type: CompanyType,
) -> Result<Attribution, CalculationError> {
    debug_assert_eq!(inputs.formula_id(), definition.id);

    let exposure_field = definition.category.exposure_field();
    let exposure = inputs.require(exposure_field)?;

    let denominator_field = definition.attribution.denominator_field(company_type);
    let (denominator, derivation) = match definition.attribution.derived_from() {
        Some((lhs_field, rhs_field)) => {
            let lhs = inputs.require(lhs_field)?;
            let rhs = inputs.require(rhs_field)?;
            let derivation = DenominatorDerivation {
                lhs_field,
                lhs,
                rhs_field,
                rhs,
            };
            (lhs * rhs, Some(derivation))
        }
        None => {
            let denominator =
                inputs
                    .get(denominator_field)
                    .ok_or_else(|| ValidationError::MissingField {
                        field: denominator_field.as_str().to_string(),
                    })?;
            (denominator, None)
        }
    };

    if denominator <= 0.0 {
        return Err(CalculationError::InvalidDenominator {
            field: denominator_field.as_str().to_string(),
            value: denominator,
        });
    }

    if matches!(definition.attribution, AttributionBasis::CompanyValue) {
        tracing::trace!(
            formula_id = %definition.id,
            company_type = %company_type,
            denominator = %denominator_field,
            "selected company-value denominator"
        );
    }

    Ok(Attribution {
        factor: exposure / denominator,
        exposure_field,
        exposure,
        denominator_field,
        denominator,
        derivation,
    })
}
