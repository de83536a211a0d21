//! Input validation against a formula's declared schema.
//!
//! Raw caller inputs arrive as a JSON object. Validation turns them into a
//! [`ValidatedInputs`] record holding only declared fields as finite `f64`
//! values, tagged with the id of the formula they were checked against.
//!
//! [`plausibility_warnings`] runs afterwards and flags suspicious but
//! computable inputs without failing the calculation.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;
use crate::formula::{FormulaDefinition, InputField, InputSpec, OptionCode};

/// Energy-based emissions above this many tCO2e are flagged.
pub const HIGH_EMISSIONS_THRESHOLD: f64 = 1_000_000.0;

/// Caller-supplied inputs keyed by field wire name.
pub type RawInputs = serde_json::Map<String, Value>;

/// Inputs that passed validation for a specific formula.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedInputs {
    formula_id: String,
    values: BTreeMap<InputField, f64>,
}

impl ValidatedInputs {
    /// Id of the formula these inputs were validated against.
    #[inline]
    pub fn formula_id(&self) -> &str {
        &self.formula_id
    }

    /// Value of a field, if it was supplied.
    #[inline]
    pub fn get(&self, field: InputField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    /// Value of a field the computation cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if the field was not supplied.
    pub fn require(&self, field: InputField) -> Result<f64, ValidationError> {
        self.get(field).ok_or_else(|| ValidationError::MissingField {
            field: field.as_str().to_string(),
        })
    }

    /// Number of supplied fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields were supplied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over supplied fields.
    pub fn iter(&self) -> impl Iterator<Item = (InputField, f64)> + '_ {
        self.values.iter().map(|(&field, &value)| (field, value))
    }
}

/// Validates raw inputs against a definition's schema.
///
/// Fields are checked in declaration order, so the first failing field is
/// the one reported. Keys the definition does not declare are ignored.
///
/// # Errors
///
/// - [`ValidationError::MissingField`]: required field absent, `null` or blank
/// - [`ValidationError::NotNumeric`]: value is not a number or numeric string
/// - [`ValidationError::NonFinite`]: value is NaN or infinite
/// - [`ValidationError::OutOfRange`]: value violates the declared bounds
pub fn validate(
    definition: &FormulaDefinition,
    raw: &RawInputs,
) -> Result<ValidatedInputs, ValidationError> {
    let mut values = BTreeMap::new();

    for spec in &definition.inputs {
        match coerce(spec, raw.get(spec.name()))? {
            Some(value) => {
                check_range(spec, value)?;
                values.insert(spec.field, value);
            }
            None if spec.required => {
                return Err(ValidationError::MissingField {
                    field: spec.name().to_string(),
                });
            }
            None => {}
        }
    }

    Ok(ValidatedInputs {
        formula_id: definition.id.clone(),
        values,
    })
}

/// Non-fatal checks on validated inputs.
///
/// - Option 1a/1b: exposure larger than the supplied EVIC
/// - Option 2a: `energy_consumption × emission_factor` above
///   [`HIGH_EMISSIONS_THRESHOLD`]
pub fn plausibility_warnings(
    definition: &FormulaDefinition,
    inputs: &ValidatedInputs,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if matches!(definition.option_code, OptionCode::Tier1a | OptionCode::Tier1b) {
        let exposure = inputs.get(definition.category.exposure_field());
        if let (Some(exposure), Some(evic)) = (exposure, inputs.get(InputField::Evic)) {
            if exposure > evic {
                warnings.push("Outstanding amount exceeds EVIC - please verify data".to_string());
            }
        }
    }

    if definition.option_code == OptionCode::Tier2a {
        if let (Some(energy), Some(factor)) = (
            inputs.get(InputField::EnergyConsumption),
            inputs.get(InputField::EmissionFactor),
        ) {
            if energy * factor > HIGH_EMISSIONS_THRESHOLD {
                warnings
                    .push("Very high calculated emissions - please verify emission factors".to_string());
            }
        }
    }

    warnings
}

/// Coerces a raw value to `f64`; `Ok(None)` means the field is absent.
fn coerce(spec: &InputSpec, raw: Option<&Value>) -> Result<Option<f64>, ValidationError> {
    let not_numeric = |found: &str| ValidationError::NotNumeric {
        field: spec.name().to_string(),
        found: found.to_string(),
    };

    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| not_numeric("number"))?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| not_numeric(&format!("string \"{}\"", s)))?,
        Some(Value::Bool(_)) => return Err(not_numeric("boolean")),
        Some(Value::Array(_)) => return Err(not_numeric("array")),
        Some(Value::Object(_)) => return Err(not_numeric("object")),
    };

    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            field: spec.name().to_string(),
        });
    }
    Ok(Some(value))
}

fn check_range(spec: &InputSpec, value: f64) -> Result<(), ValidationError> {
    let below = spec.min.is_some_and(|min| value < min);
    let above = spec.max.is_some_and(|max| value > max);
    if below || above {
        return Err(ValidationError::OutOfRange {
            field: spec.name().to_string(),
            value,
            min: spec.min.unwrap_or(f64::NEG_INFINITY),
            max: spec.max.unwrap_or(f64::INFINITY),
        });
    }
    Ok(())
}
