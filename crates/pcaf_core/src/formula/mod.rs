//! Formula definitions, the standard catalogue and the registry.
//!
//! ## Module Structure
//!
//! - [`field`]: Closed set of input fields ([`InputField`])
//! - [`types`]: Category, scope, company type, asset class, option code
//! - [`definition`]: [`FormulaDefinition`], [`InputSpec`] and computation strategies
//! - [`catalogue`]: Standard definitions, listed/unlisted pairs from one template
//! - [`registry`]: Immutable [`FormulaRegistry`] and its validating builder

pub mod catalogue;
pub mod definition;
pub mod field;
pub mod registry;
pub mod types;

pub use catalogue::standard_formulas;
pub use definition::{
    AttributionBasis, ComputationMode, EmissionBasis, FormulaDefinition, InputSpec,
};
pub use field::InputField;
pub use registry::{FormulaRegistry, FormulaRegistryBuilder};
pub use types::{AssetClass, CompanyType, FormulaCategory, OptionCode, ScopeType};
