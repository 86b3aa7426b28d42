//! # Composite Calculations
//!
//! Validated entry points over the raw formulas in [`crate::equations`].
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - a result type (JSON-serializable)
//! - `calculate(&input, ..) -> CompositeResult<_>` - Pure calculation function
//!
//! Valid inputs produce exactly the numbers the raw formulas give; invalid
//! ones fail with [`CompositeError::InvalidInput`](crate::errors::CompositeError::InvalidInput).
//!
//! ## Available Calculations
//!
//! - [`flexural`] - Parametric three-point-bend property estimate
//! - [`curve`] - Load-deflection curve synthesis
//! - [`comparison`] - Curve, comparison and summary reports
//! - [`stress_strain`] - Phase stress-strain curves and modulus bounds

pub mod comparison;
pub mod curve;
pub mod flexural;
pub mod stress_strain;

pub use comparison::{
    compare, curve_report, parse_fvf_list, summary, ComparisonEntry, ComparisonReport, CurveReport,
    SummaryReport, SummaryRow,
};
pub use curve::{CurveInput, LoadDeflectionPoint};
pub use flexural::{BaseResponse, FlexuralInput, FlexuralProperties, SpecimenGeometry};
pub use stress_strain::{property_vs_fraction, ModulusBoundsPoint, Phase, StressStrainInput, StressStrainPoint};
