//! # Composite Mechanics Equations
//!
//! All closed-form formulas used by the engine live here. Keeping them in one
//! place makes them easy to check against references and keeps the
//! calculation modules free of inline algebra.
//!
//! ## Modules
//!
//! - [`mixtures`] - Rule-of-mixtures relations and fraction conversions
//! - [`flexural`] - Three-point-bend flexural strength and modulus
//!
//! ## Conventions
//!
//! - Fractions are decimals (0-1) at this level; percent inputs are converted
//!   by the callers in [`crate::calculations`].
//! - Functions are total. Degenerate denominators return `0.0` instead of
//!   failing; everything else is a caller precondition.

pub mod flexural;
pub mod mixtures;

pub use flexural::{flexural_modulus, flexural_modulus_gpa, flexural_strength};

pub use mixtures::{
    composite_density,
    composite_tensile_strength,
    longitudinal_modulus,
    transverse_modulus,
    try_transverse_modulus,
    volume_to_weight_fraction,
    weight_to_volume_fraction,
    FractionConversion,
    MixtureProperty,
};
