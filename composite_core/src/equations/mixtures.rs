//! # Rule-of-Mixtures Formulas
//!
//! Micromechanics relations for a two-phase (fiber + matrix) composite.
//! Every function is pure and total over its documented domain.
//!
//! ## Notation
//!
//! - `Vf` = Fiber volume fraction (0-1), `Vm = 1 - Vf`
//! - `Wf` = Fiber weight fraction (0-1), `Wm = 1 - Wf`
//! - `ρf`, `ρm` = Fiber and matrix density
//! - `Ef`, `Em` = Fiber and matrix modulus
//! - `σf`, `σm` = Fiber and matrix tensile strength
//!
//! ## Preconditions
//!
//! Fractions must lie in [0, 1] and densities must be positive. Out-of-range
//! fractions are not rejected here; the `calculations` layer validates before
//! calling in. Degenerate denominators are guarded and yield `0.0`.
//!
//! ## References
//!
//! - Hull & Clyne, An Introduction to Composite Materials, 2nd Ed., Ch. 3
//! - Agarwal, Broutman & Chandrashekhara, Analysis and Performance of Fiber Composites

use serde::{Deserialize, Serialize};

// =============================================================================
// FRACTION CONVERSIONS
// =============================================================================

/// Convert fiber volume fraction to weight fraction
///
/// # Formula
/// Wf = ρf·Vf / (ρf·Vf + ρm·Vm)
///
/// Returns `0.0` when the denominator is exactly zero.
///
/// # Example
/// ```rust
/// use composite_core::equations::mixtures::volume_to_weight_fraction;
///
/// // 50% carbon (1.8 g/cc) in epoxy (1.2 g/cc)
/// let wf = volume_to_weight_fraction(0.5, 1.8, 1.2);
/// assert!((wf - 0.6).abs() < 1e-12);
/// ```
#[inline]
pub fn volume_to_weight_fraction(vf: f64, rho_f: f64, rho_m: f64) -> f64 {
    let numerator = rho_f * vf;
    let denominator = rho_f * vf + rho_m * (1.0 - vf);
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Convert fiber weight fraction to volume fraction
///
/// # Formula
/// Vf = (Wf/ρf) / (Wf/ρf + Wm/ρm)
///
/// Returns `0.0` when the denominator is exactly zero.
#[inline]
pub fn weight_to_volume_fraction(wf: f64, rho_f: f64, rho_m: f64) -> f64 {
    let numerator = wf / rho_f;
    let denominator = wf / rho_f + (1.0 - wf) / rho_m;
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

// =============================================================================
// RULE OF MIXTURES
// =============================================================================

/// Composite density
///
/// # Formula
/// ρc = ρf·Vf + ρm·Vm
#[inline]
pub fn composite_density(vf: f64, rho_f: f64, rho_m: f64) -> f64 {
    rho_f * vf + rho_m * (1.0 - vf)
}

/// Longitudinal modulus, iso-strain (parallel) model
///
/// # Formula
/// E1 = Ef·Vf + Em·Vm
///
/// This is the Voigt upper bound on composite stiffness.
#[inline]
pub fn longitudinal_modulus(vf: f64, e_f: f64, e_m: f64) -> f64 {
    e_f * vf + e_m * (1.0 - vf)
}

/// Transverse modulus, iso-stress (series) model
///
/// # Formula
/// 1/E2 = Vf/Ef + Vm/Em
///
/// Returns `0.0` when either modulus is zero. That value means "not
/// computable", not a stiffness of zero; use [`try_transverse_modulus`] to
/// tell the two apart.
#[inline]
pub fn transverse_modulus(vf: f64, e_f: f64, e_m: f64) -> f64 {
    try_transverse_modulus(vf, e_f, e_m).unwrap_or(0.0)
}

/// Transverse modulus, returning `None` where the inverse rule is undefined
#[inline]
pub fn try_transverse_modulus(vf: f64, e_f: f64, e_m: f64) -> Option<f64> {
    if e_f == 0.0 || e_m == 0.0 {
        return None;
    }
    let compliance = vf / e_f + (1.0 - vf) / e_m;
    if compliance != 0.0 {
        Some(1.0 / compliance)
    } else {
        None
    }
}

/// Longitudinal composite tensile strength
///
/// # Formula
/// σc = σf·Vf + σm·Vm
#[inline]
pub fn composite_tensile_strength(vf: f64, sigma_f: f64, sigma_m: f64) -> f64 {
    sigma_f * vf + sigma_m * (1.0 - vf)
}

// =============================================================================
// DISPATCH ENUMS
// =============================================================================

/// Direction of a fraction conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionConversion {
    /// Volume fraction → weight fraction
    VolumeToWeight,
    /// Weight fraction → volume fraction
    WeightToVolume,
}

impl FractionConversion {
    /// Apply the conversion with fiber and matrix densities
    pub fn apply(self, fraction: f64, rho_f: f64, rho_m: f64) -> f64 {
        match self {
            FractionConversion::VolumeToWeight => volume_to_weight_fraction(fraction, rho_f, rho_m),
            FractionConversion::WeightToVolume => weight_to_volume_fraction(fraction, rho_f, rho_m),
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "v2w" | "volumetoweight" | "vw" => Some(FractionConversion::VolumeToWeight),
            "w2v" | "weighttovolume" | "wv" => Some(FractionConversion::WeightToVolume),
            _ => None,
        }
    }
}

/// Composite property estimated by a rule-of-mixtures formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixtureProperty {
    /// [`composite_density`]
    Density,
    /// [`longitudinal_modulus`]
    LongitudinalModulus,
    /// [`transverse_modulus`]
    TransverseModulus,
    /// [`composite_tensile_strength`]
    TensileStrength,
}

impl MixtureProperty {
    /// All properties, for option lists
    pub const ALL: [MixtureProperty; 4] = [
        MixtureProperty::Density,
        MixtureProperty::LongitudinalModulus,
        MixtureProperty::TransverseModulus,
        MixtureProperty::TensileStrength,
    ];

    /// Evaluate the property for fiber value `f` and matrix value `m`
    pub fn apply(self, vf: f64, f: f64, m: f64) -> f64 {
        match self {
            MixtureProperty::Density => composite_density(vf, f, m),
            MixtureProperty::LongitudinalModulus => longitudinal_modulus(vf, f, m),
            MixtureProperty::TransverseModulus => transverse_modulus(vf, f, m),
            MixtureProperty::TensileStrength => composite_tensile_strength(vf, f, m),
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "density" | "rho" => Some(MixtureProperty::Density),
            "longitudinal" | "longitudinalmodulus" | "e1" => Some(MixtureProperty::LongitudinalModulus),
            "transverse" | "transversemodulus" | "e2" => Some(MixtureProperty::TransverseModulus),
            "strength" | "tensilestrength" => Some(MixtureProperty::TensileStrength),
            _ => None,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MixtureProperty::Density => "Composite Density",
            MixtureProperty::LongitudinalModulus => "Longitudinal Modulus",
            MixtureProperty::TransverseModulus => "Transverse Modulus",
            MixtureProperty::TensileStrength => "Tensile Strength",
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_volume_weight_roundtrip() {
        let densities = [(1.8, 1.2), (2.54, 1.1), (1.44, 2.7), (2.49, 1.15)];
        for &(rho_f, rho_m) in &densities {
            for i in 1..20 {
                let vf = i as f64 / 20.0;
                let wf = volume_to_weight_fraction(vf, rho_f, rho_m);
                let back = weight_to_volume_fraction(wf, rho_f, rho_m);
                assert!(approx_eq(back, vf), "vf={} rho_f={} rho_m={} -> {}", vf, rho_f, rho_m, back);
            }
        }
    }

    #[test]
    fn test_heavier_fiber_raises_weight_fraction() {
        // E-glass is denser than epoxy, so Wf > Vf
        let wf = volume_to_weight_fraction(0.4, 2.54, 1.2);
        assert!(wf > 0.4, "Wf = {}", wf);
    }

    #[test]
    fn test_zero_denominator_guards() {
        assert_eq!(volume_to_weight_fraction(0.0, 1.8, 0.0), 0.0);
        assert_eq!(weight_to_volume_fraction(0.0, 1.8, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_longitudinal_limits() {
        assert_eq!(longitudinal_modulus(0.0, 230.0, 3.5), 3.5);
        assert_eq!(longitudinal_modulus(1.0, 230.0, 3.5), 230.0);
    }

    #[test]
    fn test_transverse_never_exceeds_longitudinal() {
        let pairs = [(230.0, 3.5), (72.5, 2.8), (131.0, 69.0), (3.5, 230.0), (10.0, 10.0)];
        for &(e_f, e_m) in &pairs {
            for i in 0..=20 {
                let vf = i as f64 / 20.0;
                let e1 = longitudinal_modulus(vf, e_f, e_m);
                let e2 = transverse_modulus(vf, e_f, e_m);
                assert!(e2 <= e1 + 1e-9, "vf={} E1={} E2={}", vf, e1, e2);
            }
        }
    }

    #[test]
    fn test_transverse_known_value() {
        // 1/E2 = 0.5/230 + 0.5/3.5
        let e2 = transverse_modulus(0.5, 230.0, 3.5);
        let expected = 1.0 / (0.5 / 230.0 + 0.5 / 3.5);
        assert!(approx_eq(e2, expected), "E2 = {}", e2);
        assert!(e2 < 7.0);
    }

    #[test]
    fn test_transverse_zero_modulus_guard() {
        assert_eq!(transverse_modulus(0.5, 0.0, 3.5), 0.0);
        assert_eq!(transverse_modulus(0.5, 230.0, 0.0), 0.0);
        assert_eq!(try_transverse_modulus(0.5, 0.0, 3.5), None);
        assert!(try_transverse_modulus(0.5, 230.0, 3.5).is_some());
    }

    #[test]
    fn test_density_and_strength() {
        assert!(approx_eq(composite_density(0.6, 1.8, 1.2), 1.56));
        assert!(approx_eq(composite_tensile_strength(0.5, 4000.0, 75.0), 2037.5));
    }

    #[test]
    fn test_dispatch_matches_functions() {
        assert_eq!(
            MixtureProperty::LongitudinalModulus.apply(0.3, 72.5, 3.5),
            longitudinal_modulus(0.3, 72.5, 3.5)
        );
        assert_eq!(
            FractionConversion::WeightToVolume.apply(0.6, 1.8, 1.2),
            weight_to_volume_fraction(0.6, 1.8, 1.2)
        );
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(FractionConversion::from_str_flexible("v2w"), Some(FractionConversion::VolumeToWeight));
        assert_eq!(FractionConversion::from_str_flexible("weight-to-volume"), Some(FractionConversion::WeightToVolume));
        assert_eq!(MixtureProperty::from_str_flexible("Transverse"), Some(MixtureProperty::TransverseModulus));
        assert_eq!(MixtureProperty::from_str_flexible("viscosity"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MixtureProperty::LongitudinalModulus).unwrap();
        assert_eq!(json, "\"longitudinal_modulus\"");
    }
}
