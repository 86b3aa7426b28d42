//! # Unit Types
//!
//! Lightweight newtype wrappers for the units that flow through the engine.
//! They serialize as bare numbers so JSON output stays clean.
//!
//! ## Conventions
//!
//! Plain `f64` fields carry their unit as a suffix (`_mm`, `_n`, `_mpa`,
//! `_gpa`, `_g_cm3`). The wrappers here cover the two conversions the
//! engine performs:
//!
//! - Stress: megapascals (strength) to gigapascals (modulus)
//! - Fractions: percent (0-100, user facing) and decimal fraction (0-1, formulas)
//!
//! With loads in N and lengths in mm, the flexural formulas yield stresses in
//! MPa (N/mm²). Moduli are reported in GPa, so raw MPa values are divided by 1000.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::units::{Fraction, GigaPascals, MegaPascals, Percent};
//!
//! let modulus: GigaPascals = MegaPascals(23_500.0).into();
//! assert_eq!(modulus.0, 23.5);
//!
//! let vf: Fraction = Percent(40.0).into();
//! assert_eq!(vf.0, 0.4);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Stress / Modulus
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Stress or modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GigaPascals(pub f64);

impl From<MegaPascals> for GigaPascals {
    fn from(mpa: MegaPascals) -> Self {
        GigaPascals(mpa.0 / 1000.0)
    }
}

impl From<GigaPascals> for MegaPascals {
    fn from(gpa: GigaPascals) -> Self {
        MegaPascals(gpa.0 * 1000.0)
    }
}

// ============================================================================
// Fractions
// ============================================================================

/// Fiber content expressed in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

/// Fiber content expressed as a decimal fraction (0-1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(pub f64);

impl From<Percent> for Fraction {
    fn from(pct: Percent) -> Self {
        Fraction(pct.0 / 100.0)
    }
}

impl From<Fraction> for Percent {
    fn from(frac: Fraction) -> Self {
        Percent(frac.0 * 100.0)
    }
}

// ============================================================================
// Raw Access
// ============================================================================

macro_rules! impl_value {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )+
    };
}

impl_value!(MegaPascals, GigaPascals, Percent, Fraction);

// ============================================================================
// Presentation Rounding
// ============================================================================

/// Round `value` to `places` decimal places (half away from zero).
///
/// Only applied when building output for presentation; the calculation
/// pipeline always works at full precision.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpa_to_gpa() {
        let gpa: GigaPascals = MegaPascals(72_500.0).into();
        assert_eq!(gpa.0, 72.5);
        let back: MegaPascals = gpa.into();
        assert_eq!(back.0, 72_500.0);
    }

    #[test]
    fn test_percent_to_fraction() {
        let frac: Fraction = Percent(50.0).into();
        assert_eq!(frac.0, 0.5);
        let pct: Percent = Fraction(0.25).into();
        assert_eq!(pct.0, 25.0);
    }

    #[test]
    fn test_value_unwraps() {
        assert_eq!(MegaPascals(310.0).value(), 310.0);
        assert_eq!(GigaPascals::from(MegaPascals(3500.0)).value(), 3.5);
        assert_eq!(Fraction::from(Percent(60.0)).value(), 0.6);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(70.833_333, 2), 70.83);
        assert_eq!(round_to(0.123_456, 3), 0.123);
        assert_eq!(round_to(97.75, 2), 97.75);
        assert_eq!(round_to(-1.005_1, 2), -1.01);
    }

    #[test]
    fn test_serialization() {
        let t = Percent(35.0);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "35.0");

        let roundtrip: Percent = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
