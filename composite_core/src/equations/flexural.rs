//! # Three-Point-Bend Flexural Formulas
//!
//! Beam-theory relations for a rectangular specimen loaded at midspan
//! between two supports (ASTM D790 / ISO 14125 setup).
//!
//! ```text
//!                 P
//!                 ↓
//!    ┌────────────────────────┐  h
//!    └────────────────────────┘
//!    △                        △
//!    ←────────── L ──────────→
//! ```
//!
//! ## Notation
//!
//! - `P` = Applied midspan load
//! - `L` = Support span
//! - `b` = Specimen width
//! - `h` = Specimen thickness
//! - `m` = Slope of the initial linear load-deflection region (P/δ)
//!
//! ## Units
//!
//! With `P` in N and lengths in mm both formulas return MPa (N/mm²).
//! Moduli are reported in GPa: use [`flexural_modulus_gpa`] or divide by 1000.
//!
//! ## Preconditions
//!
//! `b` and `h` must be positive. They are not checked here; a zero width
//! or thickness divides by zero.

use crate::units::{GigaPascals, MegaPascals};

/// Flexural (outer fiber) stress at midspan
///
/// # Formula
/// σf = 3PL / (2bh²)
///
/// # Example
/// ```rust
/// use composite_core::equations::flexural::flexural_strength;
///
/// // 1300 N on a 50 mm span, 25 x 3 mm specimen
/// let sigma = flexural_strength(1300.0, 50.0, 25.0, 3.0);
/// assert!((sigma - 433.333).abs() < 0.001);
/// ```
#[inline]
pub fn flexural_strength(p: f64, l: f64, b: f64, h: f64) -> f64 {
    3.0 * p * l / (2.0 * b * h.powi(2))
}

/// Flexural modulus of elasticity from the linear-region slope
///
/// # Formula
/// Ef = L³m / (4bh³)
///
/// Result in the stress unit implied by the inputs (MPa for N and mm).
#[inline]
pub fn flexural_modulus(l: f64, b: f64, h: f64, slope: f64) -> f64 {
    l.powi(3) * slope / (4.0 * b * h.powi(3))
}

/// Flexural modulus in GPa for inputs in N and mm
#[inline]
pub fn flexural_modulus_gpa(l: f64, b: f64, h: f64, slope: f64) -> f64 {
    GigaPascals::from(MegaPascals(flexural_modulus(l, b, h, slope))).value()
}
