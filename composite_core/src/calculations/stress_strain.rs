//! # Stress-Strain Curves and Modulus Bounds
//!
//! Idealized elastic-brittle stress-strain curves for a fiber, a matrix, or
//! the unidirectional composite built from them, plus the longitudinal and
//! transverse modulus bounds swept over volume fraction.
//!
//! Each phase is linear up to its strength: `σ = min(E·ε·1000, σ_ult)` with
//! `E` in GPa, `ε` as a fraction and `σ` in MPa. The composite takes its
//! modulus and strength from the rule of mixtures and its failure strain as
//! the volume-weighted mean of the constituents.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::calculations::stress_strain::{calculate, Phase, StressStrainInput};
//! use composite_core::materials::ConstituentCatalog;
//!
//! let catalog = ConstituentCatalog::standard();
//! let input = StressStrainInput::new(
//!     Phase::Composite,
//!     0.6,
//!     catalog.find_fiber("Carbon Fiber").unwrap().clone(),
//!     catalog.find_matrix("Epoxy Resin").unwrap().clone(),
//! );
//! let curve = calculate(&input).unwrap();
//! assert_eq!(curve.len(), 51);
//! assert_eq!(curve[0].stress_mpa, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::mixtures::{composite_tensile_strength, longitudinal_modulus, transverse_modulus};
use crate::errors::{CompositeError, CompositeResult};
use crate::materials::{Constituent, ConstituentKind};
use crate::units::{Fraction, Percent};

/// Default number of stress-strain segments
pub const DEFAULT_STRESS_STRAIN_POINTS: usize = 50;

/// Volume fraction steps in the modulus bounds sweep (0.05 each)
const BOUNDS_STEPS: usize = 20;

fn default_points() -> usize {
    DEFAULT_STRESS_STRAIN_POINTS
}

/// Which material a stress-strain curve describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Fiber,
    Matrix,
    Composite,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Fiber, Phase::Matrix, Phase::Composite];

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Fiber => "Fiber",
            Phase::Matrix => "Matrix",
            Phase::Composite => "Composite",
        }
    }
}

/// Input for a stress-strain curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressStrainInput {
    pub phase: Phase,
    /// Fiber volume fraction, 0-1 (used by the composite phase)
    pub volume_fraction: f64,
    pub fiber: Constituent,
    pub matrix: Constituent,
    /// Number of segments; the curve has `points + 1` samples
    #[serde(default = "default_points")]
    pub points: usize,
}

impl StressStrainInput {
    pub fn new(phase: Phase, volume_fraction: f64, fiber: Constituent, matrix: Constituent) -> Self {
        StressStrainInput {
            phase,
            volume_fraction,
            fiber,
            matrix,
            points: DEFAULT_STRESS_STRAIN_POINTS,
        }
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn validate(&self) -> CompositeResult<()> {
        if self.points == 0 {
            return Err(CompositeError::invalid_input(
                "points",
                "0",
                "Curve needs at least one segment",
            ));
        }
        if !self.volume_fraction.is_finite() || !(0.0..=1.0).contains(&self.volume_fraction) {
            return Err(CompositeError::invalid_input(
                "volume_fraction",
                self.volume_fraction.to_string(),
                "Volume fraction must be between 0 and 1",
            ));
        }
        if self.fiber.kind != ConstituentKind::Fiber {
            return Err(CompositeError::invalid_input(
                "fiber",
                self.fiber.name.clone(),
                "Constituent is not a fiber",
            ));
        }
        if self.matrix.kind != ConstituentKind::Matrix {
            return Err(CompositeError::invalid_input(
                "matrix",
                self.matrix.name.clone(),
                "Constituent is not a matrix",
            ));
        }
        self.fiber.validate()?;
        self.matrix.validate()
    }

    /// (modulus GPa, strength MPa, failure strain as a fraction) of the phase
    fn elastic_limits(&self) -> (f64, f64, f64) {
        let (f, m) = (&self.fiber, &self.matrix);
        match self.phase {
            Phase::Fiber => (
                f.elastic_modulus_gpa,
                f.tensile_strength_mpa,
                Fraction::from(Percent(f.max_strain_percent)).value(),
            ),
            Phase::Matrix => (
                m.elastic_modulus_gpa,
                m.tensile_strength_mpa,
                Fraction::from(Percent(m.max_strain_percent)).value(),
            ),
            Phase::Composite => {
                let vf = self.volume_fraction;
                let strain_percent = f.max_strain_percent * vf + m.max_strain_percent * (1.0 - vf);
                (
                    longitudinal_modulus(vf, f.elastic_modulus_gpa, m.elastic_modulus_gpa),
                    composite_tensile_strength(vf, f.tensile_strength_mpa, m.tensile_strength_mpa),
                    Fraction::from(Percent(strain_percent)).value(),
                )
            }
        }
    }
}

/// One sample of a stress-strain curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressStrainPoint {
    /// Strain (%)
    pub strain_percent: f64,
    /// Stress (MPa)
    pub stress_mpa: f64,
}

/// Sample `points + 1` strains from zero to the phase's failure strain.
pub fn calculate(input: &StressStrainInput) -> CompositeResult<Vec<StressStrainPoint>> {
    input.validate()?;

    let (modulus_gpa, strength_mpa, max_strain) = input.elastic_limits();
    log::debug!(
        "{} stress-strain: E={:.3} GPa, σ_ult={:.3} MPa, ε_max={:.5}",
        input.phase.display_name(),
        modulus_gpa,
        strength_mpa,
        max_strain
    );

    let steps = input.points as f64;
    let curve = (0..=input.points)
        .map(|i| {
            let strain = max_strain * i as f64 / steps;
            StressStrainPoint {
                strain_percent: Percent::from(Fraction(strain)).value(),
                stress_mpa: (modulus_gpa * strain * 1000.0).min(strength_mpa),
            }
        })
        .collect();

    Ok(curve)
}

/// Longitudinal and transverse moduli at one volume fraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulusBoundsPoint {
    /// Fiber volume fraction (%)
    pub volume_fraction_percent: f64,
    /// Iso-strain (parallel) modulus
    pub longitudinal: f64,
    /// Iso-stress (series) modulus, 0 when undefined
    pub transverse: f64,
}

/// Sweep Vf from 0 to 1 in steps of 0.05 (21 samples).
///
/// Moduli come back in the unit of `e_f` and `e_m`.
pub fn property_vs_fraction(e_f: f64, e_m: f64) -> Vec<ModulusBoundsPoint> {
    (0..=BOUNDS_STEPS)
        .map(|i| {
            let vf = i as f64 / BOUNDS_STEPS as f64;
            ModulusBoundsPoint {
                volume_fraction_percent: Percent::from(Fraction(vf)).value(),
                longitudinal: longitudinal_modulus(vf, e_f, e_m),
                transverse: transverse_modulus(vf, e_f, e_m),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ConstituentCatalog;
    use approx::assert_relative_eq;

    fn input(phase: Phase, vf: f64) -> StressStrainInput {
        let catalog = ConstituentCatalog::standard();
        StressStrainInput::new(
            phase,
            vf,
            catalog.find_fiber("Carbon Fiber").unwrap().clone(),
            catalog.find_matrix("Epoxy Resin").unwrap().clone(),
        )
    }

    #[test]
    fn test_fiber_curve_is_linear_to_failure() {
        let curve = calculate(&input(Phase::Fiber, 0.5)).unwrap();
        assert_eq!(curve.len(), 51);
        let last = curve.last().unwrap();
        assert_relative_eq!(last.strain_percent, 1.7, epsilon = 1e-9);
        // 230 GPa · 0.017 · 1000 = 3910 MPa, below the 4000 MPa strength
        assert_relative_eq!(last.stress_mpa, 3910.0, epsilon = 1e-6);
    }

    #[test]
    fn test_matrix_curve_caps_at_strength() {
        let curve = calculate(&input(Phase::Matrix, 0.5)).unwrap();
        // 3.5 GPa · 0.05 · 1000 = 175 MPa, capped at 75 MPa
        assert_relative_eq!(curve.last().unwrap().stress_mpa, 75.0);
        assert!(curve.iter().all(|p| p.stress_mpa <= 75.0));
    }

    #[test]
    fn test_composite_curve() {
        let curve = calculate(&input(Phase::Composite, 0.6)).unwrap();
        // ε_max = (1.7·0.6 + 5.0·0.4) %
        assert_relative_eq!(curve.last().unwrap().strain_percent, 3.02, epsilon = 1e-9);
        // σ_c = 4000·0.6 + 75·0.4
        assert_relative_eq!(curve.last().unwrap().stress_mpa, 2430.0, epsilon = 1e-6);
        // E_c = 230·0.6 + 3.5·0.4 = 139.4 GPa on the first step
        let first = curve[1];
        assert_relative_eq!(first.stress_mpa, 139.4 * first.strain_percent * 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_custom_points() {
        let curve = calculate(&input(Phase::Fiber, 0.5).with_points(5)).unwrap();
        assert_eq!(curve.len(), 6);
    }

    #[test]
    fn test_invalid_volume_fraction() {
        let err = calculate(&input(Phase::Composite, 1.5)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_swapped_constituents_rejected() {
        let mut bad = input(Phase::Composite, 0.5);
        std::mem::swap(&mut bad.fiber, &mut bad.matrix);
        assert!(calculate(&bad).is_err());
    }

    #[test]
    fn test_property_vs_fraction() {
        let sweep = property_vs_fraction(230.0, 3.5);
        assert_eq!(sweep.len(), 21);
        assert_eq!(sweep[0].volume_fraction_percent, 0.0);
        assert_relative_eq!(sweep[20].volume_fraction_percent, 100.0);
        assert_relative_eq!(sweep[0].longitudinal, 3.5);
        assert_relative_eq!(sweep[20].longitudinal, 230.0);
        assert_relative_eq!(sweep[10].volume_fraction_percent, 50.0);
        assert!(sweep.iter().all(|p| p.transverse <= p.longitudinal + 1e-9));
    }

    #[test]
    fn test_property_vs_fraction_zero_modulus() {
        let sweep = property_vs_fraction(230.0, 0.0);
        assert!(sweep.iter().all(|p| p.transverse == 0.0));
    }
}
