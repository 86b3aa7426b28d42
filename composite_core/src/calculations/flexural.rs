//! # Parametric Flexural Property Estimator
//!
//! Estimates the three-point-bend response of a fiber-reinforced specimen
//! from its fiber type and fiber volume fraction (FVF). A matrix-dominated
//! base response is scaled by the fiber's
//! [`ReinforcementFactor`](crate::materials::ReinforcementFactor), then the
//! flexural strength and modulus are derived with beam theory.
//!
//! ## Model
//!
//! With `v = FVF / 100`:
//!
//! ```text
//! P_max  = P_base + k_load · v · 100
//! δ_max  = δ_base · (1 - 0.4 v)
//! δ_lin  = δ_max · (0.5 + 0.2 v)
//! m      = 0.85 · P_max / δ_lin
//! σf     = 3 P_max L / (2 b h²)
//! Ef     = L³ m / (4 b h³) / 1000      (GPa)
//! ```
//!
//! The matrix type is carried for labeling only; it does not change the
//! numbers.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::calculations::flexural::{calculate, BaseResponse, FlexuralInput};
//! use composite_core::materials::ReinforcementTable;
//!
//! let input = FlexuralInput::new("Carbon", "Epoxy", 50.0);
//! let props = calculate(&input, ReinforcementTable::shared(), &BaseResponse::default()).unwrap();
//!
//! assert!((props.max_load_n - 1300.0).abs() < 1e-9);
//! assert!((props.max_deflection_mm - 6.4).abs() < 1e-9);
//! assert!((props.linear_region_end_mm - 3.84).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::curve::LINEAR_LOAD_RATIO;
use crate::equations::flexural::{flexural_modulus_gpa, flexural_strength};
use crate::errors::{CompositeError, CompositeResult};
use crate::materials::ReinforcementTable;
use crate::units::{round_to, Fraction, Percent};

/// Deflection lost per unit fiber volume fraction
const DEFLECTION_REDUCTION: f64 = 0.4;

/// Linear region end as a share of max deflection, before fiber adjustment
const LINEAR_REGION_BASE: f64 = 0.5;

/// Linear region growth per unit fiber volume fraction
const LINEAR_REGION_GROWTH: f64 = 0.2;

/// Rectangular three-point-bend specimen
///
/// Defaults to a 3 x 25 mm section on a 50 mm span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecimenGeometry {
    /// Specimen thickness `h` (mm)
    pub thickness_mm: f64,
    /// Specimen width `b` (mm)
    pub width_mm: f64,
    /// Support span `L` (mm)
    pub span_mm: f64,
}

impl SpecimenGeometry {
    pub fn new(thickness_mm: f64, width_mm: f64, span_mm: f64) -> Self {
        SpecimenGeometry {
            thickness_mm,
            width_mm,
            span_mm,
        }
    }

    /// All three dimensions must be finite and positive.
    pub fn validate(&self) -> CompositeResult<()> {
        for (field, value) in [
            ("thickness_mm", self.thickness_mm),
            ("width_mm", self.width_mm),
            ("span_mm", self.span_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CompositeError::invalid_input(
                    field,
                    value.to_string(),
                    "Specimen dimensions must be positive",
                ));
            }
        }
        Ok(())
    }
}

impl Default for SpecimenGeometry {
    fn default() -> Self {
        SpecimenGeometry::new(3.0, 25.0, 50.0)
    }
}

/// Response of the unreinforced reference specimen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse {
    /// Peak load with no fiber (N)
    pub max_load_n: f64,
    /// Deflection at peak with no fiber (mm)
    pub max_deflection_mm: f64,
}

impl BaseResponse {
    pub fn validate(&self) -> CompositeResult<()> {
        if !self.max_load_n.is_finite() || self.max_load_n < 0.0 {
            return Err(CompositeError::invalid_input(
                "max_load_n",
                self.max_load_n.to_string(),
                "Base load cannot be negative",
            ));
        }
        if !self.max_deflection_mm.is_finite() || self.max_deflection_mm <= 0.0 {
            return Err(CompositeError::invalid_input(
                "max_deflection_mm",
                self.max_deflection_mm.to_string(),
                "Base deflection must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for BaseResponse {
    fn default() -> Self {
        BaseResponse {
            max_load_n: 50.0,
            max_deflection_mm: 8.0,
        }
    }
}

/// Input parameters for a flexural property estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fiber_type": "Carbon",
///   "matrix_type": "Epoxy",
///   "fvf_percent": 50.0,
///   "geometry": { "thickness_mm": 3.0, "width_mm": 25.0, "span_mm": 50.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexuralInput {
    /// Fiber type label, looked up in the reinforcement table
    pub fiber_type: String,
    /// Matrix type label (informational)
    #[serde(default)]
    pub matrix_type: String,
    /// Fiber volume fraction, 0-100 %
    pub fvf_percent: f64,
    /// Specimen dimensions (defaults to 3 x 25 x 50 mm)
    #[serde(default)]
    pub geometry: SpecimenGeometry,
}

impl FlexuralInput {
    pub fn new(fiber_type: impl Into<String>, matrix_type: impl Into<String>, fvf_percent: f64) -> Self {
        FlexuralInput {
            fiber_type: fiber_type.into(),
            matrix_type: matrix_type.into(),
            fvf_percent,
            geometry: SpecimenGeometry::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: SpecimenGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CompositeResult<()> {
        if self.fiber_type.trim().is_empty() {
            return Err(CompositeError::missing_field("fiber_type"));
        }
        if !self.fvf_percent.is_finite() || !(0.0..=100.0).contains(&self.fvf_percent) {
            return Err(CompositeError::invalid_input(
                "fvf_percent",
                self.fvf_percent.to_string(),
                "Fiber volume fraction must be between 0 and 100 %",
            ));
        }
        self.geometry.validate()
    }
}

/// Estimated flexural response of one specimen.
///
/// Values are kept at full precision; call [`FlexuralProperties::rounded`]
/// for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexuralProperties {
    /// Peak load (N)
    pub max_load_n: f64,
    /// Deflection at peak load (mm)
    pub max_deflection_mm: f64,
    /// End of the linear load-deflection region (mm)
    pub linear_region_end_mm: f64,
    /// Flexural strength at peak load (MPa)
    pub flexural_strength_mpa: f64,
    /// Flexural modulus (GPa)
    pub flexural_modulus_gpa: f64,
    /// Specimen thickness used (mm)
    pub thickness_mm: f64,
    /// Specimen width used (mm)
    pub width_mm: f64,
    /// Support span used (mm)
    pub span_mm: f64,
}

impl FlexuralProperties {
    /// Slope of the linear region (N/mm)
    pub fn linear_slope_n_per_mm(&self) -> f64 {
        LINEAR_LOAD_RATIO * self.max_load_n / self.linear_region_end_mm
    }

    /// Geometry the estimate was made for
    pub fn geometry(&self) -> SpecimenGeometry {
        SpecimenGeometry::new(self.thickness_mm, self.width_mm, self.span_mm)
    }

    /// Copy with the computed values rounded to 2 decimal places
    pub fn rounded(&self) -> Self {
        FlexuralProperties {
            max_load_n: round_to(self.max_load_n, 2),
            max_deflection_mm: round_to(self.max_deflection_mm, 2),
            linear_region_end_mm: round_to(self.linear_region_end_mm, 2),
            flexural_strength_mpa: round_to(self.flexural_strength_mpa, 2),
            flexural_modulus_gpa: round_to(self.flexural_modulus_gpa, 2),
            ..*self
        }
    }
}

/// Estimate flexural properties for a fiber type and volume fraction.
///
/// Unknown fiber types use the table's fallback factor and log a warning.
///
/// # Errors
///
/// - `MissingField` when the fiber type is blank
/// - `InvalidInput` when the FVF is outside 0-100 % or a dimension is not positive
pub fn calculate(
    input: &FlexuralInput,
    factors: &ReinforcementTable,
    base: &BaseResponse,
) -> CompositeResult<FlexuralProperties> {
    input.validate()?;
    base.validate()?;

    if !factors.is_known(&input.fiber_type) {
        log::warn!(
            "no reinforcement factor for fiber type '{}', using fallback load factor {}",
            input.fiber_type,
            factors.fallback.load_factor
        );
    }
    let factor = factors.lookup(&input.fiber_type);
    let v = Fraction::from(Percent(input.fvf_percent)).value();

    let max_load_n = base.max_load_n + factor.load_factor * v * 100.0;
    let max_deflection_mm = base.max_deflection_mm * (1.0 - DEFLECTION_REDUCTION * v);
    let linear_region_end_mm = max_deflection_mm * (LINEAR_REGION_BASE + LINEAR_REGION_GROWTH * v);
    let slope = LINEAR_LOAD_RATIO * max_load_n / linear_region_end_mm;

    let g = &input.geometry;
    let flexural_strength_mpa = flexural_strength(max_load_n, g.span_mm, g.width_mm, g.thickness_mm);
    let flexural_modulus_gpa = flexural_modulus_gpa(g.span_mm, g.width_mm, g.thickness_mm, slope);
    if !flexural_strength_mpa.is_finite() || !flexural_modulus_gpa.is_finite() {
        return Err(CompositeError::calculation_failed(
            "flexural",
            format!("non-finite result for geometry {:?}", g),
        ));
    }

    log::debug!(
        "flexural estimate {}/{} at {}% FVF: P={:.3} N, δ={:.3} mm, σ={:.3} MPa, E={:.3} GPa",
        input.fiber_type,
        input.matrix_type,
        input.fvf_percent,
        max_load_n,
        max_deflection_mm,
        flexural_strength_mpa,
        flexural_modulus_gpa
    );

    Ok(FlexuralProperties {
        max_load_n,
        max_deflection_mm,
        linear_region_end_mm,
        flexural_strength_mpa,
        flexural_modulus_gpa,
        thickness_mm: g.thickness_mm,
        width_mm: g.width_mm,
        span_mm: g.span_mm,
    })
}
