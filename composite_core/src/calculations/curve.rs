//! # Load-Deflection Curve Synthesizer
//!
//! Builds an idealized load-deflection curve from a peak load, the
//! deflection at peak and the end of the linear region.
//!
//! ```text
//! load
//!  P ┤                      ___.
//!    │                 _.--'
//! .85P ┤           .-'          nonlinear: 0.85P + 0.15P·t·(1 - 0.15t²)
//!    │         /
//!    │      /                   linear:    0.85P · δ / δ_lin
//!    │   /
//!  0 └──┴──────┴───────────┴── deflection
//!     0      δ_lin       δ_max
//! ```
//!
//! where `t = (δ - δ_lin) / (δ_max - δ_lin)`.

use serde::{Deserialize, Serialize};

use crate::calculations::flexural::FlexuralProperties;
use crate::errors::{CompositeError, CompositeResult};
use crate::units::round_to;

/// Share of peak load reached at the end of the linear region
pub const LINEAR_LOAD_RATIO: f64 = 0.85;

/// Linear region end as a share of max deflection when none is given
pub const DEFAULT_LINEAR_REGION_RATIO: f64 = 0.6;

/// Default number of curve segments
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Strength of the softening term in the nonlinear region
const SOFTENING: f64 = 0.15;

fn default_points() -> usize {
    DEFAULT_CURVE_POINTS
}

/// Input for curve synthesis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveInput {
    /// Peak load (N)
    pub max_load_n: f64,
    /// Deflection at peak load (mm)
    pub max_deflection_mm: f64,
    /// End of the linear region (mm); 0.6 · max deflection when absent
    #[serde(default)]
    pub linear_region_end_mm: Option<f64>,
    /// Number of segments; the curve has `points + 1` samples
    #[serde(default = "default_points")]
    pub points: usize,
}

impl CurveInput {
    pub fn new(max_load_n: f64, max_deflection_mm: f64) -> Self {
        CurveInput {
            max_load_n,
            max_deflection_mm,
            linear_region_end_mm: None,
            points: DEFAULT_CURVE_POINTS,
        }
    }

    /// Curve input matching an estimated property set
    pub fn from_properties(props: &FlexuralProperties, points: usize) -> Self {
        CurveInput {
            max_load_n: props.max_load_n,
            max_deflection_mm: props.max_deflection_mm,
            linear_region_end_mm: Some(props.linear_region_end_mm),
            points,
        }
    }

    pub fn with_linear_region_end(mut self, linear_region_end_mm: f64) -> Self {
        self.linear_region_end_mm = Some(linear_region_end_mm);
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Linear region end, applying the default ratio when absent
    pub fn linear_region_end(&self) -> f64 {
        self.linear_region_end_mm
            .unwrap_or(self.max_deflection_mm * DEFAULT_LINEAR_REGION_RATIO)
    }

    pub fn validate(&self) -> CompositeResult<()> {
        if self.points == 0 {
            return Err(CompositeError::invalid_input(
                "points",
                "0",
                "Curve needs at least one segment",
            ));
        }
        if !self.max_load_n.is_finite() || self.max_load_n < 0.0 {
            return Err(CompositeError::invalid_input(
                "max_load_n",
                self.max_load_n.to_string(),
                "Peak load cannot be negative",
            ));
        }
        if !self.max_deflection_mm.is_finite() || self.max_deflection_mm <= 0.0 {
            return Err(CompositeError::invalid_input(
                "max_deflection_mm",
                self.max_deflection_mm.to_string(),
                "Max deflection must be positive",
            ));
        }
        let linear_end = self.linear_region_end();
        if !linear_end.is_finite() || linear_end <= 0.0 {
            return Err(CompositeError::invalid_input(
                "linear_region_end_mm",
                linear_end.to_string(),
                "Linear region end must be positive",
            ));
        }
        Ok(())
    }
}

/// One sample of a load-deflection curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadDeflectionPoint {
    /// Deflection (mm)
    pub deflection_mm: f64,
    /// Load (N)
    pub load_n: f64,
}

impl LoadDeflectionPoint {
    /// Deflection to 3 decimals, load to 2
    pub fn rounded(&self) -> Self {
        LoadDeflectionPoint {
            deflection_mm: round_to(self.deflection_mm, 3),
            load_n: round_to(self.load_n, 2),
        }
    }
}

/// Load at a given deflection.
///
/// When the nonlinear span `max_deflection - linear_end` is not positive the
/// whole curve is treated as linear.
pub fn load_at(deflection: f64, max_load: f64, max_deflection: f64, linear_end: f64) -> f64 {
    let nonlinear_span = max_deflection - linear_end;
    if deflection <= linear_end || nonlinear_span <= 0.0 {
        LINEAR_LOAD_RATIO * max_load * (deflection / linear_end)
    } else {
        let t = ((deflection - linear_end) / nonlinear_span).clamp(0.0, 1.0);
        let softening = 1.0 - SOFTENING * t * t;
        LINEAR_LOAD_RATIO * max_load + (1.0 - LINEAR_LOAD_RATIO) * max_load * t * softening
    }
}

/// Synthesize `points + 1` evenly spaced samples from 0 to max deflection.
///
/// # Example
///
/// ```rust
/// use composite_core::calculations::curve::{calculate, CurveInput};
///
/// let input = CurveInput::new(100.0, 10.0).with_linear_region_end(6.0).with_points(10);
/// let curve = calculate(&input).unwrap();
///
/// assert_eq!(curve.len(), 11);
/// assert_eq!(curve[0].load_n, 0.0);
/// assert!((curve[10].load_n - 97.75).abs() < 1e-9);
/// ```
pub fn calculate(input: &CurveInput) -> CompositeResult<Vec<LoadDeflectionPoint>> {
    input.validate()?;

    let linear_end = input.linear_region_end();
    if linear_end >= input.max_deflection_mm {
        log::debug!(
            "linear region end {} mm reaches max deflection {} mm, curve is purely linear",
            linear_end,
            input.max_deflection_mm
        );
    }

    let steps = input.points as f64;
    let curve = (0..=input.points)
        .map(|i| {
            let deflection_mm = input.max_deflection_mm * i as f64 / steps;
            LoadDeflectionPoint {
                deflection_mm,
                load_n: load_at(deflection_mm, input.max_load_n, input.max_deflection_mm, linear_end),
            }
        })
        .collect();

    Ok(curve)
}

/// Round every sample for presentation
pub fn rounded(curve: &[LoadDeflectionPoint]) -> Vec<LoadDeflectionPoint> {
    curve.iter().map(LoadDeflectionPoint::rounded).collect()
}
