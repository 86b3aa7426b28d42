//! Engine Settings
//!
//! Tunable defaults for the calculation engine. Every field has a default,
//! so a settings file only needs the values it overrides.
//!
//! ```json
//! {
//!   "default_geometry": { "thickness_mm": 4.0, "width_mm": 25.0, "span_mm": 64.0 },
//!   "curve_points": 200,
//!   "reinforcement": {
//!     "factors": { "Aramid": { "load_factor": 18.0, "stiffness_factor": 1.3 } }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::curve::DEFAULT_CURVE_POINTS;
use crate::calculations::flexural::{BaseResponse, SpecimenGeometry};
use crate::calculations::stress_strain::DEFAULT_STRESS_STRAIN_POINTS;
use crate::errors::{CompositeError, CompositeResult};
use crate::materials::ReinforcementTable;

/// Fiber volume fractions (%) used by the summary table
pub const DEFAULT_SUMMARY_FVF_PERCENT: [f64; 6] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Specimen used when a request does not give one
    pub default_geometry: SpecimenGeometry,

    /// Segments per load-deflection curve
    pub curve_points: usize,

    /// Segments per stress-strain curve
    pub stress_strain_points: usize,

    /// Fiber volume fractions (%) listed by the summary report
    pub summary_fvf_percent: Vec<f64>,

    /// Unreinforced reference response
    pub base_response: BaseResponse,

    /// Fiber type to reinforcement factor table
    pub reinforcement: ReinforcementTable,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_geometry: SpecimenGeometry::default(),
            curve_points: DEFAULT_CURVE_POINTS,
            stress_strain_points: DEFAULT_STRESS_STRAIN_POINTS,
            summary_fvf_percent: DEFAULT_SUMMARY_FVF_PERCENT.to_vec(),
            base_response: BaseResponse::default(),
            reinforcement: ReinforcementTable::standard(),
        }
    }
}

impl EngineSettings {
    /// Validate settings values.
    pub fn validate(&self) -> CompositeResult<()> {
        self.default_geometry.validate()?;
        self.base_response.validate()?;
        if self.curve_points == 0 {
            return Err(CompositeError::invalid_input("curve_points", "0", "Must be at least 1"));
        }
        if self.stress_strain_points == 0 {
            return Err(CompositeError::invalid_input(
                "stress_strain_points",
                "0",
                "Must be at least 1",
            ));
        }
        if let Some(bad) = self
            .summary_fvf_percent
            .iter()
            .find(|v| !v.is_finite() || !(0.0..=100.0).contains(*v))
        {
            return Err(CompositeError::invalid_input(
                "summary_fvf_percent",
                bad.to_string(),
                "Fiber volume fractions must be between 0 and 100 %",
            ));
        }
        Ok(())
    }
}
