//! # Experimental Sample Records
//!
//! Measured tensile results for fiber/matrix combinations and the query
//! layer over them.
//!
//! ## Structure
//!
//! ```text
//! samples
//! ├── MaterialSample   one measured specimen
//! ├── SampleFilter     fiber / matrix / orientation criteria
//! ├── SampleQuery      filtering + distinct-value collaborator (trait)
//! ├── SampleStore      in-memory dataset keyed by Uuid
//! └── statistics       min / max / avg over a filtered set
//! ```
//!
//! ## Example
//!
//! ```rust
//! use composite_core::samples::{MaterialSample, SampleFilter, SampleQuery, SampleStore};
//!
//! let mut store = SampleStore::new("lab bench");
//! store.add_sample(MaterialSample::new("Carbon", "Epoxy", 55.0, 1450.0).with_youngs_modulus(120.0))?;
//! store.add_sample(MaterialSample::new("Glass", "Epoxy", 40.0, 620.0))?;
//!
//! let carbon = store.filter_samples(&SampleFilter::new().with_fiber_type("Carbon"))?;
//! assert_eq!(carbon.len(), 1);
//! # Ok::<(), composite_core::errors::CompositeError>(())
//! ```

pub mod query;
pub mod statistics;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::equations::mixtures::weight_to_volume_fraction;
use crate::errors::{CompositeError, CompositeResult};
use crate::units::{Fraction, Percent};

pub use query::{SampleQuery, SelectionOptions};
pub use statistics::{aggregate, ContentRange, SampleStatistics, StatisticsSummary, ValueStats};
pub use store::{CombinationCount, DatasetMetadata, SampleStore, SCHEMA_VERSION};

/// Basis of a sample's fiber content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Percent of total volume
    #[default]
    Volume,
    /// Percent of total weight
    Weight,
}

fn default_orientation() -> String {
    "0".to_string()
}

/// One measured composite specimen.
///
/// ## JSON Example
///
/// ```json
/// {
///   "publish_year": 2019,
///   "fiber_type": "Carbon",
///   "matrix_type": "Epoxy",
///   "fiber_content": 55.0,
///   "content_type": "volume",
///   "orientation": "0",
///   "tensile_strength": 1450.0,
///   "youngs_modulus": 120.0,
///   "ply_count": 8
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSample {
    /// Year the source was published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<u16>,

    pub fiber_type: String,

    pub matrix_type: String,

    /// Fiber content, 0-100 %
    pub fiber_content: f64,

    /// Whether `fiber_content` is by volume or by weight
    #[serde(default)]
    pub content_type: ContentType,

    /// Ply orientation label (e.g. "0", "90", "0/90", "±45")
    #[serde(default = "default_orientation")]
    pub orientation: String,

    /// Ultimate tensile strength (MPa)
    pub tensile_strength: f64,

    /// Young's modulus (GPa), when reported
    #[serde(default)]
    pub youngs_modulus: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ply_count: Option<u32>,
}

impl MaterialSample {
    /// Volume-basis, 0° sample without modulus or ply count.
    pub fn new(
        fiber_type: impl Into<String>,
        matrix_type: impl Into<String>,
        fiber_content: f64,
        tensile_strength: f64,
    ) -> Self {
        MaterialSample {
            publish_year: None,
            fiber_type: fiber_type.into(),
            matrix_type: matrix_type.into(),
            fiber_content,
            content_type: ContentType::Volume,
            orientation: default_orientation(),
            tensile_strength,
            youngs_modulus: None,
            ply_count: None,
        }
    }

    pub fn with_youngs_modulus(mut self, youngs_modulus: f64) -> Self {
        self.youngs_modulus = Some(youngs_modulus);
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = orientation.into();
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_ply_count(mut self, ply_count: u32) -> Self {
        self.ply_count = Some(ply_count);
        self
    }

    pub fn with_publish_year(mut self, publish_year: u16) -> Self {
        self.publish_year = Some(publish_year);
        self
    }

    /// Check the record invariants.
    pub fn validate(&self) -> CompositeResult<()> {
        if self.fiber_type.trim().is_empty() {
            return Err(CompositeError::missing_field("fiber_type"));
        }
        if self.matrix_type.trim().is_empty() {
            return Err(CompositeError::missing_field("matrix_type"));
        }
        if !self.fiber_content.is_finite() || !(0.0..=100.0).contains(&self.fiber_content) {
            return Err(CompositeError::invalid_input(
                "fiber_content",
                self.fiber_content.to_string(),
                "Fiber content must be between 0 and 100 %",
            ));
        }
        if !self.tensile_strength.is_finite() || self.tensile_strength < 0.0 {
            return Err(CompositeError::invalid_input(
                "tensile_strength",
                self.tensile_strength.to_string(),
                "Tensile strength cannot be negative",
            ));
        }
        if let Some(e) = self.youngs_modulus {
            if !e.is_finite() || e < 0.0 {
                return Err(CompositeError::invalid_input(
                    "youngs_modulus",
                    e.to_string(),
                    "Young's modulus must be finite and not negative",
                ));
            }
        }
        Ok(())
    }

    /// Young's modulus when present and finite
    pub fn modulus(&self) -> Option<f64> {
        self.youngs_modulus.filter(|e| e.is_finite())
    }

    /// Fiber content on a volume basis (%).
    ///
    /// Weight-basis records are converted with the fiber and matrix densities.
    pub fn fiber_volume_percent(&self, rho_f: f64, rho_m: f64) -> f64 {
        match self.content_type {
            ContentType::Volume => self.fiber_content,
            ContentType::Weight => {
                let wf = Fraction::from(Percent(self.fiber_content)).value();
                Percent::from(Fraction(weight_to_volume_fraction(wf, rho_f, rho_m))).value()
            }
        }
    }
}

/// Filter criteria for sample queries.
///
/// Absent or blank criteria match everything. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFilter {
    #[serde(default)]
    pub fiber_type: Option<String>,
    #[serde(default)]
    pub matrix_type: Option<String>,
    #[serde(default)]
    pub orientation: Option<String>,
}

impl SampleFilter {
    /// Filter that matches every sample
    pub fn new() -> Self {
        SampleFilter::default()
    }

    pub fn with_fiber_type(mut self, fiber_type: impl Into<String>) -> Self {
        self.fiber_type = Some(fiber_type.into());
        self
    }

    pub fn with_matrix_type(mut self, matrix_type: impl Into<String>) -> Self {
        self.matrix_type = Some(matrix_type.into());
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn matches(&self, sample: &MaterialSample) -> bool {
        fn criterion(wanted: &Option<String>, actual: &str) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(w) => w == actual,
            }
        }
        criterion(&self.fiber_type, &sample.fiber_type)
            && criterion(&self.matrix_type, &sample.matrix_type)
            && criterion(&self.orientation, &sample.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_json_defaults() {
        let json = r#"{"fiber_type":"Glass","matrix_type":"Epoxy","fiber_content":40,"tensile_strength":600}"#;
        let sample: MaterialSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.content_type, ContentType::Volume);
        assert_eq!(sample.orientation, "0");
        assert_eq!(sample.youngs_modulus, None);
        assert_eq!(sample.publish_year, None);
    }

    #[test]
    fn test_null_modulus_is_absent() {
        let json = r#"{"fiber_type":"Glass","matrix_type":"Epoxy","fiber_content":40,
            "content_type":"weight","tensile_strength":600,"youngs_modulus":null}"#;
        let sample: MaterialSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.modulus(), None);
        assert_eq!(sample.content_type, ContentType::Weight);
    }

    #[test]
    fn test_validate() {
        assert!(MaterialSample::new("Carbon", "Epoxy", 55.0, 1450.0).validate().is_ok());
        assert!(MaterialSample::new("Carbon", "Epoxy", 105.0, 1450.0).validate().is_err());
        assert!(MaterialSample::new("Carbon", "Epoxy", 55.0, -1.0).validate().is_err());
        assert!(MaterialSample::new("", "Epoxy", 55.0, 1.0).validate().is_err());
        assert!(MaterialSample::new("Carbon", "Epoxy", 55.0, 1.0)
            .with_youngs_modulus(-3.0)
            .validate()
            .is_err());
        for e in [f64::INFINITY, f64::NAN] {
            let sample = MaterialSample::new("Carbon", "Epoxy", 55.0, 1.0).with_youngs_modulus(e);
            assert!(sample.validate().is_err(), "modulus {} accepted", e);
            assert_eq!(sample.modulus(), None);
        }
    }

    #[test]
    fn test_fiber_volume_percent() {
        let by_volume = MaterialSample::new("Glass", "Epoxy", 40.0, 600.0);
        assert_eq!(by_volume.fiber_volume_percent(2.54, 1.2), 40.0);

        // equal densities: weight and volume fractions coincide
        let by_weight = by_volume.clone().with_content_type(ContentType::Weight);
        assert_relative_eq!(by_weight.fiber_volume_percent(1.5, 1.5), 40.0, epsilon = 1e-9);

        // denser fiber: less volume than weight
        assert!(by_weight.fiber_volume_percent(2.54, 1.2) < 40.0);
    }

    #[test]
    fn test_filter_matching() {
        let sample = MaterialSample::new("Carbon", "Epoxy", 55.0, 1450.0).with_orientation("90");
        assert!(SampleFilter::new().matches(&sample));
        assert!(SampleFilter::new().with_fiber_type("Carbon").matches(&sample));
        assert!(SampleFilter::new().with_fiber_type("").with_orientation("90").matches(&sample));
        assert!(!SampleFilter::new().with_orientation("0").matches(&sample));
        assert!(!SampleFilter::new().with_matrix_type("epoxy").matches(&sample));
    }
}
