//! # Flexural Reports
//!
//! Presentation-ready bundles built on the estimator and the curve
//! synthesizer. Reports are rounded here and nowhere earlier: properties to
//! 2 decimals, curve deflection to 3 and load to 2.
//!
//! - [`curve_report`] - one composition, properties plus curve
//! - [`compare`] - several fiber volume fractions side by side
//! - [`summary`] - the standard FVF sweep as a table

use serde::{Deserialize, Serialize};

use crate::calculations::curve::{self, CurveInput, LoadDeflectionPoint};
use crate::calculations::flexural::{self, FlexuralInput, FlexuralProperties, SpecimenGeometry};
use crate::errors::{CompositeError, CompositeResult};
use crate::settings::EngineSettings;

/// Properties and load-deflection curve for one composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    pub fiber_type: String,
    pub matrix_type: String,
    /// Fiber volume fraction (%)
    pub fiber_volume_fraction: f64,
    pub properties: FlexuralProperties,
    pub curve_data: Vec<LoadDeflectionPoint>,
}

/// One fiber volume fraction within a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Fiber volume fraction (%)
    pub fvf: f64,
    pub properties: FlexuralProperties,
    pub curve_data: Vec<LoadDeflectionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub fiber_type: String,
    pub matrix_type: String,
    pub comparisons: Vec<ComparisonEntry>,
}

/// One row of the summary table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Fiber volume fraction (%)
    pub fiber_volume_fraction: f64,
    pub max_load_n: f64,
    pub max_deflection_mm: f64,
    pub flexural_strength_mpa: f64,
    pub flexural_modulus_gpa: f64,
    pub linear_region_end_mm: f64,
}

impl From<(f64, &FlexuralProperties)> for SummaryRow {
    fn from((fvf, props): (f64, &FlexuralProperties)) -> Self {
        SummaryRow {
            fiber_volume_fraction: fvf,
            max_load_n: props.max_load_n,
            max_deflection_mm: props.max_deflection_mm,
            flexural_strength_mpa: props.flexural_strength_mpa,
            flexural_modulus_gpa: props.flexural_modulus_gpa,
            linear_region_end_mm: props.linear_region_end_mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub fiber_type: String,
    pub matrix_type: String,
    pub specimen_dimensions: SpecimenGeometry,
    pub summary: Vec<SummaryRow>,
}

/// Parse a comma-separated FVF list such as `"10, 30,50"`.
///
/// Blank items are skipped; anything else that is not a number fails.
pub fn parse_fvf_list(list: &str) -> CompositeResult<Vec<f64>> {
    let values = list
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<f64>().map_err(|_| {
                CompositeError::invalid_input("fvf_list", item, "Fiber volume fractions must be numbers")
            })
        })
        .collect::<CompositeResult<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(CompositeError::missing_field("fvf_list"));
    }
    Ok(values)
}

fn estimate(
    fiber_type: &str,
    matrix_type: &str,
    fvf_percent: f64,
    geometry: SpecimenGeometry,
    settings: &EngineSettings,
) -> CompositeResult<FlexuralProperties> {
    let input = FlexuralInput::new(fiber_type, matrix_type, fvf_percent).with_geometry(geometry);
    flexural::calculate(&input, &settings.reinforcement, &settings.base_response)
}

fn rounded_curve(props: &FlexuralProperties, points: usize) -> CompositeResult<Vec<LoadDeflectionPoint>> {
    let samples = curve::calculate(&CurveInput::from_properties(props, points))?;
    Ok(curve::rounded(&samples))
}

/// Properties and curve for one composition at the default geometry.
pub fn curve_report(
    fiber_type: &str,
    matrix_type: &str,
    fvf_percent: f64,
    settings: &EngineSettings,
) -> CompositeResult<CurveReport> {
    let props = estimate(fiber_type, matrix_type, fvf_percent, settings.default_geometry, settings)?;
    let curve_data = rounded_curve(&props, settings.curve_points)?;

    Ok(CurveReport {
        fiber_type: fiber_type.to_string(),
        matrix_type: matrix_type.to_string(),
        fiber_volume_fraction: fvf_percent,
        properties: props.rounded(),
        curve_data,
    })
}

/// Side-by-side properties and curves for several fiber volume fractions.
///
/// Entries follow the order of `fvf_percents`.
pub fn compare(
    fiber_type: &str,
    matrix_type: &str,
    fvf_percents: &[f64],
    settings: &EngineSettings,
) -> CompositeResult<ComparisonReport> {
    if fvf_percents.is_empty() {
        return Err(CompositeError::missing_field("fvf_list"));
    }

    let comparisons = fvf_percents
        .iter()
        .map(|&fvf| {
            let props = estimate(fiber_type, matrix_type, fvf, settings.default_geometry, settings)?;
            Ok(ComparisonEntry {
                fvf,
                properties: props.rounded(),
                curve_data: rounded_curve(&props, settings.curve_points)?,
            })
        })
        .collect::<CompositeResult<Vec<_>>>()?;

    Ok(ComparisonReport {
        fiber_type: fiber_type.to_string(),
        matrix_type: matrix_type.to_string(),
        comparisons,
    })
}

/// Summary table over the configured FVF sweep.
pub fn summary(fiber_type: &str, matrix_type: &str, settings: &EngineSettings) -> CompositeResult<SummaryReport> {
    let geometry = settings.default_geometry;
    let summary = settings
        .summary_fvf_percent
        .iter()
        .map(|&fvf| {
            let props = estimate(fiber_type, matrix_type, fvf, geometry, settings)?.rounded();
            Ok(SummaryRow::from((fvf, &props)))
        })
        .collect::<CompositeResult<Vec<_>>>()?;

    Ok(SummaryReport {
        fiber_type: fiber_type.to_string(),
        matrix_type: matrix_type.to_string(),
        specimen_dimensions: geometry,
        summary,
    })
}
