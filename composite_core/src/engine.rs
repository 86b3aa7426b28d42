//! # Composite Engine
//!
//! Facade over the calculation modules. The engine owns its
//! [`EngineSettings`] (geometry defaults, point counts, the reinforcement
//! table) and exposes the operations a presentation layer needs. It holds
//! no mutable state, so one instance can serve any number of callers.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::engine::CompositeEngine;
//!
//! let engine = CompositeEngine::default();
//! let props = engine.estimate_properties("Carbon", "Epoxy", 50.0, None)?;
//! let curve = engine.synthesize_curve(&props, None)?;
//!
//! assert_eq!(curve.len(), 101);
//! assert!((curve[100].deflection_mm - props.max_deflection_mm).abs() < 1e-12);
//! # Ok::<(), composite_core::errors::CompositeError>(())
//! ```

use crate::calculations::comparison::{self, ComparisonReport, CurveReport, SummaryReport};
use crate::calculations::curve::{self, CurveInput, LoadDeflectionPoint};
use crate::calculations::flexural::{self, FlexuralInput, FlexuralProperties, SpecimenGeometry};
use crate::calculations::stress_strain::{self, ModulusBoundsPoint, Phase, StressStrainInput, StressStrainPoint};
use crate::equations::mixtures::{FractionConversion, MixtureProperty};
use crate::errors::CompositeResult;
use crate::materials::{Constituent, ReinforcementTable};
use crate::samples::{self, MaterialSample, SampleFilter, SampleQuery, SelectionOptions, StatisticsSummary};
use crate::settings::EngineSettings;

/// Stateless calculation engine configured by [`EngineSettings`]
#[derive(Debug, Clone, Default)]
pub struct CompositeEngine {
    settings: EngineSettings,
}

impl CompositeEngine {
    /// Engine with validated settings.
    pub fn new(settings: EngineSettings) -> CompositeResult<Self> {
        settings.validate()?;
        Ok(CompositeEngine { settings })
    }

    /// Replace the reinforcement table (builder style)
    pub fn with_reinforcement(mut self, table: ReinforcementTable) -> Self {
        self.settings.reinforcement = table;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Flexural properties at full precision.
    ///
    /// `geometry` defaults to the configured specimen.
    pub fn estimate_properties(
        &self,
        fiber_type: &str,
        matrix_type: &str,
        fvf_percent: f64,
        geometry: Option<SpecimenGeometry>,
    ) -> CompositeResult<FlexuralProperties> {
        let input = FlexuralInput::new(fiber_type, matrix_type, fvf_percent)
            .with_geometry(geometry.unwrap_or(self.settings.default_geometry));
        flexural::calculate(&input, &self.settings.reinforcement, &self.settings.base_response)
    }

    /// Load-deflection curve for estimated properties.
    ///
    /// `points` defaults to the configured curve resolution.
    pub fn synthesize_curve(
        &self,
        properties: &FlexuralProperties,
        points: Option<usize>,
    ) -> CompositeResult<Vec<LoadDeflectionPoint>> {
        let points = points.unwrap_or(self.settings.curve_points);
        curve::calculate(&CurveInput::from_properties(properties, points))
    }

    pub fn aggregate_statistics(&self, samples: &[MaterialSample]) -> StatisticsSummary {
        samples::aggregate(samples)
    }

    /// Filter through `query`, then aggregate.
    pub fn statistics_for<Q: SampleQuery + ?Sized>(
        &self,
        query: &Q,
        filter: &SampleFilter,
    ) -> CompositeResult<StatisticsSummary> {
        let matched = query.filter_samples(filter)?;
        Ok(samples::aggregate(&matched))
    }

    pub fn selection_options<Q: SampleQuery + ?Sized>(&self, query: &Q) -> CompositeResult<SelectionOptions> {
        query.selection_options()
    }

    /// Volume/weight fraction conversion (0-1 fractions, densities in any
    /// consistent unit).
    pub fn convert_fraction(&self, kind: FractionConversion, fraction: f64, rho_f: f64, rho_m: f64) -> f64 {
        kind.apply(fraction, rho_f, rho_m)
    }

    /// Rule-of-mixtures property at fiber volume fraction `vf` (0-1).
    pub fn rule_of_mixtures(&self, kind: MixtureProperty, vf: f64, value_f: f64, value_m: f64) -> f64 {
        kind.apply(vf, value_f, value_m)
    }

    pub fn curve_report(&self, fiber_type: &str, matrix_type: &str, fvf_percent: f64) -> CompositeResult<CurveReport> {
        comparison::curve_report(fiber_type, matrix_type, fvf_percent, &self.settings)
    }

    pub fn compare(
        &self,
        fiber_type: &str,
        matrix_type: &str,
        fvf_percents: &[f64],
    ) -> CompositeResult<ComparisonReport> {
        comparison::compare(fiber_type, matrix_type, fvf_percents, &self.settings)
    }

    pub fn summary(&self, fiber_type: &str, matrix_type: &str) -> CompositeResult<SummaryReport> {
        comparison::summary(fiber_type, matrix_type, &self.settings)
    }

    /// Stress-strain curve for one phase at the configured resolution.
    pub fn stress_strain(
        &self,
        phase: Phase,
        volume_fraction: f64,
        fiber: &Constituent,
        matrix: &Constituent,
    ) -> CompositeResult<Vec<StressStrainPoint>> {
        let input = StressStrainInput::new(phase, volume_fraction, fiber.clone(), matrix.clone())
            .with_points(self.settings.stress_strain_points);
        stress_strain::calculate(&input)
    }

    pub fn modulus_bounds(&self, e_f: f64, e_m: f64) -> Vec<ModulusBoundsPoint> {
        stress_strain::property_vs_fraction(e_f, e_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{ConstituentCatalog, ReinforcementFactor};
    use crate::samples::SampleStore;
    use approx::assert_relative_eq;

    #[test]
    fn test_estimate_uses_default_geometry() {
        let engine = CompositeEngine::default();
        let props = engine.estimate_properties("Carbon", "Epoxy", 50.0, None).unwrap();
        assert_eq!(props.geometry(), SpecimenGeometry::default());
        assert_relative_eq!(props.max_load_n, 1300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_settings_geometry_and_points() {
        let settings = EngineSettings {
            default_geometry: SpecimenGeometry::new(4.0, 20.0, 64.0),
            curve_points: 10,
            ..Default::default()
        };
        let engine = CompositeEngine::new(settings).unwrap();
        let props = engine.estimate_properties("Glass", "Epoxy", 30.0, None).unwrap();
        assert_eq!(props.span_mm, 64.0);
        assert_eq!(engine.synthesize_curve(&props, None).unwrap().len(), 11);
        assert_eq!(engine.synthesize_curve(&props, Some(4)).unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EngineSettings {
            stress_strain_points: 0,
            ..Default::default()
        };
        assert!(CompositeEngine::new(settings).is_err());
    }

    #[test]
    fn test_injected_reinforcement_table() {
        let table = ReinforcementTable::empty(ReinforcementFactor::new(2.0, 1.0))
            .with_factor("Carbon", ReinforcementFactor::new(30.0, 1.6));
        let engine = CompositeEngine::default().with_reinforcement(table);
        let carbon = engine.estimate_properties("Carbon", "Epoxy", 10.0, None).unwrap();
        let glass = engine.estimate_properties("Glass", "Epoxy", 10.0, None).unwrap();
        assert_relative_eq!(carbon.max_load_n, 350.0, epsilon = 1e-9);
        assert_relative_eq!(glass.max_load_n, 70.0, epsilon = 1e-9);
    }

    #[test]
    fn test_statistics_for_query() {
        let store = SampleStore::from_samples(
            "test",
            vec![
                MaterialSample::new("Carbon", "Epoxy", 60.0, 1500.0),
                MaterialSample::new("Glass", "Epoxy", 40.0, 600.0),
            ],
        )
        .unwrap();
        let engine = CompositeEngine::default();
        let stats = engine
            .statistics_for(&store, &SampleFilter::new().with_fiber_type("Glass"))
            .unwrap();
        assert_eq!(stats.count(), 1);

        let none = engine
            .statistics_for(&store, &SampleFilter::new().with_fiber_type("Basalt"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_convert_and_mix() {
        let engine = CompositeEngine::default();
        let wf = engine.convert_fraction(FractionConversion::VolumeToWeight, 0.5, 2.0, 1.0);
        assert_relative_eq!(wf, 2.0 / 3.0, epsilon = 1e-12);
        let vf = engine.convert_fraction(FractionConversion::WeightToVolume, wf, 2.0, 1.0);
        assert_relative_eq!(vf, 0.5, epsilon = 1e-12);

        let e = engine.rule_of_mixtures(MixtureProperty::LongitudinalModulus, 0.6, 230.0, 3.5);
        assert_relative_eq!(e, 139.4, epsilon = 1e-9);
        assert_eq!(engine.rule_of_mixtures(MixtureProperty::TransverseModulus, 0.6, 0.0, 3.5), 0.0);
    }

    #[test]
    fn test_stress_strain_uses_configured_points() {
        let engine = CompositeEngine::default();
        let catalog = ConstituentCatalog::standard();
        let fiber = catalog.find_fiber("Kevlar 49").unwrap();
        let matrix = catalog.find_matrix("Vinyl Ester").unwrap();
        let curve = engine.stress_strain(Phase::Composite, 0.4, fiber, matrix).unwrap();
        assert_eq!(curve.len(), 51);
        assert_eq!(engine.modulus_bounds(fiber.elastic_modulus_gpa, matrix.elastic_modulus_gpa).len(), 21);
    }
}
