//! Constituent Materials
//!
//! Datasheet properties for individual fibers and matrices. These feed the
//! rule-of-mixtures calculations and the stress-strain curves.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CompositeError, CompositeResult};

/// Role of a constituent within a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstituentKind {
    /// Reinforcing fiber
    Fiber,
    /// Binding matrix
    Matrix,
}

/// Datasheet properties of a fiber or matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    /// Catalog name (e.g. "Carbon Fiber", "Epoxy Resin")
    pub name: String,
    /// Fiber or matrix
    pub kind: ConstituentKind,
    /// Density (g/cm³)
    pub density_g_cm3: f64,
    /// Ultimate tensile strength (MPa)
    pub tensile_strength_mpa: f64,
    /// Elastic modulus (GPa)
    pub elastic_modulus_gpa: f64,
    /// Strain to failure (%)
    pub max_strain_percent: f64,
}

impl Constituent {
    pub fn new(
        name: impl Into<String>,
        kind: ConstituentKind,
        density_g_cm3: f64,
        tensile_strength_mpa: f64,
        elastic_modulus_gpa: f64,
        max_strain_percent: f64,
    ) -> Self {
        Constituent {
            name: name.into(),
            kind,
            density_g_cm3,
            tensile_strength_mpa,
            elastic_modulus_gpa,
            max_strain_percent,
        }
    }

    /// Validate datasheet values
    pub fn validate(&self) -> CompositeResult<()> {
        if self.name.trim().is_empty() {
            return Err(CompositeError::missing_field("name"));
        }
        if self.density_g_cm3.is_nan() || self.density_g_cm3 <= 0.0 {
            return Err(CompositeError::invalid_input(
                "density_g_cm3",
                self.density_g_cm3.to_string(),
                "Density must be positive",
            ));
        }
        if self.tensile_strength_mpa < 0.0 {
            return Err(CompositeError::invalid_input(
                "tensile_strength_mpa",
                self.tensile_strength_mpa.to_string(),
                "Tensile strength cannot be negative",
            ));
        }
        if self.elastic_modulus_gpa < 0.0 {
            return Err(CompositeError::invalid_input(
                "elastic_modulus_gpa",
                self.elastic_modulus_gpa.to_string(),
                "Elastic modulus cannot be negative",
            ));
        }
        if !(0.0..=100.0).contains(&self.max_strain_percent) {
            return Err(CompositeError::invalid_input(
                "max_strain_percent",
                self.max_strain_percent.to_string(),
                "Strain to failure must be between 0 and 100 %",
            ));
        }
        Ok(())
    }
}

static STANDARD_CATALOG: Lazy<ConstituentCatalog> = Lazy::new(|| {
    use ConstituentKind::{Fiber, Matrix};
    ConstituentCatalog::new(vec![
        Constituent::new("Carbon Fiber", Fiber, 1.8, 4000.0, 230.0, 1.7),
        Constituent::new("E-Glass Fiber", Fiber, 2.54, 3445.0, 72.5, 4.8),
        Constituent::new("Kevlar 49", Fiber, 1.44, 3620.0, 131.0, 2.8),
        Constituent::new("S-Glass Fiber", Fiber, 2.49, 4710.0, 86.9, 5.4),
        Constituent::new("Epoxy Resin", Matrix, 1.2, 75.0, 3.5, 5.0),
        Constituent::new("Polyester Resin", Matrix, 1.1, 55.0, 2.8, 2.5),
        Constituent::new("Aluminum Matrix", Matrix, 2.7, 310.0, 69.0, 12.0),
        Constituent::new("Vinyl Ester", Matrix, 1.15, 82.0, 3.3, 4.5),
    ])
});

/// Name-sorted collection of fibers and matrices
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstituentCatalog {
    entries: Vec<Constituent>,
}

impl ConstituentCatalog {
    /// Build a catalog; entries are kept sorted by name
    pub fn new(mut entries: Vec<Constituent>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        ConstituentCatalog { entries }
    }

    /// Built-in datasheet values for common fibers and matrices
    pub fn standard() -> &'static ConstituentCatalog {
        &STANDARD_CATALOG
    }

    /// Fibers, sorted by name
    pub fn fibers(&self) -> impl Iterator<Item = &Constituent> {
        self.entries.iter().filter(|c| c.kind == ConstituentKind::Fiber)
    }

    /// Matrices, sorted by name
    pub fn matrices(&self) -> impl Iterator<Item = &Constituent> {
        self.entries.iter().filter(|c| c.kind == ConstituentKind::Matrix)
    }

    /// Find a fiber by name (case-insensitive)
    pub fn find_fiber(&self, name: &str) -> CompositeResult<&Constituent> {
        self.find(name, ConstituentKind::Fiber)
    }

    /// Find a matrix by name (case-insensitive)
    pub fn find_matrix(&self, name: &str) -> CompositeResult<&Constituent> {
        self.find(name, ConstituentKind::Matrix)
    }

    fn find(&self, name: &str, kind: ConstituentKind) -> CompositeResult<&Constituent> {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|c| c.kind == kind && c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CompositeError::material_not_found(name))
    }
}
