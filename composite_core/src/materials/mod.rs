//! # Materials Database
//!
//! Material data used by the engine:
//!
//! - **Reinforcement factors**: per-fiber-type scalars driving the parametric
//!   flexural model ([`ReinforcementTable`])
//! - **Constituents**: datasheet properties of fibers and matrices for
//!   rule-of-mixtures and stress-strain work ([`ConstituentCatalog`])
//!
//! ## Example
//!
//! ```rust
//! use composite_core::materials::{ConstituentCatalog, ReinforcementTable};
//!
//! let factors = ReinforcementTable::standard();
//! assert_eq!(factors.lookup("Carbon").load_factor, 25.0);
//! assert_eq!(factors.lookup("Graphene").load_factor, 10.0); // fallback
//!
//! let carbon = ConstituentCatalog::standard().find_fiber("Carbon Fiber").unwrap();
//! println!("E = {} GPa, ρ = {} g/cm³", carbon.elastic_modulus_gpa, carbon.density_g_cm3);
//! ```

pub mod constituents;
pub mod reinforcement;

pub use constituents::{Constituent, ConstituentCatalog, ConstituentKind};
pub use reinforcement::{ReinforcementFactor, ReinforcementTable};
