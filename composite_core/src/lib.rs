//! # composite_core - Composite Mechanics Calculation Engine
//!
//! `composite_core` estimates the mechanical behavior of fiber-reinforced
//! composites from closed-form micromechanics: rule-of-mixtures properties,
//! volume/weight fraction conversions, three-point-bend flexural properties
//! and idealized load-deflection and stress-strain curves. It also keeps a
//! small dataset of measured samples and summarizes filtered subsets.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Full precision**: Rounding happens only when reports are built
//!
//! ## Quick Start
//!
//! ```rust
//! use composite_core::CompositeEngine;
//!
//! let engine = CompositeEngine::default();
//!
//! let props = engine.estimate_properties("Glass", "Epoxy", 40.0, None)?;
//! println!("σf = {:.2} MPa, Ef = {:.2} GPa", props.flexural_strength_mpa, props.flexural_modulus_gpa);
//!
//! let report = engine.summary("Glass", "Epoxy")?;
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! # Ok::<(), composite_core::CompositeError>(())
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Raw formulas (rule of mixtures, flexural)
//! - [`calculations`] - Validated estimates, curves and reports
//! - [`materials`] - Reinforcement factors and the constituent catalog
//! - [`samples`] - Sample records, query collaborator, dataset store, statistics
//! - [`engine`] - Facade tying settings and calculations together
//! - [`settings`] - Engine configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Dataset and settings files with atomic saves

pub mod calculations;
pub mod engine;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod samples;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{FlexuralProperties, LoadDeflectionPoint, SpecimenGeometry};
pub use engine::CompositeEngine;
pub use errors::{CompositeError, CompositeResult};
pub use file_io::{import_samples, load_dataset, load_settings, save_dataset};
pub use samples::{MaterialSample, SampleFilter, SampleQuery, SampleStore, StatisticsSummary};
pub use settings::EngineSettings;
