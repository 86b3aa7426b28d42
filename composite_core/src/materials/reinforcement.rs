//! Fiber Reinforcement Factors
//!
//! Per-fiber-type scalars used by the parametric flexural model to scale the
//! matrix-dominated base response. The table is plain data: it is built once,
//! shared read-only, and passed into the estimator explicitly.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Reinforcement scalars for one fiber type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementFactor {
    /// Newtons of peak load added per percent of fiber volume fraction
    pub load_factor: f64,
    /// Relative stiffness of the fiber family (1.0 = reference)
    pub stiffness_factor: f64,
}

impl ReinforcementFactor {
    /// Factor applied to fiber types missing from the table
    pub const FALLBACK: ReinforcementFactor = ReinforcementFactor {
        load_factor: 10.0,
        stiffness_factor: 1.0,
    };

    pub const fn new(load_factor: f64, stiffness_factor: f64) -> Self {
        ReinforcementFactor {
            load_factor,
            stiffness_factor,
        }
    }
}

impl Default for ReinforcementFactor {
    fn default() -> Self {
        ReinforcementFactor::FALLBACK
    }
}

/// Standard fiber families: (fiber type, load factor, stiffness factor)
const STANDARD_FACTORS: [(&str, f64, f64); 7] = [
    ("Glass", 15.0, 1.2),
    ("E-Glass", 15.0, 1.2),
    ("Carbon", 25.0, 1.5),
    ("Basalt", 12.0, 1.15),
    ("Natural Fiber", 5.0, 0.9),
    ("Sisal", 4.0, 0.85),
    ("Jute", 4.5, 0.88),
];

static STANDARD_TABLE: Lazy<ReinforcementTable> = Lazy::new(|| {
    let factors = STANDARD_FACTORS
        .iter()
        .map(|&(name, load, stiffness)| (name.to_string(), ReinforcementFactor::new(load, stiffness)))
        .collect();
    ReinforcementTable {
        factors,
        fallback: ReinforcementFactor::FALLBACK,
    }
});

/// Lookup table from fiber type to [`ReinforcementFactor`]
///
/// Keys match fiber type labels exactly as they appear in sample records
/// (e.g. "Carbon", "E-Glass").
///
/// ## JSON
///
/// ```json
/// {
///   "factors": { "Carbon": { "load_factor": 25.0, "stiffness_factor": 1.5 } },
///   "fallback": { "load_factor": 10.0, "stiffness_factor": 1.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementTable {
    /// Known fiber types
    #[serde(default)]
    pub factors: BTreeMap<String, ReinforcementFactor>,
    /// Used when a fiber type has no entry
    #[serde(default)]
    pub fallback: ReinforcementFactor,
}

impl ReinforcementTable {
    /// The process-wide standard table (built on first use)
    pub fn shared() -> &'static ReinforcementTable {
        &STANDARD_TABLE
    }

    /// Owned copy of the standard table
    pub fn standard() -> Self {
        STANDARD_TABLE.clone()
    }

    /// Table with no known fiber types, only a fallback
    pub fn empty(fallback: ReinforcementFactor) -> Self {
        ReinforcementTable {
            factors: BTreeMap::new(),
            fallback,
        }
    }

    /// Add or replace a fiber type entry (builder style)
    pub fn with_factor(mut self, fiber_type: impl Into<String>, factor: ReinforcementFactor) -> Self {
        self.factors.insert(fiber_type.into(), factor);
        self
    }

    /// Factor for `fiber_type`, falling back to the default for unknown types
    pub fn lookup(&self, fiber_type: &str) -> ReinforcementFactor {
        self.factors.get(fiber_type).copied().unwrap_or(self.fallback)
    }

    /// Whether `fiber_type` has its own entry
    pub fn is_known(&self, fiber_type: &str) -> bool {
        self.factors.contains_key(fiber_type)
    }

    /// Known fiber types in ascending order
    pub fn fiber_types(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }
}

impl Default for ReinforcementTable {
    fn default() -> Self {
        ReinforcementTable::standard()
    }
}
