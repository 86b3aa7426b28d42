//! # Sample Statistics
//!
//! Descriptive statistics over an already-filtered set of samples.
//!
//! - `tensile_strength`: min / max / avg over every sample
//! - `youngs_modulus`: min / max / avg over samples that report it, all
//!   zeros when none do
//! - `fiber_content_range`: min / max over every sample
//!
//! An empty input yields [`StatisticsSummary::Empty`], which carries a count
//! of zero and a message but no numbers.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::samples::{aggregate, MaterialSample};
//!
//! let samples = vec![
//!     MaterialSample::new("Glass", "Epoxy", 30.0, 500.0),
//!     MaterialSample::new("Glass", "Epoxy", 50.0, 700.0),
//! ];
//! let stats = aggregate(&samples);
//! let populated = stats.statistics().unwrap();
//! assert_eq!(populated.tensile_strength.avg, 600.0);
//! assert_eq!(populated.youngs_modulus.avg, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::MaterialSample;

/// Message reported for an empty sample set
pub const NO_DATA_MESSAGE: &str = "No data found for this combination";

/// Minimum, maximum and mean of one property
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ValueStats {
    /// Statistics over `values`, or `None` when there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<ValueStats> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| ValueStats {
            min,
            max,
            avg: sum / count as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRange {
    pub min: f64,
    pub max: f64,
}

/// Statistics for a non-empty sample set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub count: usize,
    /// Tensile strength (MPa)
    pub tensile_strength: ValueStats,
    /// Young's modulus (GPa); zeros when no sample reports it
    pub youngs_modulus: ValueStats,
    /// Fiber content (%)
    pub fiber_content_range: ContentRange,
}

/// Result of [`aggregate`].
///
/// Serializes flat: `{"count": 0, "message": ...}` for an empty set, the
/// [`SampleStatistics`] fields otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatisticsSummary {
    Empty { count: usize, message: String },
    Populated(SampleStatistics),
}

impl StatisticsSummary {
    pub fn count(&self) -> usize {
        match self {
            StatisticsSummary::Empty { count, .. } => *count,
            StatisticsSummary::Populated(stats) => stats.count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatisticsSummary::Empty { .. })
    }

    pub fn statistics(&self) -> Option<&SampleStatistics> {
        match self {
            StatisticsSummary::Empty { .. } => None,
            StatisticsSummary::Populated(stats) => Some(stats),
        }
    }
}

/// Summarize a filtered sample set.
pub fn aggregate(samples: &[MaterialSample]) -> StatisticsSummary {
    let strength = ValueStats::from_values(samples.iter().map(|s| s.tensile_strength));
    let content = ValueStats::from_values(samples.iter().map(|s| s.fiber_content));

    let (Some(tensile_strength), Some(content)) = (strength, content) else {
        log::debug!("statistics requested for an empty sample set");
        return StatisticsSummary::Empty {
            count: 0,
            message: NO_DATA_MESSAGE.to_string(),
        };
    };

    let youngs_modulus = ValueStats::from_values(samples.iter().filter_map(MaterialSample::modulus))
        .unwrap_or_default();

    log::debug!(
        "statistics over {} samples: strength avg {:.2} MPa, modulus avg {:.2} GPa",
        samples.len(),
        tensile_strength.avg,
        youngs_modulus.avg
    );

    StatisticsSummary::Populated(SampleStatistics {
        count: samples.len(),
        tensile_strength,
        youngs_modulus,
        fiber_content_range: ContentRange {
            min: content.min,
            max: content.max,
        },
    })
}
