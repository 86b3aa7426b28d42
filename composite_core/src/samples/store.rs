//! # Sample Dataset Store
//!
//! `SampleStore` is the root container for experimental records. It
//! serializes to a human-readable JSON dataset file (see
//! [`crate::file_io`] for atomic saves).
//!
//! ## Structure
//!
//! ```text
//! SampleStore
//! ├── meta: DatasetMetadata (schema version, source, timestamps)
//! └── samples: HashMap<Uuid, MaterialSample>
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::query::{distinct, filter_sorted, SampleQuery};
use super::{MaterialSample, SampleFilter};
use crate::errors::CompositeResult;

/// Current schema version for dataset files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Dataset header stored alongside the samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Where the records came from (lab, publication, import file)
    pub source: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Number of samples for one fiber / matrix / orientation combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationCount {
    pub fiber_type: String,
    pub matrix_type: String,
    pub orientation: String,
    pub count: usize,
}

/// In-memory sample dataset.
///
/// Samples live in a flat UUID-keyed map. Every mutation bumps
/// `meta.modified`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleStore {
    pub meta: DatasetMetadata,

    pub samples: HashMap<Uuid, MaterialSample>,
}

impl SampleStore {
    /// Create an empty dataset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use composite_core::samples::SampleStore;
    ///
    /// let store = SampleStore::new("tensile campaign 2024");
    /// assert_eq!(store.meta.source, "tensile campaign 2024");
    /// assert!(store.is_empty());
    /// ```
    pub fn new(source: impl Into<String>) -> Self {
        let now = Utc::now();
        SampleStore {
            meta: DatasetMetadata {
                version: SCHEMA_VERSION.to_string(),
                source: source.into(),
                created: now,
                modified: now,
            },
            samples: HashMap::new(),
        }
    }

    /// Build a dataset from records, validating each one.
    pub fn from_samples(
        source: impl Into<String>,
        samples: impl IntoIterator<Item = MaterialSample>,
    ) -> CompositeResult<Self> {
        let mut store = SampleStore::new(source);
        for sample in samples {
            store.add_sample(sample)?;
        }
        Ok(store)
    }

    /// Validate and insert a sample, returning its new id.
    pub fn add_sample(&mut self, sample: MaterialSample) -> CompositeResult<Uuid> {
        sample.validate()?;
        let id = Uuid::new_v4();
        self.samples.insert(id, sample);
        self.touch();
        Ok(id)
    }

    /// Remove a sample by id, returning it if it existed.
    pub fn remove_sample(&mut self, id: &Uuid) -> Option<MaterialSample> {
        let sample = self.samples.remove(id);
        if sample.is_some() {
            self.touch();
        }
        sample
    }

    pub fn get_sample(&self, id: &Uuid) -> Option<&MaterialSample> {
        self.samples.get(id)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Sample count per fiber / matrix / orientation, sorted by those labels
    pub fn combination_counts(&self) -> Vec<CombinationCount> {
        let mut counts: BTreeMap<(&str, &str, &str), usize> = BTreeMap::new();
        for s in self.samples.values() {
            *counts
                .entry((s.fiber_type.as_str(), s.matrix_type.as_str(), s.orientation.as_str()))
                .or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|((fiber, matrix, orientation), count)| CombinationCount {
                fiber_type: fiber.to_string(),
                matrix_type: matrix.to_string(),
                orientation: orientation.to_string(),
                count,
            })
            .collect()
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        SampleStore::new("")
    }
}

impl SampleQuery for SampleStore {
    fn filter_samples(&self, filter: &SampleFilter) -> CompositeResult<Vec<MaterialSample>> {
        Ok(filter_sorted(self.samples.values(), filter))
    }

    fn distinct_fiber_types(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.samples.values(), |s| s.fiber_type.as_str()))
    }

    fn distinct_matrix_types(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.samples.values(), |s| s.matrix_type.as_str()))
    }

    fn distinct_orientations(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.samples.values(), |s| s.orientation.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SampleStore {
        SampleStore::from_samples(
            "test",
            vec![
                MaterialSample::new("Carbon", "Epoxy", 60.0, 1500.0).with_youngs_modulus(130.0),
                MaterialSample::new("Carbon", "Epoxy", 45.0, 1200.0),
                MaterialSample::new("Carbon", "Epoxy", 50.0, 300.0).with_orientation("90"),
                MaterialSample::new("Glass", "Polyester", 30.0, 450.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_store() {
        let store = SampleStore::new("bench");
        assert_eq!(store.meta.version, SCHEMA_VERSION);
        assert_eq!(store.meta.created, store.meta.modified);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_get_remove() {
        let mut store = SampleStore::new("bench");
        let created = store.meta.created;
        let id = store.add_sample(MaterialSample::new("Basalt", "Vinyl Ester", 35.0, 800.0)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_sample(&id).unwrap().fiber_type, "Basalt");
        assert!(store.meta.modified >= created);

        let removed = store.remove_sample(&id).unwrap();
        assert_eq!(removed.matrix_type, "Vinyl Ester");
        assert!(store.get_sample(&id).is_none());
        assert!(store.remove_sample(&id).is_none());
    }

    #[test]
    fn test_add_invalid_sample_rejected() {
        let mut store = SampleStore::new("bench");
        let err = store.add_sample(MaterialSample::new("Carbon", "Epoxy", 140.0, 1.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter_and_distinct() {
        let store = store();
        let carbon_0 = store
            .filter_samples(&SampleFilter::new().with_fiber_type("Carbon").with_orientation("0"))
            .unwrap();
        let contents: Vec<f64> = carbon_0.iter().map(|s| s.fiber_content).collect();
        assert_eq!(contents, vec![45.0, 60.0]);
        assert_eq!(store.distinct_fiber_types().unwrap(), vec!["Carbon", "Glass"]);
        assert_eq!(store.distinct_orientations().unwrap(), vec!["0", "90"]);
    }

    #[test]
    fn test_combination_counts() {
        let counts = store().combination_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts[0],
            CombinationCount {
                fiber_type: "Carbon".to_string(),
                matrix_type: "Epoxy".to_string(),
                orientation: "0".to_string(),
                count: 2,
            }
        );
        assert_eq!(counts[2].fiber_type, "Glass");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let store = store();
        let json = serde_json::to_string_pretty(&store).unwrap();
        assert!(json.contains("\"version\": \"0.1.0\""));

        let roundtrip: SampleStore = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.len(), 4);
        assert_eq!(roundtrip.meta, store.meta);
    }
}
