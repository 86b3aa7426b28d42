//! Sample Query Collaborator
//!
//! The engine never reads a dataset directly. It asks a [`SampleQuery`] for
//! filtered records and for the distinct labels used to build selection
//! lists. [`SampleStore`](super::SampleStore) implements it in memory and so
//! does any plain slice of samples.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{MaterialSample, SampleFilter};
use crate::errors::CompositeResult;

/// Distinct labels available for selection, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub fiber_types: Vec<String>,
    pub matrix_types: Vec<String>,
    pub orientations: Vec<String>,
}

/// Record source for statistics and selection lists.
///
/// Methods return `CompositeResult` so that implementations backed by files
/// or remote stores can report failures.
pub trait SampleQuery {
    /// Samples matching `filter`, ordered by ascending fiber content
    fn filter_samples(&self, filter: &SampleFilter) -> CompositeResult<Vec<MaterialSample>>;

    /// Distinct fiber types, sorted ascending
    fn distinct_fiber_types(&self) -> CompositeResult<Vec<String>>;

    /// Distinct matrix types, sorted ascending
    fn distinct_matrix_types(&self) -> CompositeResult<Vec<String>>;

    /// Distinct orientation labels, sorted ascending
    fn distinct_orientations(&self) -> CompositeResult<Vec<String>>;

    fn selection_options(&self) -> CompositeResult<SelectionOptions> {
        Ok(SelectionOptions {
            fiber_types: self.distinct_fiber_types()?,
            matrix_types: self.distinct_matrix_types()?,
            orientations: self.distinct_orientations()?,
        })
    }
}

/// Ascending fiber content, then labels and strength so ties are stable
/// regardless of storage order.
pub(crate) fn by_fiber_content(a: &MaterialSample, b: &MaterialSample) -> Ordering {
    a.fiber_content
        .total_cmp(&b.fiber_content)
        .then_with(|| a.fiber_type.cmp(&b.fiber_type))
        .then_with(|| a.matrix_type.cmp(&b.matrix_type))
        .then_with(|| a.orientation.cmp(&b.orientation))
        .then_with(|| a.tensile_strength.total_cmp(&b.tensile_strength))
}

pub(crate) fn filter_sorted<'a>(
    samples: impl Iterator<Item = &'a MaterialSample>,
    filter: &SampleFilter,
) -> Vec<MaterialSample> {
    let mut matched: Vec<MaterialSample> = samples.filter(|s| filter.matches(s)).cloned().collect();
    matched.sort_by(by_fiber_content);
    matched
}

pub(crate) fn distinct<'a>(
    samples: impl Iterator<Item = &'a MaterialSample>,
    label: impl Fn(&MaterialSample) -> &str,
) -> Vec<String> {
    samples
        .map(label)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl SampleQuery for [MaterialSample] {
    fn filter_samples(&self, filter: &SampleFilter) -> CompositeResult<Vec<MaterialSample>> {
        Ok(filter_sorted(self.iter(), filter))
    }

    fn distinct_fiber_types(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.iter(), |s| s.fiber_type.as_str()))
    }

    fn distinct_matrix_types(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.iter(), |s| s.matrix_type.as_str()))
    }

    fn distinct_orientations(&self) -> CompositeResult<Vec<String>> {
        Ok(distinct(self.iter(), |s| s.orientation.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<MaterialSample> {
        vec![
            MaterialSample::new("Glass", "Epoxy", 50.0, 700.0),
            MaterialSample::new("Carbon", "Epoxy", 60.0, 1500.0).with_orientation("90"),
            MaterialSample::new("Glass", "Polyester", 30.0, 450.0),
            MaterialSample::new("Glass", "Epoxy", 20.0, 380.0),
            MaterialSample::new("Carbon", "Epoxy", 45.0, 1200.0),
        ]
    }

    #[test]
    fn test_filter_sorted_by_fiber_content() {
        let data = samples();
        let glass = data
            .as_slice()
            .filter_samples(&SampleFilter::new().with_fiber_type("Glass").with_matrix_type("Epoxy"))
            .unwrap();
        let contents: Vec<f64> = glass.iter().map(|s| s.fiber_content).collect();
        assert_eq!(contents, vec![20.0, 50.0]);
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let data = samples();
        let all = data.as_slice().filter_samples(&SampleFilter::new()).unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].fiber_content <= w[1].fiber_content));
    }

    #[test]
    fn test_no_match() {
        let data = samples();
        let none = data
            .as_slice()
            .filter_samples(&SampleFilter::new().with_fiber_type("Basalt"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_distinct_values_sorted_and_deduplicated() {
        let data = samples();
        let q = data.as_slice();
        assert_eq!(q.distinct_fiber_types().unwrap(), vec!["Carbon", "Glass"]);
        assert_eq!(q.distinct_matrix_types().unwrap(), vec!["Epoxy", "Polyester"]);
        assert_eq!(q.distinct_orientations().unwrap(), vec!["0", "90"]);
    }

    #[test]
    fn test_selection_options() {
        let data = samples();
        let options = data.as_slice().selection_options().unwrap();
        assert_eq!(options.fiber_types.len(), 2);
        assert_eq!(options.orientations, vec!["0", "90"]);
    }
}
