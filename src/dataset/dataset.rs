use std::collections::BTreeMap;

use crate::dataset::LabelSet;
use crate::error::SketchError;
use crate::math::Tensor;

/// One labeled training sample: a preprocessed input tensor and the one-hot
/// target built at the time the sample was committed. Never mutated after
/// creation.
#[derive(Debug, Clone)]
pub struct Example {
    pub input: Tensor,
    pub target: Vec<f64>,
}

/// The growing in-memory collection of labeled examples.
///
/// Append-only within a session; memory grows without bound with the number
/// of committed drawings, and there is no eviction. An explicit `clear` is
/// the only way to shrink it.
#[derive(Debug, Default)]
pub struct Dataset {
    examples: Vec<Example>,
    counts: BTreeMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Dataset {
        Dataset::default()
    }

    /// Appends (tensor, one-hot target) for `label`, which must exist in
    /// `labels`. On `UnknownLabel` the dataset is left unchanged.
    pub fn add_example(
        &mut self,
        input: Tensor,
        label: &str,
        labels: &LabelSet,
    ) -> Result<(), SketchError> {
        let index = labels
            .index_of(label)
            .ok_or_else(|| SketchError::UnknownLabel(label.to_string()))?;
        let mut target = vec![0.0; labels.len()];
        target[index] = 1.0;
        self.examples.push(Example { input, target });
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Per-label example counts; counts never decrease within a session.
    pub fn label_counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Explicit reset: drops all examples and counts.
    pub fn clear(&mut self) {
        self.examples.clear();
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_labels() -> LabelSet {
        let mut labels = LabelSet::new("circle").unwrap();
        labels.add("square").unwrap();
        labels
    }

    #[test]
    fn add_example_builds_one_hot_at_label_index() {
        let labels = two_labels();
        let mut dataset = Dataset::new();
        dataset.add_example(Tensor::zeros(28, 28, 1), "square", &labels).unwrap();
        assert_eq!(dataset.examples()[0].target, vec![0.0, 1.0]);
    }

    #[test]
    fn counts_bump_for_exactly_one_label() {
        let labels = two_labels();
        let mut dataset = Dataset::new();
        dataset.add_example(Tensor::zeros(28, 28, 1), "circle", &labels).unwrap();
        dataset.add_example(Tensor::zeros(28, 28, 1), "circle", &labels).unwrap();
        dataset.add_example(Tensor::zeros(28, 28, 1), "square", &labels).unwrap();
        assert_eq!(dataset.label_counts()["circle"], 2);
        assert_eq!(dataset.label_counts()["square"], 1);
    }

    #[test]
    fn unknown_label_leaves_dataset_unchanged() {
        let labels = two_labels();
        let mut dataset = Dataset::new();
        let err = dataset.add_example(Tensor::zeros(28, 28, 1), "triangle", &labels);
        assert!(matches!(err, Err(SketchError::UnknownLabel(_))));
        assert!(dataset.is_empty());
        assert!(dataset.label_counts().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let labels = two_labels();
        let mut dataset = Dataset::new();
        dataset.add_example(Tensor::zeros(28, 28, 1), "circle", &labels).unwrap();
        dataset.clear();
        assert!(dataset.is_empty());
        assert!(dataset.label_counts().is_empty());
    }
}
