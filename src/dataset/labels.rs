use serde::{Serialize, Deserialize};

use crate::error::SketchError;

/// Ordered, deduplicated vocabulary of class names.
///
/// A label's position is its one-hot index and its output-neuron index, so
/// order is significant and preserved across save/load. The set is never
/// empty: construction requires one label and removal of the last one is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    pub fn new(first: impl Into<String>) -> Result<LabelSet, SketchError> {
        let mut set = LabelSet { names: Vec::new() };
        set.push_checked(first.into())?;
        Ok(set)
    }

    /// Rebuilds a vocabulary from an ordered name list, validating the
    /// non-empty and no-duplicates invariants. Used when restoring
    /// persisted state.
    pub fn from_names(names: Vec<String>) -> Result<LabelSet, SketchError> {
        let mut set = LabelSet { names: Vec::new() };
        for name in names {
            set.push_checked(name)?;
        }
        if set.names.is_empty() {
            return Err(SketchError::EmptyLabel);
        }
        Ok(set)
    }

    fn push_checked(&mut self, name: String) -> Result<(), SketchError> {
        if name.trim().is_empty() {
            return Err(SketchError::EmptyLabel);
        }
        if self.names.iter().any(|n| n == &name) {
            return Err(SketchError::DuplicateLabel(name));
        }
        self.names.push(name);
        Ok(())
    }

    /// Appends a new label at the end of the ordering.
    pub fn add(&mut self, name: impl Into<String>) -> Result<(), SketchError> {
        self.push_checked(name.into())
    }

    /// Removes a label. Rejected when it is the last one or unknown.
    pub fn remove(&mut self, name: &str) -> Result<(), SketchError> {
        if self.names.len() == 1 {
            return Err(SketchError::LastLabel);
        }
        match self.names.iter().position(|n| n == name) {
            Some(i) => {
                self.names.remove(i);
                Ok(())
            }
            None => Err(SketchError::UnknownLabel(name.to_string())),
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the vocabulary invariant keeps at least one label.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SketchError;

    #[test]
    fn order_defines_index() {
        let mut labels = LabelSet::new("circle").unwrap();
        labels.add("square").unwrap();
        labels.add("star").unwrap();
        assert_eq!(labels.index_of("circle"), Some(0));
        assert_eq!(labels.index_of("star"), Some(2));
        assert_eq!(labels.name_at(1), Some("square"));
    }

    #[test]
    fn rejects_duplicates_and_empty_names() {
        let mut labels = LabelSet::new("circle").unwrap();
        assert!(matches!(labels.add("circle"), Err(SketchError::DuplicateLabel(_))));
        assert!(matches!(labels.add("  "), Err(SketchError::EmptyLabel)));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn never_drops_below_one_label() {
        let mut labels = LabelSet::new("circle").unwrap();
        assert!(matches!(labels.remove("circle"), Err(SketchError::LastLabel)));
        assert_eq!(labels.len(), 1);

        labels.add("square").unwrap();
        labels.remove("circle").unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.index_of("square"), Some(0));
    }

    #[test]
    fn from_names_validates() {
        assert!(LabelSet::from_names(vec![]).is_err());
        let dup = LabelSet::from_names(vec!["a".into(), "a".into()]);
        assert!(matches!(dup, Err(SketchError::DuplicateLabel(_))));
        let ok = LabelSet::from_names(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(ok.len(), 2);
    }
}
