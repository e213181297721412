use std::sync::Mutex;

use crate::network::TrainedModel;

/// The single live model, owned by a swap-under-lock slot.
///
/// Replacement happens in one `install` call, so an observer either sees
/// the previous fully-formed model or the new one, never a half-replaced
/// state. Forward passes mutate layer caches, which is why readers go
/// through `with_model` rather than getting a shared reference out.
#[derive(Default)]
pub struct ModelSlot {
    inner: Mutex<Option<TrainedModel>>,
}

impl ModelSlot {
    pub fn empty() -> ModelSlot {
        ModelSlot::default()
    }

    /// Swaps in a new live model, dropping the previous one.
    pub fn install(&self, model: TrainedModel) {
        *self.inner.lock().unwrap() = Some(model);
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.lock().unwrap().is_some()
    }

    /// Runs `f` against the live model, or returns `None` when the slot is
    /// empty.
    pub fn with_model<R>(&self, f: impl FnOnce(&mut TrainedModel) -> R) -> Option<R> {
        self.inner.lock().unwrap().as_mut().map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabelSet;
    use crate::network::builder;

    #[test]
    fn empty_slot_yields_none() {
        let slot = ModelSlot::empty();
        assert!(!slot.is_loaded());
        assert_eq!(slot.with_model(|m| m.output_width()), None);
    }

    #[test]
    fn install_replaces_the_previous_model() {
        let slot = ModelSlot::empty();
        let one = LabelSet::new("a").unwrap();
        slot.install(crate::network::TrainedModel::new(builder::build(1), one));
        assert_eq!(slot.with_model(|m| m.output_width()), Some(1));

        let mut two = LabelSet::new("a").unwrap();
        two.add("b").unwrap();
        slot.install(crate::network::TrainedModel::new(builder::build(2), two));
        assert_eq!(slot.with_model(|m| m.output_width()), Some(2));
    }
}
