use std::sync::mpsc;

use crate::dataset::{Dataset, LabelSet};
use crate::error::SketchError;
use crate::infer::{self, Prediction};
use crate::input::{preprocess, CanvasSource};
use crate::math::Tensor;
use crate::persist::{self, KvStore, LoadOutcome};
use crate::session::slot::ModelSlot;
use crate::session::status::StatusSink;
use crate::train::{self, EpochStats, TrainConfig};

/// The single control flow tying the pipeline together: label vocabulary,
/// accumulated dataset, the live model slot, the persistence store, and a
/// status sink.
///
/// Operations run to completion one at a time (`&mut self` keeps two
/// training runs from ever being in flight) and every one of them ends by
/// pushing a status line — errors are converted to a message plus the
/// returned error kind at this boundary and never panic.
pub struct SketchSession {
    labels: LabelSet,
    dataset: Dataset,
    slot: ModelSlot,
    store: Box<dyn KvStore>,
    status: Box<dyn StatusSink>,
    selected: String,
}

impl SketchSession {
    pub fn new(
        first_label: impl Into<String>,
        store: Box<dyn KvStore>,
        status: Box<dyn StatusSink>,
    ) -> Result<SketchSession, SketchError> {
        let first = first_label.into();
        let labels = LabelSet::new(first.clone())?;
        Ok(SketchSession {
            labels,
            dataset: Dataset::new(),
            slot: ModelSlot::empty(),
            store,
            status,
            selected: first,
        })
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selected_label(&self) -> &str {
        &self.selected
    }

    pub fn has_model(&self) -> bool {
        self.slot.is_loaded()
    }

    /// True when the live model was trained against a vocabulary that has
    /// since changed. Predictions still decode against the model's own
    /// snapshot, but the caller should retrain.
    pub fn model_is_stale(&self) -> bool {
        self.slot.with_model(|m| m.is_stale_against(&self.labels)).unwrap_or(false)
    }

    pub fn add_label(&mut self, name: &str) -> Result<(), SketchError> {
        match self.labels.add(name) {
            Ok(()) => {
                self.selected = name.to_string();
                self.report(format!("added label '{}' ({} total)", name, self.labels.len()));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn remove_label(&mut self, name: &str) -> Result<(), SketchError> {
        match self.labels.remove(name) {
            Ok(()) => {
                if self.selected == name {
                    // Fall back to the first remaining label.
                    self.selected = self.labels.names()[0].clone();
                }
                self.report(format!("removed label '{}' ({} left)", name, self.labels.len()));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn select_label(&mut self, name: &str) -> Result<(), SketchError> {
        if !self.labels.contains(name) {
            return self.fail(SketchError::UnknownLabel(name.to_string()));
        }
        self.selected = name.to_string();
        self.report(format!("drawing as '{}'", name));
        Ok(())
    }

    /// Captures the canvas, preprocesses it, and commits it as an example
    /// of the currently selected label.
    pub fn add_example_from(&mut self, source: &dyn CanvasSource) -> Result<(), SketchError> {
        let result = self.capture_tensor(source).and_then(|tensor| {
            self.dataset.add_example(tensor, &self.selected, &self.labels)
        });
        match result {
            Ok(()) => {
                let count = *self.dataset.label_counts().get(&self.selected).unwrap_or(&0);
                self.report(format!("saved example for '{}' ({} so far)", self.selected, count));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Trains a fresh model over the accumulated dataset (10 epochs, batch
    /// 16) and, only on success, swaps it into the live slot. Any failure
    /// leaves the previous live model untouched.
    pub fn train(
        &mut self,
        progress: Option<mpsc::Sender<EpochStats>>,
    ) -> Result<(), SketchError> {
        let config = TrainConfig { progress_tx: progress, ..TrainConfig::default() };
        self.report(format!(
            "training on {} examples across {} labels...",
            self.dataset.len(),
            self.labels.len()
        ));
        match train::train(&self.dataset, &self.labels, &config) {
            Ok(model) => {
                self.slot.install(model);
                self.report("training done".to_string());
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Captures the canvas and classifies it with the live model.
    pub fn predict_from(&mut self, source: &dyn CanvasSource) -> Result<Prediction, SketchError> {
        let tensor = match self.capture_tensor(source) {
            Ok(t) => t,
            Err(e) => return self.fail(e),
        };
        let prediction = match self.slot.with_model(|m| infer::predict(m, &tensor)) {
            Some(p) => p,
            None => return self.fail(SketchError::ModelNotReady),
        };
        if self.model_is_stale() {
            self.report(format!(
                "guessing '{}' (labels changed since training — retrain to use them)",
                prediction.label
            ));
        } else {
            let confidence = prediction
                .probabilities
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            self.report(format!("guessing '{}' ({:.0}%)", prediction.label, confidence * 100.0));
        }
        Ok(prediction)
    }

    /// Persists the live model and its label snapshot as a pair.
    pub fn save(&mut self) -> Result<(), SketchError> {
        let result = match self.slot.with_model(|m| persist::save(m, self.store.as_ref())) {
            Some(r) => r,
            None => Err(SketchError::SaveFailed("no trained model to save".to_string())),
        };
        match result {
            Ok(()) => {
                self.report("model saved".to_string());
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Restores a previously saved model, if any. Returns whether a model
    /// was installed; an empty store is a normal fresh start, not an error.
    /// On success the session vocabulary is replaced by the restored one so
    /// labels and output indices line up again.
    pub fn load(&mut self) -> Result<bool, SketchError> {
        match persist::load(self.store.as_ref()) {
            Ok(LoadOutcome::Loaded(model)) => {
                self.labels = model.labels.clone();
                self.selected = self.labels.names()[0].clone();
                self.slot.install(model);
                self.report(format!("restored model with labels {:?}", self.labels.names()));
                Ok(true)
            }
            Ok(LoadOutcome::Absent) => {
                self.report("no saved model yet — starting fresh".to_string());
                Ok(false)
            }
            Err(e) => self.fail(e),
        }
    }

    fn capture_tensor(&self, source: &dyn CanvasSource) -> Result<Tensor, SketchError> {
        let raster = source.capture().ok_or(SketchError::SourceNotReady)?;
        preprocess(&raster)
    }

    fn report(&self, line: String) {
        self.status.status(&line);
    }

    fn fail<T>(&self, e: SketchError) -> Result<T, SketchError> {
        self.status.status(&e.to_string());
        Err(e)
    }
}
