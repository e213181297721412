use log::{debug, warn};

use crate::dataset::LabelSet;
use crate::error::SketchError;
use crate::network::{Network, TrainedModel};
use crate::persist::store::KvStore;

/// Logical key the serialized network weights live under.
pub const MODEL_KEY: &str = "sketch-model";
/// Logical key the ordered label vocabulary lives under.
pub const LABELS_KEY: &str = "sketch-labels";

/// Outcome of a restore attempt. `Absent` is the expected "nothing saved
/// yet" case and lets a fresh session proceed normally — it is not an error.
pub enum LoadOutcome {
    Absent,
    Loaded(TrainedModel),
}

/// Serializes the model weights and its label snapshot under the two fixed
/// keys. Both blobs are fully encoded before anything is written, and the
/// pair goes through `put_many` so the store can commit it together.
pub fn save(model: &TrainedModel, store: &dyn KvStore) -> Result<(), SketchError> {
    let weights = model
        .network
        .to_json_bytes()
        .map_err(|e| SketchError::SaveFailed(e.to_string()))?;
    let labels = serde_json::to_vec(model.labels.names())
        .map_err(|e| SketchError::SaveFailed(e.to_string()))?;

    store
        .put_many(&[(MODEL_KEY, weights.as_slice()), (LABELS_KEY, labels.as_slice())])
        .map_err(|e| SketchError::SaveFailed(e.to_string()))?;

    debug!("saved model ({} outputs) and {} labels", model.output_width(), model.labels.len());
    Ok(())
}

/// Attempts to restore the weights/labels pair.
///
/// - Model blob missing or unreadable → `Ok(Absent)`.
/// - Labels blob missing or unreadable while the model loads → labels fall
///   back to placeholder names derived from the model's output width.
/// - Labels present but their count differs from the model's output width →
///   `Err(StateMismatch)`; using the pair would corrupt the label↔index
///   mapping.
pub fn load(store: &dyn KvStore) -> Result<LoadOutcome, SketchError> {
    let weights_blob = match store.get(MODEL_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Ok(LoadOutcome::Absent),
        Err(e) => {
            warn!("model blob unreadable, treating as absent: {}", e);
            return Ok(LoadOutcome::Absent);
        }
    };
    let network = match Network::from_json_bytes(&weights_blob) {
        Ok(network) => network,
        Err(e) => {
            warn!("model blob failed to decode, treating as absent: {}", e);
            return Ok(LoadOutcome::Absent);
        }
    };
    let outputs = network.output_width();

    let labels = match read_label_names(store) {
        Some(names) => {
            let count = names.len();
            if count != outputs {
                return Err(SketchError::StateMismatch { labels: count, outputs });
            }
            // Duplicate or empty names in the blob break the vocabulary
            // invariants just as badly as a wrong count.
            LabelSet::from_names(names)
                .map_err(|_| SketchError::StateMismatch { labels: count, outputs })?
        }
        None => {
            warn!("label artifact missing; synthesizing {} placeholder names", outputs);
            placeholder_labels(outputs)?
        }
    };

    debug!("restored model with {} outputs", outputs);
    Ok(LoadOutcome::Loaded(TrainedModel::new(network, labels)))
}

fn read_label_names(store: &dyn KvStore) -> Option<Vec<String>> {
    let blob = store.get(LABELS_KEY).ok().flatten()?;
    serde_json::from_slice(&blob).ok()
}

fn placeholder_labels(count: usize) -> Result<LabelSet, SketchError> {
    LabelSet::from_names((0..count).map(|i| format!("class-{}", i)).collect())
}
