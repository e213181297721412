use serde::{Serialize, Deserialize};

use crate::dataset::LabelSet;
use crate::network::Network;

/// A trained network paired with the label vocabulary it was trained
/// against.
///
/// The pairing is deliberate: one-hot indices and the output-layer width are
/// fixed at training time, so predictions must always be decoded with this
/// snapshot, not with whatever the vocabulary has become since. Comparing
/// the snapshot against the current vocabulary tells callers whether the
/// model has gone stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub network: Network,
    pub labels: LabelSet,
}

impl TrainedModel {
    pub fn new(network: Network, labels: LabelSet) -> TrainedModel {
        debug_assert_eq!(network.output_width(), labels.len());
        TrainedModel { network, labels }
    }

    pub fn output_width(&self) -> usize {
        self.network.output_width()
    }

    /// True when `current` has diverged from the snapshot this model was
    /// trained on.
    pub fn is_stale_against(&self, current: &LabelSet) -> bool {
        &self.labels != current
    }
}
