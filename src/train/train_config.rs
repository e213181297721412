use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Hyperparameters and progress plumbing for one training run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the dataset
/// - `batch_size`    — samples per mini-batch
/// - `learning_rate` — Adam step size
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch. A dropped receiver is ignored —
///                     progress is advisory and training always runs to
///                     completion or failure.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            batch_size: 16,
            learning_rate: 0.001,
            progress_tx: None,
        }
    }
}

impl TrainConfig {
    /// The default hyperparameters with a progress channel attached.
    pub fn with_progress(progress_tx: mpsc::Sender<EpochStats>) -> Self {
        TrainConfig { progress_tx: Some(progress_tx), ..TrainConfig::default() }
    }
}
