use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by the training controller.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one
/// `EpochStats` value is sent at the end of every completed epoch. This is
/// the only externally observable intermediate state of a training run,
/// which is what lets a UI render live progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy loss over all samples in this epoch.
    pub loss: f64,
    /// Fraction of samples whose argmax matched the target, in [0, 1].
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
