use std::time::Instant;

use log::debug;
use rand::seq::SliceRandom;

use crate::dataset::{Dataset, LabelSet};
use crate::error::SketchError;
use crate::infer::argmax_first;
use crate::loss::CrossEntropyLoss;
use crate::network::{builder, Network, TrainedModel};
use crate::optim::Adam;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains a fresh network over the accumulated dataset and returns it as a
/// `TrainedModel` paired with a snapshot of `labels`.
///
/// The returned model is built by value and never touches any previously
/// live model; installing it (or discarding it on error) is the caller's
/// single atomic step. Batched index buffers are locals and are dropped on
/// every exit path.
///
/// # Errors
/// - `InsufficientData` when `dataset.len() < labels.len()`. The threshold
///   is a total count, not a per-class guarantee.
/// - `TrainingFailed` when an example's target width does not match the
///   current vocabulary, or when the loss stops being finite.
pub fn train(
    dataset: &Dataset,
    labels: &LabelSet,
    config: &TrainConfig,
) -> Result<TrainedModel, SketchError> {
    let n = dataset.len();
    let classes = labels.len();
    if n < classes {
        return Err(SketchError::InsufficientData { have: n, need: classes });
    }
    if config.batch_size == 0 || config.epochs == 0 {
        return Err(SketchError::TrainingFailed(
            "epochs and batch size must both be at least 1".to_string(),
        ));
    }
    // One-hot targets were built when each example was committed; if the
    // vocabulary has been resized since, those widths no longer line up
    // with the output layer and the run must not start.
    if let Some(bad) = dataset.examples().iter().find(|e| e.target.len() != classes) {
        return Err(SketchError::TrainingFailed(format!(
            "dataset targets are {} wide but the vocabulary now has {} labels",
            bad.target.len(),
            classes
        )));
    }

    let mut network = builder::build(classes);
    let mut optimizer = Adam::new(config.learning_rate);

    debug!("training over {} examples, {} classes, {} epochs", n, classes, config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let (loss, accuracy) = run_one_epoch(&mut network, dataset, &mut optimizer, config.batch_size)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!("epoch {}/{}: loss {:.4}, accuracy {:.3}", epoch, config.epochs, loss, accuracy);

        if let Some(ref tx) = config.progress_tx {
            // Advisory only: a dropped receiver never aborts the run.
            let _ = tx.send(EpochStats {
                epoch,
                total_epochs: config.epochs,
                loss,
                accuracy,
                elapsed_ms,
            });
        }
    }

    Ok(TrainedModel::new(network, labels.clone()))
}

/// One full pass of shuffled mini-batch training. Gradients accumulate per
/// sample, are averaged over the batch, then applied with one Adam step.
/// Returns (mean loss, accuracy) over the pass.
fn run_one_epoch(
    network: &mut Network,
    dataset: &Dataset,
    optimizer: &mut Adam,
    batch_size: usize,
) -> Result<(f64, f64), SketchError> {
    let examples = dataset.examples();
    let n = examples.len();
    let mut total_loss = 0.0;
    let mut correct = 0usize;

    // Shuffle sample order each epoch.
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rand::thread_rng());

    for batch_start in (0..n).step_by(batch_size) {
        let batch_end = (batch_start + batch_size).min(n);
        let batch = &indices[batch_start..batch_end];

        network.zero_grads();
        for &idx in batch {
            let example = &examples[idx];

            let output = network.forward(example.input.clone(), true);
            let loss = CrossEntropyLoss::loss(&output, &example.target);
            if !loss.is_finite() {
                return Err(SketchError::TrainingFailed(format!(
                    "loss became non-finite on example {}",
                    idx
                )));
            }
            total_loss += loss;
            if argmax_first(&output) == argmax_first(&example.target) {
                correct += 1;
            }

            // Combined softmax+CE gradient w.r.t. the logits.
            let delta = CrossEntropyLoss::derivative(&output, &example.target);
            network.backward(delta);
        }

        network.scale_grads(1.0 / batch.len() as f64);
        optimizer.step(network);
    }

    Ok((total_loss / n as f64, correct as f64 / n as f64))
}
