use crate::math::Tensor;
use crate::network::TrainedModel;

/// Result of classifying one preprocessed drawing. Transient — recomputed
/// on every call, never stored.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Name of the winning class, taken from the label snapshot the model
    /// was trained against.
    pub label: String,
    /// Softmax probabilities aligned with that same snapshot.
    pub probabilities: Vec<f64>,
}

/// Index of the maximum element; ties go to the first index achieving the
/// maximum, so the result is stable and deterministic.
pub fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Runs one forward pass in eval mode (dropout disabled) and decodes the
/// winning label from the model's own vocabulary snapshot. Per-call layer
/// buffers live inside the network and are overwritten by the next pass.
pub fn predict(model: &mut TrainedModel, input: &Tensor) -> Prediction {
    let probabilities = model.network.forward(input.clone(), false);
    let winner = argmax_first(&probabilities);
    let label = model
        .labels
        .name_at(winner)
        .unwrap_or_default()
        .to_string();
    Prediction { label, probabilities }
}
