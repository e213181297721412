/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Computes the scalar cross-entropy loss:
    ///   L = -sum(expected[i] * log(predicted[i] + eps))
    ///
    /// `predicted` — softmax probabilities, shape [n_classes]
    /// `expected`  — one-hot target distribution, shape [n_classes]
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e * (p + EPS).ln())
            .sum()
    }

    /// Gradient of the combined Softmax + cross-entropy w.r.t. the pre-softmax
    /// logits (i.e. the inputs to the Softmax layer).
    ///
    /// When Softmax and cross-entropy are composed together the gradient
    /// simplifies to:
    ///   ∂L/∂z_i = predicted[i] - expected[i]   (element-wise)
    ///
    /// This is the initial delta passed into the backward pass. The Softmax
    /// layer's own backward is the identity so the combined gradient is not
    /// double-applied.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| p - e)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_has_near_zero_loss() {
        let loss = CrossEntropyLoss::loss(&[1.0, 0.0], &[1.0, 0.0]);
        assert!(loss.abs() < 1e-9);
    }

    #[test]
    fn derivative_is_predicted_minus_expected() {
        let d = CrossEntropyLoss::derivative(&[0.7, 0.3], &[1.0, 0.0]);
        assert!((d[0] + 0.3).abs() < 1e-12);
        assert!((d[1] - 0.3).abs() < 1e-12);
    }
}
