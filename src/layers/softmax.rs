use serde::{Serialize, Deserialize};

use crate::math::Tensor;

/// Numerically stable softmax over a vector.
///
/// Backward is a pass-through: this layer is always trained against
/// categorical cross-entropy, whose derivative already yields the combined
/// softmax+CE gradient (predicted - expected) with respect to the logits.
/// Applying the softmax Jacobian here would double-count it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Softmax {
        Softmax
    }

    pub fn forward(&mut self, input: Tensor) -> Tensor {
        let max = input.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = input.data.iter().map(|&x| (x - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        Tensor::vector(exps.into_iter().map(|e| e / sum).collect())
    }

    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        grad_out
    }
}
