use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::math::{init, Tensor};

/// Fully connected layer.
///
/// Weights are stored flat in input-major order: `weights[i * size + j]`
/// connects input `i` to neuron `j`. Pre-activation values (z = Wx + b) are
/// cached on forward because the derivative must be evaluated at z, not at
/// the activated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub input_size: usize,
    pub size: usize,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
    pub activation: Activation,

    #[serde(skip)]
    input: Vec<f64>,
    #[serde(skip)]
    pre_act: Vec<f64>,
    #[serde(skip)]
    pub w_grads: Vec<f64>,
    #[serde(skip)]
    pub b_grads: Vec<f64>,
}

impl Dense {
    /// Fresh layer with He init for ReLU, Xavier otherwise.
    pub fn new(input_size: usize, size: usize, activation: Activation) -> Dense {
        let weights = match activation {
            Activation::ReLU => init::he(input_size, input_size * size),
            _ => init::xavier(input_size, input_size * size),
        };
        Dense {
            input_size,
            size,
            weights,
            biases: vec![0.0; size],
            activation,
            input: Vec::new(),
            pre_act: Vec::new(),
            w_grads: Vec::new(),
            b_grads: Vec::new(),
        }
    }

    pub fn forward(&mut self, input: Tensor) -> Tensor {
        debug_assert_eq!(input.len(), self.input_size);
        let mut z = self.biases.clone();
        for (i, &x) in input.data.iter().enumerate() {
            let row = &self.weights[i * self.size..(i + 1) * self.size];
            for (j, &w) in row.iter().enumerate() {
                z[j] += x * w;
            }
        }
        let out: Vec<f64> = z.iter().map(|&v| self.activation.function(v)).collect();
        self.input = input.data;
        self.pre_act = z;
        Tensor::vector(out)
    }

    /// Accumulates parameter gradients for this sample and returns the
    /// gradient with respect to the layer input.
    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        // δ = ∂L/∂a ⊙ σ'(z)
        let delta: Vec<f64> = grad_out
            .data
            .iter()
            .zip(self.pre_act.iter())
            .map(|(&g, &z)| g * self.activation.derivative(z))
            .collect();

        if self.w_grads.is_empty() {
            self.w_grads = vec![0.0; self.weights.len()];
            self.b_grads = vec![0.0; self.biases.len()];
        }

        for (j, &d) in delta.iter().enumerate() {
            self.b_grads[j] += d;
        }
        for (i, &x) in self.input.iter().enumerate() {
            let row = &mut self.w_grads[i * self.size..(i + 1) * self.size];
            for (j, &d) in delta.iter().enumerate() {
                row[j] += x * d;
            }
        }

        // ∂L/∂input = W · δ
        let mut grad_in = vec![0.0; self.input_size];
        for (i, g) in grad_in.iter_mut().enumerate() {
            let row = &self.weights[i * self.size..(i + 1) * self.size];
            *g = row.iter().zip(delta.iter()).map(|(&w, &d)| w * d).sum();
        }
        Tensor::vector(grad_in)
    }

    pub fn zero_grads(&mut self) {
        self.w_grads = vec![0.0; self.weights.len()];
        self.b_grads = vec![0.0; self.biases.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_affine_for_identity() {
        let mut layer = Dense::new(2, 1, Activation::Identity);
        layer.weights = vec![2.0, -1.0];
        layer.biases = vec![0.5];
        let out = layer.forward(Tensor::vector(vec![3.0, 4.0]));
        assert!((out.data[0] - (2.0 * 3.0 - 1.0 * 4.0 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn backward_accumulates_gradients() {
        let mut layer = Dense::new(2, 2, Activation::Identity);
        layer.zero_grads();
        layer.forward(Tensor::vector(vec![1.0, -2.0]));
        let grad_in = layer.backward(Tensor::vector(vec![1.0, 0.0]));
        assert_eq!(grad_in.len(), 2);
        // ∂L/∂b0 = δ0 = 1, ∂L/∂w(i,0) = x_i
        assert!((layer.b_grads[0] - 1.0).abs() < 1e-12);
        assert!((layer.w_grads[0] - 1.0).abs() < 1e-12);
        assert!((layer.w_grads[2] + 2.0).abs() < 1e-12);
    }
}
