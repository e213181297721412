use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::math::{init, Tensor};

/// 2-D convolution, valid padding, stride 1, square kernel, with a fused
/// element-wise activation.
///
/// Weights are stored flat as `[out_ch][ky][kx][in_ch]`. The input tensor
/// and pre-activation map are cached on forward for the backward pass,
/// which accumulates parameter gradients across a mini-batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conv2d {
    pub in_channels: usize,
    pub out_channels: usize,
    pub kernel: usize,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
    pub activation: Activation,

    #[serde(skip)]
    input: Tensor,
    #[serde(skip)]
    pre_act: Tensor,
    #[serde(skip)]
    pub w_grads: Vec<f64>,
    #[serde(skip)]
    pub b_grads: Vec<f64>,
}

impl Conv2d {
    pub fn new(in_channels: usize, out_channels: usize, kernel: usize, activation: Activation) -> Conv2d {
        let fan_in = in_channels * kernel * kernel;
        let n = out_channels * fan_in;
        let weights = match activation {
            Activation::ReLU => init::he(fan_in, n),
            _ => init::xavier(fan_in, n),
        };
        Conv2d {
            in_channels,
            out_channels,
            kernel,
            weights,
            biases: vec![0.0; out_channels],
            activation,
            input: Tensor::default(),
            pre_act: Tensor::default(),
            w_grads: Vec::new(),
            b_grads: Vec::new(),
        }
    }

    #[inline]
    fn w_idx(&self, oc: usize, ky: usize, kx: usize, ic: usize) -> usize {
        ((oc * self.kernel + ky) * self.kernel + kx) * self.in_channels + ic
    }

    pub fn output_shape(&self, in_h: usize, in_w: usize) -> (usize, usize, usize) {
        (in_h - self.kernel + 1, in_w - self.kernel + 1, self.out_channels)
    }

    pub fn forward(&mut self, input: Tensor) -> Tensor {
        debug_assert_eq!(input.c, self.in_channels);
        let (out_h, out_w, out_c) = self.output_shape(input.h, input.w);
        let mut z = Tensor::zeros(out_h, out_w, out_c);

        for y in 0..out_h {
            for x in 0..out_w {
                for oc in 0..out_c {
                    let mut sum = self.biases[oc];
                    for ky in 0..self.kernel {
                        for kx in 0..self.kernel {
                            for ic in 0..self.in_channels {
                                sum += input.at(y + ky, x + kx, ic)
                                    * self.weights[self.w_idx(oc, ky, kx, ic)];
                            }
                        }
                    }
                    z.set(y, x, oc, sum);
                }
            }
        }

        let out = z.map(|v| self.activation.function(v));
        self.input = input;
        self.pre_act = z;
        out
    }

    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        debug_assert_eq!(grad_out.shape(), self.pre_act.shape());
        // δ = ∂L/∂a ⊙ σ'(z), element-wise over the output map.
        let delta: Vec<f64> = grad_out
            .data
            .iter()
            .zip(self.pre_act.data.iter())
            .map(|(&g, &z)| g * self.activation.derivative(z))
            .collect();
        let delta = Tensor::from_data(grad_out.h, grad_out.w, grad_out.c, delta);

        if self.w_grads.is_empty() {
            self.w_grads = vec![0.0; self.weights.len()];
            self.b_grads = vec![0.0; self.biases.len()];
        }

        let mut grad_in = Tensor::zeros(self.input.h, self.input.w, self.input.c);
        for y in 0..delta.h {
            for x in 0..delta.w {
                for oc in 0..delta.c {
                    let d = delta.at(y, x, oc);
                    if d == 0.0 {
                        continue;
                    }
                    self.b_grads[oc] += d;
                    for ky in 0..self.kernel {
                        for kx in 0..self.kernel {
                            for ic in 0..self.in_channels {
                                let wi = self.w_idx(oc, ky, kx, ic);
                                self.w_grads[wi] += self.input.at(y + ky, x + kx, ic) * d;
                                let gi = grad_in.idx(y + ky, x + kx, ic);
                                grad_in.data[gi] += self.weights[wi] * d;
                            }
                        }
                    }
                }
            }
        }
        grad_in
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
    fn valid_convolution_shrinks_by_kernel_minus_one() {
        let mut conv = Conv2d::new(1, 16, 3, Activation::ReLU);
        let out = conv.forward(Tensor::zeros(28, 28, 1));
        assert_eq!(out.shape(), (26, 26, 16));
    }

    #[test]
    fn identity_kernel_passes_values_through() {
        let mut conv = Conv2d::new(1, 1, 3, Activation::Identity);
        conv.weights = vec![0.0; 9];
        let center = conv.w_idx(0, 1, 1, 0);
        conv.weights[center] = 1.0; // center tap
        conv.biases = vec![0.0];

        let mut input = Tensor::zeros(3, 3, 1);
        input.set(1, 1, 0, 5.0);
        let out = conv.forward(input);
        assert_eq!(out.shape(), (1, 1, 1));
        assert!((out.data[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn backward_matches_input_shape() {
        let mut conv = Conv2d::new(2, 4, 3, Activation::ReLU);
        conv.zero_grads();
        let out = conv.forward(Tensor::zeros(8, 8, 2));
        let grad_in = conv.backward(Tensor::from_data(6, 6, 4, vec![1.0; out.len()]));
        assert_eq!(grad_in.shape(), (8, 8, 2));
    }
}
