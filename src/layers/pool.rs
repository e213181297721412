use serde::{Serialize, Deserialize};

use crate::math::Tensor;

/// Max pooling over non-overlapping square windows.
///
/// Output dimensions floor-divide by the window size; trailing rows or
/// columns that do not fill a window are dropped. The flat input index of
/// each window's winner is remembered so backward can scatter gradients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxPool2d {
    pub size: usize,

    #[serde(skip)]
    winners: Vec<usize>,
    #[serde(skip)]
    in_shape: (usize, usize, usize),
}

impl MaxPool2d {
    pub fn new(size: usize) -> MaxPool2d {
        MaxPool2d { size, winners: Vec::new(), in_shape: (0, 0, 0) }
    }

    pub fn output_shape(&self, in_h: usize, in_w: usize, c: usize) -> (usize, usize, usize) {
        (in_h / self.size, in_w / self.size, c)
    }

    pub fn forward(&mut self, input: Tensor) -> Tensor {
        let (out_h, out_w, c) = self.output_shape(input.h, input.w, input.c);
        let mut out = Tensor::zeros(out_h, out_w, c);
        self.winners = vec![0; out.len()];
        self.in_shape = input.shape();

        for y in 0..out_h {
            for x in 0..out_w {
                for ch in 0..c {
                    let mut best = f64::NEG_INFINITY;
                    let mut best_idx = 0;
                    for wy in 0..self.size {
                        for wx in 0..self.size {
                            let idx = input.idx(y * self.size + wy, x * self.size + wx, ch);
                            let v = input.data[idx];
                            if v > best {
                                best = v;
                                best_idx = idx;
                            }
                        }
                    }
                    let oi = out.idx(y, x, ch);
                    out.data[oi] = best;
                    self.winners[oi] = best_idx;
                }
            }
        }
        out
    }

    /// Routes each output gradient back to the input cell that won the max.
    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        let (h, w, c) = self.in_shape;
        let mut grad_in = Tensor::zeros(h, w, c);
        for (oi, &ii) in self.winners.iter().enumerate() {
            grad_in.data[ii] += grad_out.data[oi];
        }
        grad_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_odd_dimensions() {
        let mut pool = MaxPool2d::new(2);
        let out = pool.forward(Tensor::zeros(13, 13, 16));
        assert_eq!(out.shape(), (6, 6, 16));
    }

    #[test]
    fn picks_window_maximum_and_routes_gradient() {
        let mut pool = MaxPool2d::new(2);
        let input = Tensor::from_data(2, 2, 1, vec![1.0, 4.0, 2.0, 3.0]);
        let out = pool.forward(input);
        assert_eq!(out.data, vec![4.0]);

        let grad_in = pool.backward(Tensor::from_data(1, 1, 1, vec![7.0]));
        assert_eq!(grad_in.data, vec![0.0, 7.0, 0.0, 0.0]);
    }
}
