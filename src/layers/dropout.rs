use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::math::Tensor;

/// Inverted dropout. During training each unit is zeroed with probability
/// `rate` and survivors are scaled by 1/(1-rate) so the expected activation
/// is unchanged; during inference the layer is the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dropout {
    pub rate: f64,

    #[serde(skip)]
    mask: Vec<f64>,
}

impl Dropout {
    pub fn new(rate: f64) -> Dropout {
        assert!((0.0..1.0).contains(&rate), "dropout rate must be in [0, 1)");
        Dropout { rate, mask: Vec::new() }
    }

    pub fn forward(&mut self, input: Tensor, training: bool) -> Tensor {
        if !training || self.rate == 0.0 {
            self.mask.clear();
            return input;
        }
        let keep_scale = 1.0 / (1.0 - self.rate);
        let mut rng = rand::thread_rng();
        self.mask = input
            .data
            .iter()
            .map(|_| if rng.gen::<f64>() < self.rate { 0.0 } else { keep_scale })
            .collect();
        let data = input.data.iter().zip(self.mask.iter()).map(|(&x, &m)| x * m).collect();
        Tensor::from_data(input.h, input.w, input.c, data)
    }

    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        if self.mask.is_empty() {
            return grad_out;
        }
        let data = grad_out.data.iter().zip(self.mask.iter()).map(|(&g, &m)| g * m).collect();
        Tensor::from_data(grad_out.h, grad_out.w, grad_out.c, data)
    }
}
