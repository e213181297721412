use serde::{Serialize, Deserialize};

use crate::math::Tensor;

/// Reshapes an H×W×C map into a vector; backward restores the shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flatten {
    #[serde(skip)]
    in_shape: (usize, usize, usize),
}

impl Flatten {
    pub fn new() -> Flatten {
        Flatten::default()
    }

    pub fn forward(&mut self, input: Tensor) -> Tensor {
        self.in_shape = input.shape();
        Tensor::vector(input.data)
    }

    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        let (h, w, c) = self.in_shape;
        Tensor::from_data(h, w, c, grad_out.data)
    }
}
