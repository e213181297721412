pub mod conv;
pub mod dense;
pub mod dropout;
pub mod flatten;
pub mod pool;
pub mod softmax;

pub use conv::Conv2d;
pub use dense::Dense;
pub use dropout::Dropout;
pub use flatten::Flatten;
pub use pool::MaxPool2d;
pub use softmax::Softmax;

use serde::{Serialize, Deserialize};

use crate::math::Tensor;

/// One layer of a sequential network.
///
/// An enum rather than trait objects keeps the whole network serde-derivable
/// for weight persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Conv2d(Conv2d),
    MaxPool2d(MaxPool2d),
    Flatten(Flatten),
    Dense(Dense),
    Dropout(Dropout),
    Softmax(Softmax),
}

/// A mutable view over one parameter buffer and its accumulated gradient,
/// handed to the optimizer in a fixed traversal order.
pub struct ParamView<'a> {
    pub values: &'a mut [f64],
    pub grads: &'a [f64],
}

impl Layer {
    pub fn forward(&mut self, input: Tensor, training: bool) -> Tensor {
        match self {
            Layer::Conv2d(l) => l.forward(input),
            Layer::MaxPool2d(l) => l.forward(input),
            Layer::Flatten(l) => l.forward(input),
            Layer::Dense(l) => l.forward(input),
            Layer::Dropout(l) => l.forward(input, training),
            Layer::Softmax(l) => l.forward(input),
        }
    }

    pub fn backward(&mut self, grad_out: Tensor) -> Tensor {
        match self {
            Layer::Conv2d(l) => l.backward(grad_out),
            Layer::MaxPool2d(l) => l.backward(grad_out),
            Layer::Flatten(l) => l.backward(grad_out),
            Layer::Dense(l) => l.backward(grad_out),
            Layer::Dropout(l) => l.backward(grad_out),
            Layer::Softmax(l) => l.backward(grad_out),
        }
    }

    pub fn zero_grads(&mut self) {
        match self {
            Layer::Conv2d(l) => l.zero_grads(),
            Layer::Dense(l) => l.zero_grads(),
            _ => {}
        }
    }

    pub fn scale_grads(&mut self, factor: f64) {
        match self {
            Layer::Conv2d(l) => {
                for g in l.w_grads.iter_mut().chain(l.b_grads.iter_mut()) {
                    *g *= factor;
                }
            }
            Layer::Dense(l) => {
                for g in l.w_grads.iter_mut().chain(l.b_grads.iter_mut()) {
                    *g *= factor;
                }
            }
            _ => {}
        }
    }

    /// Parameter buffers paired with their gradients, weights before biases.
    /// Non-trainable layers contribute nothing.
    pub fn param_views(&mut self) -> Vec<ParamView<'_>> {
        match self {
            Layer::Conv2d(l) => vec![
                ParamView { values: &mut l.weights, grads: &l.w_grads },
                ParamView { values: &mut l.biases, grads: &l.b_grads },
            ],
            Layer::Dense(l) => vec![
                ParamView { values: &mut l.weights, grads: &l.w_grads },
                ParamView { values: &mut l.biases, grads: &l.b_grads },
            ],
            _ => Vec::new(),
        }
    }
}
