use serde::{Serialize, Deserialize};

/// Element-wise activations applied inside conv and dense layers.
///
/// Softmax is deliberately absent: it is vector-valued and implemented as a
/// layer of its own (`layers::softmax`), paired with the cross-entropy loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    ReLU,
    Identity,
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Identity => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation value.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Identity => 1.0,
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(Activation::ReLU.function(-3.0), 0.0);
        assert_eq!(Activation::ReLU.function(2.5), 2.5);
        assert_eq!(Activation::ReLU.derivative(-1.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(1.0), 1.0);
    }

    #[test]
    fn sigmoid_midpoint() {
        assert!((Activation::Sigmoid.function(0.0) - 0.5).abs() < 1e-12);
        assert!((Activation::Sigmoid.derivative(0.0) - 0.25).abs() < 1e-12);
    }
}
