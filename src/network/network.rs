use serde::{Serialize, Deserialize};

use crate::layers::{Layer, ParamView};
use crate::math::Tensor;

/// A sequential stack of layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers }
    }

    /// Forward pass. `training` enables train-time-only behavior (dropout);
    /// inference callers pass `false`. Layers cache what backprop needs.
    pub fn forward(&mut self, input: Tensor, training: bool) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.forward(current, training);
        }
        current.data
    }

    /// Backward pass from the combined loss gradient at the output, walking
    /// layers in reverse. Parameter gradients accumulate in the layers.
    pub fn backward(&mut self, output_grad: Vec<f64>) {
        let mut grad = Tensor::vector(output_grad);
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(grad);
        }
    }

    pub fn zero_grads(&mut self) {
        for layer in &mut self.layers {
            layer.zero_grads();
        }
    }

    /// Scales all accumulated gradients, used to average over a mini-batch.
    pub fn scale_grads(&mut self, factor: f64) {
        for layer in &mut self.layers {
            layer.scale_grads(factor);
        }
    }

    /// All trainable parameter buffers in a fixed order for the optimizer.
    pub fn param_views(&mut self) -> Vec<ParamView<'_>> {
        self.layers.iter_mut().flat_map(|l| l.param_views()).collect()
    }

    /// Width of the network output — the size of the last dense layer.
    pub fn output_width(&self) -> usize {
        self.layers
            .iter()
            .rev()
            .find_map(|l| match l {
                Layer::Dense(d) => Some(d.size),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Serializes the network weights to a JSON blob.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Deserializes a network from a JSON blob previously written by
    /// `to_json_bytes`.
    pub fn from_json_bytes(bytes: &[u8]) -> serde_json::Result<Network> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder;

    #[test]
    fn weights_survive_a_json_round_trip() {
        let network = builder::build(3);
        let blob = network.to_json_bytes().unwrap();
        let restored = Network::from_json_bytes(&blob).unwrap();
        assert_eq!(restored.output_width(), 3);
        assert_eq!(restored.layers.len(), network.layers.len());
        match (&network.layers[0], &restored.layers[0]) {
            (Layer::Conv2d(a), Layer::Conv2d(b)) => assert_eq!(a.weights, b.weights),
            _ => panic!("first layer should be conv"),
        }
    }
}
