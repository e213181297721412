use crate::network::Network;

/// Adam optimizer with bias-corrected first and second moment estimates.
///
/// Moment buffers are sized lazily on the first step, one pair per parameter
/// buffer in the network's traversal order. An `Adam` instance is therefore
/// bound to the architecture it first stepped and must be rebuilt alongside
/// the network.
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: u64,
    moments: Vec<Moments>,
}

struct Moments {
    m: Vec<f64>,
    v: Vec<f64>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            moments: Vec::new(),
        }
    }

    /// Applies one update using the gradients currently accumulated in the
    /// network's layers.
    pub fn step(&mut self, network: &mut Network) {
        self.t += 1;
        let mut views = network.param_views();

        if self.moments.is_empty() {
            self.moments = views
                .iter()
                .map(|p| Moments { m: vec![0.0; p.values.len()], v: vec![0.0; p.values.len()] })
                .collect();
        }
        assert_eq!(views.len(), self.moments.len(), "optimizer bound to a different architecture");

        let bc1 = 1.0 - self.beta1.powi(self.t as i32);
        let bc2 = 1.0 - self.beta2.powi(self.t as i32);

        for (view, slot) in views.iter_mut().zip(self.moments.iter_mut()) {
            for i in 0..view.values.len() {
                let g = view.grads[i];
                slot.m[i] = self.beta1 * slot.m[i] + (1.0 - self.beta1) * g;
                slot.v[i] = self.beta2 * slot.v[i] + (1.0 - self.beta2) * g * g;
                let m_hat = slot.m[i] / bc1;
                let v_hat = slot.v[i] / bc2;
                view.values[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;
    use crate::layers::{Dense, Layer};
    use crate::math::Tensor;

    #[test]
    fn step_moves_against_gradient() {
        let mut dense = Dense::new(1, 1, Activation::Identity);
        dense.weights = vec![1.0];
        dense.biases = vec![0.0];
        let mut network = Network::new(vec![Layer::Dense(dense)]);

        // Positive gradient on the single weight: one forward/backward with
        // input 1 and upstream gradient 1 gives w_grad = 1.
        network.zero_grads();
        network.forward(Tensor::vector(vec![1.0]), true);
        network.backward(vec![1.0]);

        let mut adam = Adam::new(0.001);
        adam.step(&mut network);

        let w = match &network.layers[0] {
            Layer::Dense(l) => l.weights[0],
            _ => unreachable!(),
        };
        assert!(w < 1.0, "weight should decrease against a positive gradient, got {}", w);
    }
}
