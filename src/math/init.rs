use rand::prelude::*;
use std::f64::consts::PI;

/// Samples a single value from N(0, 1) using the Box-Muller transform.
/// Both u1 and u2 must be uniform on (0, 1].
fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
    // Draw two independent uniform samples in (0, 1] to avoid log(0).
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// He initialization: a buffer of `n` samples from N(0, sqrt(2 / fan_in)).
///
/// Recommended before ReLU layers. The variance 2/fan_in accounts for
/// the fact that ReLU zeroes half of its inputs on average.
pub fn he(fan_in: usize, n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let std_dev = (2.0 / fan_in as f64).sqrt();
    (0..n).map(|_| sample_standard_normal(&mut rng) * std_dev).collect()
}

/// Xavier (Glorot) initialization: `n` samples from N(0, sqrt(1 / fan_in)).
///
/// Recommended before Sigmoid/Tanh/Identity layers. Keeps the variance of
/// activations and gradients roughly equal across layers.
pub fn xavier(fan_in: usize, n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let std_dev = (1.0 / fan_in as f64).sqrt();
    (0..n).map(|_| sample_standard_normal(&mut rng) * std_dev).collect()
}
