use crate::activation::Activation;
use crate::layers::{Conv2d, Dense, Dropout, Flatten, Layer, MaxPool2d, Softmax};
use crate::network::Network;

/// Height and width every input tensor is normalized to.
pub const INPUT_SIZE: usize = 28;
/// Input channels (grayscale).
pub const INPUT_CHANNELS: usize = 1;
/// Flattened feature count after the conv/pool stack:
/// 28 →(conv3) 26 →(pool2) 13 →(conv3) 11 →(pool2) 5, times 32 channels.
const FLAT_FEATURES: usize = 5 * 5 * 32;
/// Hidden dense width.
const HIDDEN: usize = 64;
/// Train-time dropout rate before the output layer.
const DROPOUT_RATE: f64 = 0.25;

/// Builds a fresh classifier network with `num_classes` outputs:
///
/// conv(16, 3×3, ReLU) → maxpool(2×2) → conv(32, 3×3, ReLU) → maxpool(2×2)
/// → flatten → dense(64, ReLU) → dropout(0.25) → dense(num_classes) → softmax
///
/// Pure constructor: every call allocates new weight storage, so a retrain
/// can never alias a previously built model. Pair with `CrossEntropyLoss`
/// and `Adam` at learning rate 0.001.
pub fn build(num_classes: usize) -> Network {
    assert!(num_classes >= 1, "a classifier needs at least one class");
    Network::new(vec![
        Layer::Conv2d(Conv2d::new(INPUT_CHANNELS, 16, 3, Activation::ReLU)),
        Layer::MaxPool2d(MaxPool2d::new(2)),
        Layer::Conv2d(Conv2d::new(16, 32, 3, Activation::ReLU)),
        Layer::MaxPool2d(MaxPool2d::new(2)),
        Layer::Flatten(Flatten::new()),
        Layer::Dense(Dense::new(FLAT_FEATURES, HIDDEN, Activation::ReLU)),
        Layer::Dropout(Dropout::new(DROPOUT_RATE)),
        Layer::Dense(Dense::new(HIDDEN, num_classes, Activation::Identity)),
        Layer::Softmax(Softmax::new()),
    ])
}
