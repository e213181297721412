//! Incremental sketch classification: draw, label, train, predict.
//!
//! Raw canvas snapshots are normalized to 28×28 grayscale tensors,
//! accumulated as a labeled in-memory dataset, and used to train a small
//! from-scratch CNN whose output width always matches the label
//! vocabulary. `session::SketchSession` ties the pieces together for
//! interactive use; the individual modules are usable on their own.

pub mod activation;
pub mod dataset;
pub mod error;
pub mod infer;
pub mod input;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod persist;
pub mod session;
pub mod train;

// Convenience re-exports
pub use dataset::{Dataset, LabelSet};
pub use error::SketchError;
pub use infer::{predict, Prediction};
pub use input::{preprocess, CanvasSource, RasterImage};
pub use math::Tensor;
pub use network::{builder, Network, TrainedModel};
pub use persist::{FsStore, KvStore, LoadOutcome, MemStore};
pub use session::SketchSession;
pub use train::{train, EpochStats, TrainConfig};
