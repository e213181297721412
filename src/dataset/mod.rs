pub mod dataset;
pub mod labels;

pub use dataset::{Dataset, Example};
pub use labels::LabelSet;
