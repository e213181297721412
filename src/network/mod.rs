pub mod builder;
pub mod model;
pub mod network;

pub use model::TrainedModel;
pub use network::Network;
