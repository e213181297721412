pub mod controller;
pub mod epoch_stats;
pub mod train_config;

pub use controller::train;
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
