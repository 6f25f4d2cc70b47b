pub mod history;
pub mod train_config;
pub mod trainer;

pub use history::{EpochStats, TrainingHistory};
pub use train_config::TrainConfig;
pub use trainer::{evaluate, fit};
