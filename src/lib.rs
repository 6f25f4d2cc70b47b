pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod network;
pub mod data;
pub mod train;
pub mod plot;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{Dense, Dropout, Layer};
pub use loss::bce::BceLoss;
pub use optim::adam::Adam;
pub use network::{build_model, LayerSpec, Network, NetworkSpec};
pub use data::{generate, Batches, DatasetSplit, GeneratorConfig};
pub use train::{evaluate, fit, EpochStats, TrainConfig, TrainingHistory};
pub use plot::render_training_curves;
