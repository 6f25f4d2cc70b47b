pub mod curves;

pub use curves::render_training_curves;
