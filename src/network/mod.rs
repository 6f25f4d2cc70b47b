pub mod builder;
pub mod network;
pub mod spec;

pub use builder::build_model;
pub use network::Network;
pub use spec::{LayerSpec, NetworkSpec};
