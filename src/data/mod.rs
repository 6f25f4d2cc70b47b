pub mod batch;
pub mod synthetic;

pub use batch::Batches;
pub use synthetic::{generate, DatasetSplit, GeneratorConfig};
