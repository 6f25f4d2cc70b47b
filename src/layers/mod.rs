pub mod dense;
pub mod dropout;

pub use dense::Dense;
pub use dropout::Dropout;

use crate::math::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// One layer in a network stack. Dense layers carry the learned parameters;
/// dropout layers are parameter-free regularizers active only in training.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Dense(Dense),
    Dropout(Dropout),
}

impl Layer {
    /// Cached output row from the most recent forward pass.
    pub fn output(&self) -> &Matrix {
        match self {
            Layer::Dense(layer) => &layer.outputs,
            Layer::Dropout(layer) => &layer.outputs,
        }
    }
}
