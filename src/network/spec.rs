use crate::activation::activation::ActivationFunction;
use serde::{Deserialize, Serialize};

/// Describes one layer in a network specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    Dense {
        units: usize,
        activation: ActivationFunction,
    },
    Dropout {
        rate: f64,
    },
}

/// An explicit layer-stack configuration: the input dimensionality followed
/// by an ordered list of layer descriptions (input → output). Passed to
/// `Network::from_spec` to materialize the layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_dim: usize,
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// The fixed classifier topology used by the demo:
    /// dense(128, relu) → dropout(0.3) → dense(64, relu) → dropout(0.3)
    /// → dense(32, relu) → dense(1, sigmoid).
    pub fn binary_classifier(input_dim: usize) -> NetworkSpec {
        NetworkSpec {
            input_dim,
            layers: vec![
                LayerSpec::Dense {
                    units: 128,
                    activation: ActivationFunction::ReLU,
                },
                LayerSpec::Dropout { rate: 0.3 },
                LayerSpec::Dense {
                    units: 64,
                    activation: ActivationFunction::ReLU,
                },
                LayerSpec::Dropout { rate: 0.3 },
                LayerSpec::Dense {
                    units: 32,
                    activation: ActivationFunction::ReLU,
                },
                LayerSpec::Dense {
                    units: 1,
                    activation: ActivationFunction::Sigmoid,
                },
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classifier_spec_ends_in_one_sigmoid_unit() {
        let spec = NetworkSpec::binary_classifier(20);

        assert_eq!(spec.input_dim, 20);
        assert_eq!(spec.layers.len(), 6);
        match spec.layers.last() {
            Some(LayerSpec::Dense { units, activation }) => {
                assert_eq!(*units, 1);
                assert_eq!(*activation, ActivationFunction::Sigmoid);
            }
            other => panic!("unexpected output layer: {other:?}"),
        }
    }
}
