use crate::layers::{Dense, Dropout, Layer};
use crate::network::spec::{LayerSpec, NetworkSpec};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct Network {
    pub input_dim: usize,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Materializes a network from a layer-stack specification, threading the
    /// running layer width from `spec.input_dim` through each dense layer.
    pub fn from_spec(spec: &NetworkSpec, rng: &mut StdRng) -> Network {
        let mut width = spec.input_dim;
        let layers = spec
            .layers
            .iter()
            .map(|layer_spec| match *layer_spec {
                LayerSpec::Dense { units, activation } => {
                    let layer = Layer::Dense(Dense::new(units, width, activation, rng));
                    width = units;
                    layer
                }
                LayerSpec::Dropout { rate } => Layer::Dropout(Dropout::new(rate)),
            })
            .collect();

        Network {
            input_dim: spec.input_dim,
            layers,
        }
    }

    /// Forward pass in evaluation mode: dropout layers pass through.
    /// Stores activations in each layer.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = match layer {
                Layer::Dense(dense) => dense.forward(current),
                Layer::Dropout(dropout) => dropout.forward_eval(current),
            };
        }
        current
    }

    /// Forward pass in training mode: dropout layers sample a fresh mask.
    pub fn forward_train(&mut self, input: Vec<f64>, rng: &mut StdRng) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = match layer {
                Layer::Dense(dense) => dense.forward(current),
                Layer::Dropout(dropout) => dropout.forward_train(current, rng),
            };
        }
        current
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Loads a saved network if `path` exists; a missing file is not an
    /// error and yields `None`. A present-but-unreadable file still fails.
    pub fn load_json_if_exists(path: &str) -> std::io::Result<Option<Network>> {
        if !Path::new(path).exists() {
            return Ok(None);
        }
        Network::load_json(path).map(Some)
    }
}
