use crate::layers::{Dense, Layer};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// First/second moment estimates for one layer's parameters, plus the
/// layer's update count used for bias correction.
#[derive(Debug, Clone)]
struct Moments {
    t: u64,
    m_weights: Matrix,
    v_weights: Matrix,
    m_biases: Matrix,
    v_biases: Matrix,
}

/// Adam optimizer with the conventional defaults β₁ = 0.9, β₂ = 0.999,
/// ε = 1e-8. Holds one moment slot per network layer so the trainer can
/// address layers by index.
pub struct Adam {
    pub learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    moments: Vec<Moments>,
}

impl Adam {
    /// Allocates zeroed moment storage shaped after `network`'s parameters.
    pub fn new(network: &Network, learning_rate: f64) -> Adam {
        let moments = network
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Dense(dense) => Moments {
                    t: 0,
                    m_weights: Matrix::zeros(dense.weights.rows, dense.weights.cols),
                    v_weights: Matrix::zeros(dense.weights.rows, dense.weights.cols),
                    m_biases: Matrix::zeros(dense.biases.rows, dense.biases.cols),
                    v_biases: Matrix::zeros(dense.biases.rows, dense.biases.cols),
                },
                // Dropout carries no parameters; the slot only keeps indices aligned.
                Layer::Dropout(_) => Moments {
                    t: 0,
                    m_weights: Matrix::default(),
                    v_weights: Matrix::default(),
                    m_biases: Matrix::default(),
                    v_biases: Matrix::default(),
                },
            })
            .collect();

        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            moments,
        }
    }

    /// Applies one bias-corrected Adam update to `layer` given its averaged
    /// mini-batch gradients. `layer_idx` is the layer's position in the
    /// network stack this optimizer was built from.
    pub fn step(&mut self, layer_idx: usize, layer: &mut Dense, w_grad: Matrix, b_grad: Matrix) {
        let (lr, b1, b2, eps) = (self.learning_rate, self.beta1, self.beta2, self.epsilon);
        let state = &mut self.moments[layer_idx];
        state.t += 1;
        let t = state.t as i32;

        state.m_weights = state.m_weights.zip_map(&w_grad, |m, g| b1 * m + (1.0 - b1) * g);
        state.v_weights = state.v_weights.zip_map(&w_grad, |v, g| b2 * v + (1.0 - b2) * g * g);
        state.m_biases = state.m_biases.zip_map(&b_grad, |m, g| b1 * m + (1.0 - b1) * g);
        state.v_biases = state.v_biases.zip_map(&b_grad, |v, g| b2 * v + (1.0 - b2) * g * g);

        let w_step = corrected_step(&state.m_weights, &state.v_weights, t, lr, b1, b2, eps);
        let b_step = corrected_step(&state.m_biases, &state.v_biases, t, lr, b1, b2, eps);

        layer.apply_update(w_step, b_step);
    }
}

/// lr · m̂ / (√v̂ + ε) with m̂ = m/(1-β₁ᵗ), v̂ = v/(1-β₂ᵗ).
fn corrected_step(
    m: &Matrix,
    v: &Matrix,
    t: i32,
    lr: f64,
    b1: f64,
    b2: f64,
    eps: f64,
) -> Matrix {
    let m_corr = 1.0 - b1.powi(t);
    let v_corr = 1.0 - b2.powi(t);
    m.zip_map(v, |m, v| lr * (m / m_corr) / ((v / v_corr).sqrt() + eps))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::{LayerSpec, NetworkSpec};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_layer_network() -> Network {
        let spec = NetworkSpec {
            input_dim: 2,
            layers: vec![LayerSpec::Dense {
                units: 1,
                activation: ActivationFunction::Identity,
            }],
        };
        Network::from_spec(&spec, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn first_step_moves_against_gradient_by_about_lr() {
        let mut network = single_layer_network();
        let mut optimizer = Adam::new(&network, 0.001);

        let before = match &network.layers[0] {
            Layer::Dense(d) => d.weights.data[0][0],
            Layer::Dropout(_) => unreachable!(),
        };

        // After the first step m̂ = g and √v̂ = |g|, so the update is ≈ lr·sign(g).
        let w_grad = Matrix::from_data(vec![vec![0.7], vec![-0.3]]);
        let b_grad = Matrix::from_data(vec![vec![0.1]]);
        if let Layer::Dense(dense) = &mut network.layers[0] {
            optimizer.step(0, dense, w_grad, b_grad);
        }

        let after = match &network.layers[0] {
            Layer::Dense(d) => d.weights.data[0][0],
            Layer::Dropout(_) => unreachable!(),
        };
        assert_relative_eq!(before - after, 0.001, epsilon = 1e-6);
    }

    #[test]
    fn zero_gradient_leaves_parameters_unchanged() {
        let mut network = single_layer_network();
        let mut optimizer = Adam::new(&network, 0.01);

        let before = match &network.layers[0] {
            Layer::Dense(d) => d.weights.clone(),
            Layer::Dropout(_) => unreachable!(),
        };

        let w_grad = Matrix::zeros(2, 1);
        let b_grad = Matrix::zeros(1, 1);
        if let Layer::Dense(dense) = &mut network.layers[0] {
            optimizer.step(0, dense, w_grad, b_grad);
        }

        if let Layer::Dense(d) = &network.layers[0] {
            assert_eq!(d.weights, before);
        }
    }
}
