use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Dense {
    pub units: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activation: ActivationFunction,
    /// a = activation(z), cached for backprop.
    #[serde(skip)]
    pub outputs: Matrix,
    /// z = xW + b, needed to evaluate the activation derivative.
    #[serde(skip)]
    pre_activations: Matrix,
}

impl Dense {
    /// He init before ReLU, Xavier otherwise; biases start at zero.
    pub fn new(
        units: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut StdRng,
    ) -> Dense {
        let weights = match activation {
            ActivationFunction::ReLU => Matrix::he(input_size, units, rng),
            _ => Matrix::xavier(input_size, units, rng),
        };

        Dense {
            units,
            weights,
            biases: Matrix::zeros(1, units),
            activation,
            outputs: Matrix::zeros(1, units),
            pre_activations: Matrix::zeros(1, units),
        }
    }

    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let z = Matrix::from_data(vec![input]) * self.weights.clone() + self.biases.clone();
        let a = z.map(|x| self.activation.function(x));
        self.pre_activations = z;
        self.outputs = a.clone();
        a.data[0].clone()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `delta` is ∂L/∂a for this layer (error in activation space); the
    /// returned biases_grad equals ∂L/∂z and doubles as the delta source for
    /// the layer below.
    pub fn compute_gradients(&self, delta: Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        // Use pre-activation z so that derivative(z) = σ'(z) is computed correctly
        let act_derivative = self.pre_activations.map(|x| self.activation.derivative(x));
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = inputs.transpose() * layer_delta.clone();

        (weights_grad, layer_delta)
    }

    /// Applies pre-scaled update steps (already multiplied by the learning
    /// rate schedule) by subtracting them from the parameters.
    pub fn apply_update(&mut self, weights_step: Matrix, biases_step: Matrix) {
        self.weights = self.weights.clone() - weights_step;
        self.biases = self.biases.clone() - biases_step;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn identity_layer() -> Dense {
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Dense::new(2, 3, ActivationFunction::Identity, &mut rng);
        layer.weights = Matrix::from_data(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ]);
        layer.biases = Matrix::from_data(vec![vec![0.5, -0.5]]);
        layer
    }

    #[test]
    fn forward_computes_affine_transform() {
        let mut layer = identity_layer();

        let out = layer.forward(vec![1.0, 2.0, 3.0]);

        assert_relative_eq!(out[0], 1.0 + 3.0 + 0.5);
        assert_relative_eq!(out[1], 2.0 + 3.0 - 0.5);
    }

    #[test]
    fn gradients_have_parameter_shapes() {
        let mut layer = identity_layer();
        let input = vec![1.0, 2.0, 3.0];
        layer.forward(input.clone());

        let delta = Matrix::from_data(vec![vec![0.1, -0.2]]);
        let inputs = Matrix::from_data(vec![input]);
        let (w_grad, b_grad) = layer.compute_gradients(delta, &inputs);

        assert_eq!((w_grad.rows, w_grad.cols), (3, 2));
        assert_eq!((b_grad.rows, b_grad.cols), (1, 2));
        // Identity activation: b_grad passes delta through unchanged.
        assert_relative_eq!(b_grad.data[0][0], 0.1);
        assert_relative_eq!(w_grad.data[2][1], 3.0 * -0.2);
    }

    #[test]
    fn apply_update_subtracts_steps() {
        let mut layer = identity_layer();
        let w_step = layer.weights.map(|_| 0.25);
        let b_step = layer.biases.map(|_| 0.25);

        let before = layer.weights.data[0][0];
        layer.apply_update(w_step, b_step);

        assert_relative_eq!(layer.weights.data[0][0], before - 0.25);
        assert_relative_eq!(layer.biases.data[0][0], 0.25);
    }
}
