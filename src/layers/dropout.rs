use crate::math::matrix::Matrix;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inverted dropout: during training each activation is zeroed with
/// probability `rate` and survivors are rescaled by 1/(1-rate), so the
/// expected activation magnitude matches evaluation mode, where the layer
/// passes its input through untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct Dropout {
    pub rate: f64,
    /// Scaled keep-mask from the last training forward pass.
    #[serde(skip)]
    mask: Matrix,
    #[serde(skip)]
    pub outputs: Matrix,
}

impl Dropout {
    pub fn new(rate: f64) -> Dropout {
        assert!(
            (0.0..1.0).contains(&rate),
            "dropout rate must be in [0, 1), got {rate}"
        );
        Dropout {
            rate,
            mask: Matrix::default(),
            outputs: Matrix::default(),
        }
    }

    pub fn forward_train(&mut self, input: Vec<f64>, rng: &mut StdRng) -> Vec<f64> {
        let scale = 1.0 / (1.0 - self.rate);
        let mask: Vec<f64> = input
            .iter()
            .map(|_| if rng.gen::<f64>() < self.rate { 0.0 } else { scale })
            .collect();
        let out: Vec<f64> = input.iter().zip(mask.iter()).map(|(x, m)| x * m).collect();

        self.mask = Matrix::from_data(vec![mask]);
        self.outputs = Matrix::from_data(vec![out.clone()]);
        out
    }

    pub fn forward_eval(&mut self, input: Vec<f64>) -> Vec<f64> {
        self.outputs = Matrix::from_data(vec![input.clone()]);
        input
    }

    /// The mask that gated the activations gates their gradients too.
    pub fn backward(&self, delta: Matrix) -> Matrix {
        delta.hadamard(&self.mask)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn eval_mode_is_identity() {
        let mut layer = Dropout::new(0.3);
        let input = vec![1.0, -2.0, 0.5];

        let out = layer.forward_eval(input.clone());

        assert_eq!(out, input);
    }

    #[test]
    fn zero_rate_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layer = Dropout::new(0.0);

        let out = layer.forward_train(vec![1.0, 2.0, 3.0], &mut rng);

        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn training_zeroes_or_rescales() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut layer = Dropout::new(0.5);
        let input = vec![1.0; 64];

        let out = layer.forward_train(input, &mut rng);

        let mut dropped = 0;
        for &x in &out {
            assert!(x == 0.0 || (x - 2.0).abs() < 1e-12, "unexpected output {x}");
            if x == 0.0 {
                dropped += 1;
            }
        }
        // With 64 draws at p = 0.5 both outcomes must occur.
        assert!(dropped > 0 && dropped < 64);
    }

    #[test]
    fn backward_reuses_the_forward_mask() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut layer = Dropout::new(0.5);

        let out = layer.forward_train(vec![1.0; 8], &mut rng);
        let grads = layer.backward(Matrix::from_data(vec![vec![1.0; 8]]));

        for (o, g) in out.iter().zip(grads.data[0].iter()) {
            assert_relative_eq!(*o, *g);
        }
    }
}
