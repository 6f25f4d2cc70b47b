use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::batch::Batches;
use crate::layers::Layer;
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::adam::Adam;
use crate::train::history::{EpochStats, TrainingHistory};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of mini-batch Adam on binary
/// cross-entropy and returns the per-epoch history.
///
/// Each epoch runs one shuffled pass over the training data, then a
/// forward-only accuracy pass on the training split and a full validation
/// pass, and prints a one-line summary. No early stopping, no mid-training
/// checkpoints.
///
/// # Panics
/// Panics if `x_train` is empty, lengths mismatch, or `batch_size == 0`.
pub fn fit(
    network: &mut Network,
    optimizer: &mut Adam,
    x_train: &[Vec<f64>],
    y_train: &[f64],
    x_val: &[Vec<f64>],
    y_val: &[f64],
    config: &TrainConfig,
) -> TrainingHistory {
    assert!(!x_train.is_empty(), "x_train must not be empty");
    assert_eq!(
        x_train.len(),
        y_train.len(),
        "x_train and y_train must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let mut rng = StdRng::seed_from_u64(config.shuffle_seed);
    let mut history = TrainingHistory::default();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let train_loss = run_one_epoch(
            network,
            optimizer,
            x_train,
            y_train,
            config.batch_size,
            &mut rng,
        );
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let (_, train_accuracy) = evaluate(network, x_train, y_train);
        let (val_loss, val_accuracy) = evaluate(network, x_val, y_val);

        println!(
            "epoch {epoch}/{} - loss: {train_loss:.4} - accuracy: {train_accuracy:.4} - val_loss: {val_loss:.4} - val_accuracy: {val_accuracy:.4} ({elapsed_ms} ms)",
            config.epochs
        );

        history.push(EpochStats {
            epoch,
            train_loss,
            train_accuracy,
            val_loss,
            val_accuracy,
            elapsed_ms,
        });
    }

    history
}

/// Forward-only pass over a dataset. Returns (mean BCE loss, accuracy),
/// where accuracy thresholds the predicted probability at 0.5.
pub fn evaluate(network: &mut Network, x: &[Vec<f64>], y: &[f64]) -> (f64, f64) {
    assert_eq!(x.len(), y.len(), "x and y must have equal length");
    assert!(!x.is_empty(), "cannot evaluate on an empty dataset");

    let mut total_loss = 0.0;
    let mut correct = 0usize;
    for (input, &label) in x.iter().zip(y.iter()) {
        let p = network.forward(input.clone())[0];
        total_loss += BceLoss::loss(&[p], &[label]);
        if (p >= 0.5) == (label >= 0.5) {
            correct += 1;
        }
    }

    let n = x.len() as f64;
    (total_loss / n, correct as f64 / n)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One shuffled pass of mini-batch gradient descent. Gradients are
/// accumulated per batch, averaged, and applied with a single Adam step per
/// layer. Returns the mean training loss over all samples.
fn run_one_epoch(
    network: &mut Network,
    optimizer: &mut Adam,
    x: &[Vec<f64>],
    y: &[f64],
    batch_size: usize,
    rng: &mut StdRng,
) -> f64 {
    let n = x.len();
    let mut total_loss = 0.0;

    for (batch_x, batch_y) in Batches::new(x, y, batch_size, rng) {
        let inv_batch = 1.0 / batch_x.len() as f64;

        // Zero-initialize accumulated gradient storage; dropout layers own
        // no parameters and get no slot.
        let mut acc_grads: Vec<Option<(Matrix, Matrix)>> = network
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Dense(dense) => Some((
                    Matrix::zeros(dense.weights.rows, dense.weights.cols),
                    Matrix::zeros(dense.biases.rows, dense.biases.cols),
                )),
                Layer::Dropout(_) => None,
            })
            .collect();

        // Accumulate gradients over the mini-batch.
        for (input, &label) in batch_x.iter().zip(batch_y.iter()) {
            let output = network.forward_train(input.clone(), rng);

            total_loss += BceLoss::loss(&output, &[label]);

            let error = BceLoss::derivative(&output, &[label]);
            let mut delta = Matrix::from_data(vec![error]);

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let layer_input = if i == 0 {
                    Matrix::from_data(vec![input.clone()])
                } else {
                    network.layers[i - 1].output().clone()
                };

                match &network.layers[i] {
                    Layer::Dense(dense) => {
                        let (w_grad, b_grad) = dense.compute_gradients(delta.clone(), &layer_input);

                        if i > 0 {
                            // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                            delta = b_grad.clone() * dense.weights.transpose();
                        }

                        if let Some((w_acc, b_acc)) = &mut acc_grads[i] {
                            *w_acc = w_acc.clone() + w_grad;
                            *b_acc = b_acc.clone() + b_grad;
                        }
                    }
                    Layer::Dropout(dropout) => {
                        delta = dropout.backward(delta);
                    }
                }
            }
        }

        // Average and apply one optimizer step per layer.
        for (i, slot) in acc_grads.into_iter().enumerate() {
            if let Some((w_acc, b_acc)) = slot {
                let w_avg = w_acc.map(|g| g * inv_batch);
                let b_avg = b_acc.map(|g| g * inv_batch);
                if let Layer::Dense(dense) = &mut network.layers[i] {
                    optimizer.step(i, dense, w_avg, b_avg);
                }
            }
        }
    }

    total_loss / n as f64
}
