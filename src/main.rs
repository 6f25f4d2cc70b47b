//! Runnable demo: train a small feed-forward binary classifier on synthetic
//! data, persist it as JSON, and plot the training curves.
//!
//! All parameters are compiled-in constants; run with `cargo run --release`.

use anyhow::Result;

use mlp_classifier::{
    build_model, evaluate, fit, generate, render_training_curves, GeneratorConfig, Network,
    TrainConfig,
};

const MODEL_PATH: &str = "model.json";
const CURVES_PATH: &str = "training_curves.png";

const LEARNING_RATE: f64 = 0.001;
const BATCH_SIZE: usize = 32;
const EPOCHS: usize = 10;
const INIT_SEED: u64 = 7;
const SHUFFLE_SEED: u64 = 1337;

fn main() -> Result<()> {
    let config = GeneratorConfig::default();
    println!(
        "Generating {} samples with {} features",
        config.samples, config.features
    );
    let data = generate(&config);
    println!(
        "Split: {} train / {} test",
        data.x_train.len(),
        data.x_test.len()
    );

    let mut network = match Network::load_json_if_exists(MODEL_PATH)? {
        Some(network) => {
            println!("Loaded model from {MODEL_PATH}");
            network
        }
        None => {
            println!("No saved model at {MODEL_PATH}, training from scratch");

            let (mut network, mut optimizer) =
                build_model(config.features, LEARNING_RATE, INIT_SEED);
            let train_config = TrainConfig::new(EPOCHS, BATCH_SIZE, SHUFFLE_SEED);
            let history = fit(
                &mut network,
                &mut optimizer,
                &data.x_train,
                &data.y_train,
                &data.x_test,
                &data.y_test,
                &train_config,
            );

            network.save_json(MODEL_PATH)?;
            println!("Model saved to {MODEL_PATH}");

            render_training_curves(&history, CURVES_PATH)?;
            println!("Training curves written to {CURVES_PATH}");

            network
        }
    };

    let (test_loss, test_accuracy) = evaluate(&mut network, &data.x_test, &data.y_test);
    println!("Test loss: {test_loss:.4}");
    println!("Test accuracy: {test_accuracy:.2}");

    Ok(())
}
