//! End-to-end run of the full pipeline on a scaled-down dataset:
//! generate → build → fit → evaluate → save → reload.

use approx::assert_relative_eq;
use mlp_classifier::{
    build_model, evaluate, fit, generate, GeneratorConfig, Network, TrainConfig,
};

#[test]
fn generate_fit_evaluate_and_round_trip() {
    let config = GeneratorConfig {
        samples: 400,
        ..GeneratorConfig::default()
    };
    let data = generate(&config);
    assert_eq!(data.x_train.len() + data.x_test.len(), 400);
    assert_eq!(data.x_test.len(), 80);
    assert!(data.x_train.iter().all(|row| row.len() == config.features));

    let (mut network, mut optimizer) = build_model(config.features, 0.001, 21);
    let train_config = TrainConfig::new(2, 32, 5);
    let history = fit(
        &mut network,
        &mut optimizer,
        &data.x_train,
        &data.y_train,
        &data.x_test,
        &data.y_test,
        &train_config,
    );
    assert_eq!(history.len(), 2);
    assert!(history.train_loss().iter().all(|loss| loss.is_finite()));

    let (test_loss, test_accuracy) = evaluate(&mut network, &data.x_test, &data.y_test);
    assert!(test_loss.is_finite());
    assert!((0.0..=1.0).contains(&test_accuracy));

    let path = std::env::temp_dir().join("mlp_classifier_pipeline_model.json");
    let path_str = path.to_str().unwrap();
    network.save_json(path_str).unwrap();
    let mut reloaded = Network::load_json(path_str).unwrap();
    let _ = std::fs::remove_file(&path);

    for input in data.x_test.iter().take(16) {
        assert_relative_eq!(
            network.forward(input.clone())[0],
            reloaded.forward(input.clone())[0],
            epsilon = 1e-12
        );
    }
}

#[test]
fn trained_model_beats_coin_flipping_on_easy_data() {
    // Tight, well-separated clusters; a few epochs should land well above
    // chance.
    let config = GeneratorConfig {
        samples: 600,
        informative: 20,
        cluster_spread: 0.5,
        ..GeneratorConfig::default()
    };
    let data = generate(&config);

    let (mut network, mut optimizer) = build_model(config.features, 0.01, 4);
    let train_config = TrainConfig::new(5, 32, 2);
    fit(
        &mut network,
        &mut optimizer,
        &data.x_train,
        &data.y_train,
        &data.x_test,
        &data.y_test,
        &train_config,
    );

    let (_, accuracy) = evaluate(&mut network, &data.x_test, &data.y_test);
    assert!(accuracy > 0.8, "test accuracy {accuracy} not above chance");
}
