use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Parameters for the synthetic two-class dataset.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub features: usize,
    /// How many leading feature columns carry class signal; the rest are
    /// standard-normal noise.
    pub informative: usize,
    pub classes: usize,
    /// Standard deviation of the class clusters on the informative columns.
    pub cluster_spread: f64,
    /// Fraction of samples held out for the test split.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            samples: 10_000,
            features: 20,
            informative: 10,
            classes: 2,
            cluster_spread: 1.0,
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Train/test partitions of one generated dataset. Disjoint and exhaustive
/// over the generated samples.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<f64>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<f64>,
}

/// Generates a balanced labeled dataset and splits it train/test.
///
/// Each class occupies a Gaussian cluster on the informative columns
/// (class 0 centred at -1, class 1 at +1); the remaining columns are pure
/// noise. Sample order is shuffled before splitting so both partitions mix
/// classes. Deterministic for a fixed `config.seed`.
pub fn generate(config: &GeneratorConfig) -> DatasetSplit {
    assert!(
        config.informative <= config.features,
        "informative columns ({}) exceed feature count ({})",
        config.informative,
        config.features
    );
    assert_eq!(config.classes, 2, "labels are binary; classes must be 2");
    assert!(
        (0.0..1.0).contains(&config.test_size),
        "test_size must be in [0, 1), got {}",
        config.test_size
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0).unwrap();

    let mut samples: Vec<(Vec<f64>, f64)> = (0..config.samples)
        .map(|i| {
            let label = (i % 2) as f64;
            let center = if label > 0.5 { 1.0 } else { -1.0 };
            let cluster = Normal::new(center, config.cluster_spread).unwrap();
            let features: Vec<f64> = (0..config.features)
                .map(|col| {
                    if col < config.informative {
                        cluster.sample(&mut rng)
                    } else {
                        noise.sample(&mut rng)
                    }
                })
                .collect();
            (features, label)
        })
        .collect();

    samples.shuffle(&mut rng);

    let test_len = (config.samples as f64 * config.test_size).round() as usize;
    let train_len = config.samples - test_len;

    let mut split = DatasetSplit {
        x_train: Vec::with_capacity(train_len),
        y_train: Vec::with_capacity(train_len),
        x_test: Vec::with_capacity(test_len),
        y_test: Vec::with_capacity(test_len),
    };
    for (i, (features, label)) in samples.into_iter().enumerate() {
        if i < train_len {
            split.x_train.push(features);
            split.y_train.push(label);
        } else {
            split.x_test.push(features);
            split.y_test.push(label);
        }
    }
    split
}
