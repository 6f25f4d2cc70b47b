/// Configuration for a `fit` run.
///
/// # Fields
/// - `epochs`       — total number of full passes over the training data
/// - `batch_size`   — samples per mini-batch; use `1` for online updates
/// - `shuffle_seed` — seeds the RNG that drives per-epoch batch shuffling
///                    and dropout masks, making a fit run reproducible
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub shuffle_seed: u64,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, shuffle_seed: u64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            shuffle_seed,
        }
    }
}
