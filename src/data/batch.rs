use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A single pass of shuffled mini-batches over a dataset.
///
/// The sample order is shuffled once at construction; iteration then yields
/// owned `(features, labels)` batches of `batch_size` samples (the final
/// batch may be short). Build a fresh `Batches` for every epoch — each
/// construction draws a new order from `rng`.
pub struct Batches<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [f64],
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    pub fn new(
        features: &'a [Vec<f64>],
        labels: &'a [f64],
        batch_size: usize,
        rng: &mut StdRng,
    ) -> Batches<'a> {
        assert_eq!(
            features.len(),
            labels.len(),
            "features and labels must have equal length"
        );
        assert!(batch_size > 0, "batch_size must be at least 1");

        let mut order: Vec<usize> = (0..features.len()).collect();
        order.shuffle(rng);

        Batches {
            features,
            labels,
            order,
            batch_size,
            cursor: 0,
        }
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = (Vec<Vec<f64>>, Vec<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        let batch_x = indices.iter().map(|&i| self.features[i].clone()).collect();
        let batch_y = indices.iter().map(|&i| self.labels[i]).collect();
        self.cursor = end;
        Some((batch_x, batch_y))
    }
}
