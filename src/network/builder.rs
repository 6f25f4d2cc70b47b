use crate::network::network::Network;
use crate::network::spec::NetworkSpec;
use crate::optim::adam::Adam;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builds the demo classifier: the fixed
/// `NetworkSpec::binary_classifier` stack with seeded weight initialization,
/// paired with an Adam optimizer at `learning_rate`. Loss and metric are
/// fixed by the trainer (binary cross-entropy, accuracy at 0.5).
pub fn build_model(input_dim: usize, learning_rate: f64, seed: u64) -> (Network, Adam) {
    let spec = NetworkSpec::binary_classifier(input_dim);
    let network = Network::from_spec(&spec, &mut StdRng::seed_from_u64(seed));
    let optimizer = Adam::new(&network, learning_rate);
    (network, optimizer)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_seed_builds_identical_networks() {
        let (mut a, _) = build_model(20, 0.001, 99);
        let (mut b, _) = build_model(20, 0.001, 99);

        let input = vec![0.25; 20];
        assert_eq!(a.forward(input.clone()), b.forward(input));
    }
}
