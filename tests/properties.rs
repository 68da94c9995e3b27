use proptest::prelude::*;
use reverie_nn::{Network, NetworkConfig};

fn sizes() -> impl Strategy<Value = (usize, usize, usize, u64)> {
    (1usize..20, 1usize..12, 1usize..8, any::<u64>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn query_outputs_stay_in_open_unit_interval((i, h, o, seed) in sizes()) {
        let net = Network::new(NetworkConfig::new(i, h, o, 0.1).with_seed(seed)).unwrap();
        let output = net.query(&vec![0.01; i]).unwrap();
        prop_assert_eq!(output.len(), o);
        prop_assert!(output.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn backquery_stays_in_band(
        (i, h, o, seed) in sizes(),
        raw in prop::collection::vec(-2.0f64..3.0, 8),
    ) {
        let net = Network::new(NetworkConfig::new(i, h, o, 0.1).with_seed(seed)).unwrap();
        let targets: Vec<f64> = raw.into_iter().take(o).collect();
        let dream = net.backquery(&targets).unwrap();
        prop_assert_eq!(dream.len(), i);
        prop_assert!(dream.iter().all(|&v| (0.01..=0.99).contains(&v)), "{:?}", dream);
    }

    #[test]
    fn query_is_repeatable(
        seed in any::<u64>(),
        input in prop::collection::vec(0.01f64..0.99, 5),
    ) {
        let net = Network::new(NetworkConfig::new(5, 4, 3, 0.1).with_seed(seed)).unwrap();
        prop_assert_eq!(net.query(&input).unwrap(), net.query(&input).unwrap());
    }
}
