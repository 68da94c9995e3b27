use reverie_nn::{Matrix, Network, NetworkConfig, NetworkError, NetworkState};

fn trained_network() -> Network {
    let mut net = Network::new(NetworkConfig::new(6, 5, 3, 0.15).with_seed(11)).unwrap();
    let samples = [
        ([0.9, 0.1, 0.1, 0.9, 0.5, 0.2], [0.99, 0.01, 0.01]),
        ([0.1, 0.9, 0.9, 0.1, 0.3, 0.7], [0.01, 0.99, 0.01]),
        ([0.5, 0.5, 0.01, 0.01, 0.99, 0.99], [0.01, 0.01, 0.99]),
    ];
    for _ in 0..50 {
        for (input, target) in &samples {
            net.train(input, target).unwrap();
        }
    }
    net
}

fn sample_inputs() -> Vec<Vec<f64>> {
    vec![
        vec![0.01; 6],
        vec![0.99; 6],
        vec![0.9, 0.1, 0.1, 0.9, 0.5, 0.2],
        vec![0.123, 0.456, 0.789, 0.321, 0.654, 0.987],
    ]
}

#[test]
fn test_state_round_trip_reproduces_queries() {
    let net = trained_network();
    let restored = Network::from_state(net.export_state()).unwrap();
    for input in sample_inputs() {
        assert_eq!(net.query(&input).unwrap(), restored.query(&input).unwrap());
    }
    assert_eq!(restored.config(), net.config());
}

#[test]
fn test_json_round_trip_is_bit_exact() {
    let net = trained_network();
    let path = std::env::temp_dir().join("reverie_nn_persistence_round_trip.json");
    let path = path.to_str().unwrap();

    net.save_json(path).unwrap();
    let loaded = Network::load_json(path).unwrap();
    let _ = std::fs::remove_file(path);

    assert_eq!(loaded.export_state(), net.export_state());
    for input in sample_inputs() {
        assert_eq!(net.query(&input).unwrap(), loaded.query(&input).unwrap());
        assert_eq!(net.backquery(&[0.99, 0.01, 0.01]).unwrap(), loaded.backquery(&[0.99, 0.01, 0.01]).unwrap());
    }
}

#[test]
fn test_restored_network_keeps_training_identically() {
    let mut original = trained_network();
    let mut restored = Network::from_state(original.export_state()).unwrap();

    let input = [0.4, 0.6, 0.2, 0.8, 0.1, 0.9];
    let target = [0.01, 0.99, 0.01];
    original.train(&input, &target).unwrap();
    restored.train(&input, &target).unwrap();
    assert_eq!(original.export_state(), restored.export_state());
}

#[test]
fn test_state_with_wrong_matrix_shape_is_rejected() {
    let mut state = trained_network().export_state();
    state.weights_hidden_output = Matrix::zeros(5, 3);
    assert!(matches!(Network::from_state(state), Err(NetworkError::InvalidConfig(_))));
}

#[test]
fn test_state_with_truncated_data_is_rejected() {
    let mut state = trained_network().export_state();
    state.weights_input_hidden.data.pop();
    assert!(matches!(
        Network::from_state(state),
        Err(NetworkError::ShapeMismatch { what: "weights_input_hidden", .. })
    ));
}

#[test]
fn test_state_with_non_finite_weight_is_rejected() {
    let mut state = trained_network().export_state();
    state.weights_input_hidden.data[0] = f64::INFINITY;
    assert!(matches!(Network::from_state(state), Err(NetworkError::NonFinite { .. })));
}

#[test]
fn test_state_with_bad_learning_rate_is_rejected() {
    let mut state: NetworkState = trained_network().export_state();
    state.config.learning_rate = -1.0;
    assert!(matches!(Network::from_state(state), Err(NetworkError::InvalidConfig(_))));
}

#[test]
fn test_config_json_round_trip() {
    let config = NetworkConfig::new(784, 100, 10, 0.05).with_seed(99);
    let path = std::env::temp_dir().join("reverie_nn_config_round_trip.json");
    let path = path.to_str().unwrap();

    config.save_json(path).unwrap();
    let loaded = NetworkConfig::load_json(path).unwrap();
    let _ = std::fs::remove_file(path);
    assert_eq!(loaded, config);
}

#[test]
fn test_loading_missing_file_is_an_io_error() {
    let err = Network::load_json("/nonexistent/reverie_nn/model.json").unwrap_err();
    assert!(matches!(err, NetworkError::Io(_)));
}
