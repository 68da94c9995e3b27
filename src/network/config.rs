use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Layer sizes, learning rate and initialisation seed of a [`Network`](super::Network).
///
/// Can be stored as JSON on its own, before any weights exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub learning_rate: f64,
    /// Seed for the weight initialisation RNG.
    #[serde(default)]
    pub seed: u64,
}

impl NetworkConfig {
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize, learning_rate: f64) -> Self {
        NetworkConfig {
            input_nodes,
            hidden_nodes,
            output_nodes,
            learning_rate,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects empty layers and learning rates outside (0, ∞).
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input_nodes", self.input_nodes),
            ("hidden_nodes", self.hidden_nodes),
            ("output_nodes", self.output_nodes),
        ] {
            if size == 0 {
                return Err(NetworkError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for NetworkConfig {
    /// 28×28 digit pictures, 256 hidden units, ten classes.
    fn default() -> Self {
        NetworkConfig::new(784, 256, 10, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(NetworkConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_sized_layer_is_rejected() {
        let err = NetworkConfig::new(4, 0, 2, 0.1).validate().unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(ref m) if m.contains("hidden_nodes")));
    }

    #[test]
    fn bad_learning_rates_are_rejected() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(NetworkConfig::new(4, 3, 2, lr).validate().is_err(), "lr {lr}");
        }
    }

    #[test]
    fn seed_defaults_to_zero_when_missing() {
        let json = r#"{"input_nodes":4,"hidden_nodes":3,"output_nodes":2,"learning_rate":0.2}"#;
        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, NetworkConfig::new(4, 3, 2, 0.2));
    }
}
