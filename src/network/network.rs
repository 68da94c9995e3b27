use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::activation::sigmoid::{
    clamp_to_band, logit_vec, rescale_to_band, sigmoid_derivative_from_output, sigmoid_vec,
};
use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::state::NetworkState;

/// Two-layer feedforward network: input → hidden → output, sigmoid on both
/// layers, no biases.
///
/// The weights are owned by the value and mutated in place by [`train`](Self::train).
/// Sharing a network between threads needs external locking around `train`.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    /// hidden × input
    w_ih: Matrix,
    /// output × hidden
    w_ho: Matrix,
}

/// Activations of one forward pass, kept for the backward pass.
struct Forward {
    hidden: Vec<f64>,
    output: Vec<f64>,
}

impl Network {
    /// Builds a network with weights drawn from N(0, fan_in^-½), seeded by
    /// `config.seed`.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let w_ih = Matrix::fan_in_normal(config.hidden_nodes, config.input_nodes, &mut rng)
            .map_err(|e| NetworkError::Distribution(e.to_string()))?;
        let w_ho = Matrix::fan_in_normal(config.output_nodes, config.hidden_nodes, &mut rng)
            .map_err(|e| NetworkError::Distribution(e.to_string()))?;

        debug!(
            input = config.input_nodes,
            hidden = config.hidden_nodes,
            output = config.output_nodes,
            learning_rate = config.learning_rate,
            seed = config.seed,
            "initialised network"
        );

        Ok(Network { config, w_ih, w_ho })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    pub fn weights_input_hidden(&self) -> &Matrix {
        &self.w_ih
    }

    pub fn weights_hidden_output(&self) -> &Matrix {
        &self.w_ho
    }

    /// Forward inference. Returns one activation in (0, 1) per output unit.
    ///
    /// Values outside (0, 1) are accepted; only the length is checked.
    pub fn query(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        check_len("inputs", self.config.input_nodes, inputs)?;
        Ok(self.forward(inputs).output)
    }

    /// One online backpropagation step on a single (inputs, targets) pair.
    ///
    /// The hidden-layer error is propagated through the hidden→output weights
    /// as they were before this step's update.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64]) -> Result<()> {
        check_len("inputs", self.config.input_nodes, inputs)?;
        check_len("targets", self.config.output_nodes, targets)?;

        let Forward { hidden, output } = self.forward(inputs);

        let output_error = MseLoss::output_error(&output, targets);
        let output_delta: Vec<f64> = output_error
            .iter()
            .zip(&output)
            .map(|(e, &o)| e * sigmoid_derivative_from_output(o))
            .collect();

        // Must read w_ho before it is updated below.
        let hidden_error = self.w_ho.transpose_mul_vec(&output_delta);
        let hidden_delta: Vec<f64> = hidden_error
            .iter()
            .zip(&hidden)
            .map(|(e, &h)| e * sigmoid_derivative_from_output(h))
            .collect();

        let lr = self.config.learning_rate;
        self.w_ho.add_scaled_outer(lr, &output_delta, &hidden);
        self.w_ih.add_scaled_outer(lr, &hidden_delta, inputs);
        Ok(())
    }

    /// Inverse "dream" query: reconstructs an input vector that would roughly
    /// produce `targets`.
    ///
    /// Targets are clamped into [0.01, 0.99], pulled back through the inverse
    /// sigmoid and the transposed weights, and min–max rescaled into
    /// [0.01, 0.99] after each layer. The transposes are not true inverses, so
    /// the result is an impression rather than an exact preimage.
    ///
    /// Fails with `NonFinite` when the weights or either back-projection
    /// contain NaN or infinity.
    pub fn backquery(&self, targets: &[f64]) -> Result<Vec<f64>> {
        check_len("targets", self.config.output_nodes, targets)?;
        if !all_finite(targets) {
            return Err(NetworkError::NonFinite { what: "backquery targets".to_owned() });
        }

        if !self.is_finite() {
            return Err(NetworkError::NonFinite { what: "network weights".to_owned() });
        }

        let output_raw = logit_vec(&clamp_to_band(targets));

        let hidden_proj = self.w_ho.transpose_mul_vec(&output_raw);
        check_finite("hidden back-projection", &hidden_proj)?;
        let hidden_raw = logit_vec(&rescale_to_band(&hidden_proj));

        let input_proj = self.w_ih.transpose_mul_vec(&hidden_raw);
        check_finite("input back-projection", &input_proj)?;
        Ok(rescale_to_band(&input_proj))
    }

    /// `false` once any weight has become NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.w_ih.is_finite() && self.w_ho.is_finite()
    }

    /// Snapshot of the configuration and both weight matrices.
    pub fn export_state(&self) -> NetworkState {
        NetworkState {
            config: self.config.clone(),
            weights_input_hidden: self.w_ih.clone(),
            weights_hidden_output: self.w_ho.clone(),
        }
    }

    /// Rebuilds a network from a snapshot. The matrices are validated against
    /// the configured sizes.
    pub fn from_state(state: NetworkState) -> Result<Network> {
        state.validate()?;
        debug!(
            input = state.config.input_nodes,
            hidden = state.config.hidden_nodes,
            output = state.config.output_nodes,
            "restored network from state"
        );
        Ok(Network {
            config: state.config,
            w_ih: state.weights_input_hidden,
            w_ho: state.weights_hidden_output,
        })
    }

    /// Serializes the network state to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.export_state())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let state: NetworkState = serde_json::from_reader(reader)?;
        Network::from_state(state)
    }

    fn forward(&self, inputs: &[f64]) -> Forward {
        let hidden = sigmoid_vec(&self.w_ih.mul_vec(inputs));
        let output = sigmoid_vec(&self.w_ho.mul_vec(&hidden));
        Forward { hidden, output }
    }
}

/// `true` when every value is finite.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn check_finite(what: &str, values: &[f64]) -> Result<()> {
    if !all_finite(values) {
        return Err(NetworkError::NonFinite { what: what.to_owned() });
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, values: &[f64]) -> Result<()> {
    if values.len() != expected {
        return Err(NetworkError::ShapeMismatch {
            what,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}
