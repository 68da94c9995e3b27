use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Everything needed to rebuild an equivalent [`Network`](super::Network):
/// the configuration plus both weight matrices.
///
/// The serialized form is what `Network::save_json` writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub config: NetworkConfig,
    /// hidden × input
    pub weights_input_hidden: Matrix,
    /// output × hidden
    pub weights_hidden_output: Matrix,
}

impl NetworkState {
    /// Checks that the matrices agree with the configured layer sizes and hold
    /// only finite weights.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        let c = &self.config;
        check_matrix(
            "weights_input_hidden",
            &self.weights_input_hidden,
            (c.hidden_nodes, c.input_nodes),
        )?;
        check_matrix(
            "weights_hidden_output",
            &self.weights_hidden_output,
            (c.output_nodes, c.hidden_nodes),
        )
    }
}

fn check_matrix(what: &'static str, m: &Matrix, (rows, cols): (usize, usize)) -> Result<()> {
    if m.shape() != (rows, cols) {
        return Err(NetworkError::InvalidConfig(format!(
            "{what} is {}×{}, expected {rows}×{cols}",
            m.rows, m.cols
        )));
    }
    if m.data.len() != rows * cols {
        return Err(NetworkError::ShapeMismatch {
            what,
            expected: rows * cols,
            actual: m.data.len(),
        });
    }
    if !m.is_finite() {
        return Err(NetworkError::NonFinite { what: what.to_owned() });
    }
    Ok(())
}
