use serde::{Serialize, Deserialize};

/// Per-epoch statistics produced by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent at the end of every completed epoch so a front end can show progress
/// while training continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared error over the training samples, each measured just
    /// before its own training step.
    pub train_loss: f64,
    /// Mean squared error over the test set, if one was provided.
    pub test_loss: Option<f64>,
    /// Fraction of test samples whose strongest output matches the label.
    pub performance: Option<f64>,
    /// Wall-clock duration of the training pass in milliseconds.
    pub elapsed_ms: u64,
}
