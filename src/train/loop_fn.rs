use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{info, warn};

use crate::data::mnist_csv::{argmax, Sample};
use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Classification results over a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    /// Mean squared error between outputs and targets.
    pub loss: f64,
}

impl Evaluation {
    /// Fraction of correct guesses; zero when no samples were seen.
    pub fn performance(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the statistics of
/// every completed epoch.
///
/// # Arguments
/// - `network`: modified in place, one `train` step per sample
/// - `train`:   training samples, visited once per epoch
/// - `test`:    optional held-out samples scored after each epoch
/// - `config`:  epochs, ordering, optional progress channel and stop flag
///
/// # Early termination
/// The loop stops after the current epoch if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// Shape errors from the network, and `NetworkError::NonFinite` as soon as an
/// epoch's training loss or the weights stop being finite. The network is
/// left as it was at that point; nothing is rolled back.
pub fn train_loop(
    network: &mut Network,
    train: &[Sample],
    test: Option<&[Sample]>,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..train.len()).collect();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let t_start = Instant::now();
        let train_loss = train_epoch(network, train, &order)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if !train_loss.is_finite() || !network.is_finite() {
            warn!(epoch, train_loss, "training diverged");
            return Err(NetworkError::NonFinite {
                what: format!("network after epoch {epoch}"),
            });
        }

        let scored = match test {
            Some(samples) => Some(evaluate(network, samples)?),
            None => None,
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            test_loss: scored.map(|e| e.loss),
            performance: scored.map(|e| e.performance()),
            elapsed_ms,
        };

        info!(
            epoch,
            total = config.epochs,
            train_loss,
            performance = ?stats.performance,
            elapsed_ms,
            "epoch complete"
        );

        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(history)
}

/// One pass over `samples` in the given `order`, one `train` step each.
/// Returns the mean squared error measured just before each step.
///
/// An `order` entry past the end of `samples` fails with `ShapeMismatch`
/// (`expected` is the sample count). Steps already taken are kept.
pub fn train_epoch(network: &mut Network, samples: &[Sample], order: &[usize]) -> Result<f64> {
    if order.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for &idx in order {
        let sample = samples.get(idx).ok_or(NetworkError::ShapeMismatch {
            what: "sample index",
            expected: samples.len(),
            actual: idx,
        })?;
        let output = network.query(&sample.inputs)?;
        total_loss += MseLoss::loss(&output, &sample.targets);
        network.train(&sample.inputs, &sample.targets)?;
    }
    Ok(total_loss / order.len() as f64)
}

/// Queries every sample and counts how often the strongest output is the label.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Result<Evaluation> {
    let mut correct = 0;
    let mut total_loss = 0.0;

    for sample in samples {
        let output = network.query(&sample.inputs)?;
        total_loss += MseLoss::loss(&output, &sample.targets);
        if argmax(&output) == Some(sample.label) {
            correct += 1;
        }
    }

    let loss = if samples.is_empty() { 0.0 } else { total_loss / samples.len() as f64 };
    Ok(Evaluation { correct, total: samples.len(), loss })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}
