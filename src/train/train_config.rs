use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// Training is always online: one `Network::train` step per sample.
///
/// # Fields
/// - `epochs`:      total number of full passes over the training data
/// - `shuffle`:     visit samples in a fresh random order each epoch
/// - `seed`:        seed for the shuffle order
/// - `progress_tx`: optional channel sender; one `EpochStats` is sent per
///                  completed epoch.  If the receiver is dropped the loop
///                  stops after that epoch.
/// - `stop_flag`:   optional atomic flag; when set to `true` from another
///                  thread the loop stops after the current epoch.
#[derive(Debug)]
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub seed: u64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that visits samples in file order, with no
    /// progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: false,
            seed: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn shuffled(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }
}
