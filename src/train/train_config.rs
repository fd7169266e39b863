use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::dataset::Dataset;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`      — number of shuffled passes handed to the optimizer
/// - `validation`  — optional held-out set evaluated after every epoch
/// - `progress_tx` — optional channel; one `EpochStats` is sent per completed
///                   epoch. If the receiver is dropped the run ends early.
/// - `stop_flag`   — optional atomic flag, checked between epochs; setting it
///                   from another thread ends the run after the current epoch.
#[derive(Debug, Default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub validation: Option<Dataset>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no validation set, progress channel or stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            ..TrainConfig::default()
        }
    }

    pub fn with_validation(mut self, validation: Dataset) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
