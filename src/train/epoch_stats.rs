use serde::{Serialize, Deserialize};

/// Per-epoch training statistics produced by `Network::train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop also sends each value as soon as its epoch completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Summed sample loss reported by the optimizer divided by the sample count.
    pub train_loss: f64,
    /// Mean loss over `TrainConfig::validation`, when one was supplied.
    pub val_loss: Option<f64>,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
