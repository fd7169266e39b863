use std::sync::atomic::Ordering;
use std::time::Instant;

use log::info;
use rand::Rng;

use crate::error::Result;
use crate::network::network::Network;
use crate::optim::Optimizer;
use crate::train::dataset::Dataset;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the statistics of
/// the last completed epoch, or `None` if no epoch ran. Per-epoch statistics
/// are streamed through `config.progress_tx`.
///
/// Before the first epoch every sample of `dataset` (and of the validation set,
/// if any) is checked against the network's input/output sizes; a mismatch
/// aborts the call before any parameter changes.
///
/// Each epoch shuffles `dataset` in place with `rng` and hands it to
/// `optimizer` once.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Debug mode
/// With `network.debug_mode()` set, start and end of every epoch that falls on
/// a 10%-of-total boundary are logged at info level. Runs shorter than ten
/// epochs have no such boundary and log nothing.
pub fn train_loop<O, R>(
    network: &mut Network,
    optimizer: &mut O,
    dataset: &mut Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Option<EpochStats>>
where
    O: Optimizer + ?Sized,
    R: Rng + ?Sized,
{
    network.check_dataset(dataset)?;
    if let Some(ref validation) = config.validation {
        network.check_dataset(validation)?;
    }

    let mut last = None;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let report = network.debug_mode() && reports_progress(epoch, config.epochs);
        if report {
            info!("Beginning epoch {epoch}/{}", config.epochs);
        }

        let t_start = Instant::now();

        dataset.shuffle_with(rng);
        let total = optimizer.optimize(network, dataset)?;
        let train_loss = mean(total, dataset.len());

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if report {
            info!("Finished epoch {epoch}/{} with error: {train_loss:.6}", config.epochs);
        }

        let val_loss = match config.validation {
            Some(ref validation) => Some(network.evaluate(validation)?),
            None => None,
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            elapsed_ms,
        };
        last = Some(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// True on every epoch that is a multiple of a tenth of `epochs`. Runs
/// shorter than ten epochs have no such boundary.
fn reports_progress(epoch: usize, epochs: usize) -> bool {
    let step = epochs / 10;
    step != 0 && epoch % step == 0
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}
