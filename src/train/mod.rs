pub mod dataset;
pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;

pub use dataset::{DataSample, Dataset};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::train_loop;
