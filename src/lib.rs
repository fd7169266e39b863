pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use loss::loss_type::LossType;
pub use network::{ForwardPass, Network, NetworkSpec};
pub use optim::{Gradients, MiniBatch, Momentum, Optimizer, Sgd};
pub use train::{DataSample, Dataset, EpochStats, TrainConfig};
