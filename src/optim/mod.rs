pub mod backprop;
pub mod minibatch;
pub mod momentum;
pub mod sgd;

pub use backprop::Gradients;
pub use minibatch::MiniBatch;
pub use momentum::Momentum;
pub use sgd::Sgd;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::dataset::Dataset;

/// One epoch of parameter updates.
///
/// `Network::train` shuffles the dataset and hands it to the optimizer once
/// per epoch. The optimizer backpropagates (see [`Gradients::compute`]),
/// updates the network in place and returns the summed loss of every sample
/// it visited.
pub trait Optimizer {
    fn optimize(&mut self, network: &mut Network, dataset: &Dataset) -> Result<f64>;
}

impl<F> Optimizer for F
where
    F: FnMut(&mut Network, &Dataset) -> Result<f64>,
{
    fn optimize(&mut self, network: &mut Network, dataset: &Dataset) -> Result<f64> {
        self(network, dataset)
    }
}
