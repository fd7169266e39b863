use crate::error::Result;
use crate::network::network::Network;
use crate::optim::{backprop::Gradients, Optimizer};
use crate::train::dataset::Dataset;

/// Plain stochastic gradient descent: one update per sample, scaled by the
/// network's learning rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgd;

impl Sgd {
    pub fn new() -> Sgd {
        Sgd
    }
}

impl Optimizer for Sgd {
    fn optimize(&mut self, network: &mut Network, dataset: &Dataset) -> Result<f64> {
        let mut total_loss = 0.0;
        for sample in dataset {
            let (gradients, loss) = Gradients::compute(network, sample)?;
            network.apply_gradients(&gradients, network.learning_rate())?;
            total_loss += loss;
        }
        Ok(total_loss)
    }
}
