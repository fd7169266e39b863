use crate::error::Result;
use crate::network::network::Network;
use crate::optim::{backprop::Gradients, Optimizer};
use crate::train::dataset::Dataset;

/// SGD with classical momentum: `v = μ·v + g`, then `θ -= lr·v`.
///
/// The velocity survives across epochs and is reset whenever it no longer
/// matches the shape of the network being trained.
#[derive(Debug, Clone)]
pub struct Momentum {
    momentum: f64,
    velocity: Option<Gradients>,
}

impl Momentum {
    pub fn new(momentum: f64) -> Momentum {
        Momentum { momentum, velocity: None }
    }

    pub fn reset(&mut self) {
        self.velocity = None;
    }

    fn velocity_for(&mut self, network: &Network) -> &mut Gradients {
        let fits = self.velocity.as_ref().is_some_and(|v| {
            v.weights.len() == network.weights().len()
                && v.weights.iter().zip(network.weights()).all(|(a, b)| a.shape() == b.shape())
        });
        if !fits {
            self.velocity = None;
        }
        self.velocity.get_or_insert_with(|| Gradients::zeros_like(network))
    }
}

impl Optimizer for Momentum {
    fn optimize(&mut self, network: &mut Network, dataset: &Dataset) -> Result<f64> {
        let mu = self.momentum;
        let mut total_loss = 0.0;

        for sample in dataset {
            let (gradients, loss) = Gradients::compute(network, sample)?;
            let velocity = self.velocity_for(network);
            *velocity = velocity.scale(mu);
            velocity.accumulate(&gradients);
            network.apply_gradients(velocity, network.learning_rate())?;
            total_loss += loss;
        }

        Ok(total_loss)
    }
}
