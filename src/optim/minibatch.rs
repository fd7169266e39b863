use crate::error::Result;
use crate::network::network::Network;
use crate::optim::{backprop::Gradients, Optimizer};
use crate::train::dataset::Dataset;

/// Mini-batch gradient descent: gradients are averaged over `batch_size`
/// consecutive samples and applied once per batch. A trailing partial batch
/// is averaged over its own length.
#[derive(Debug, Clone, Copy)]
pub struct MiniBatch {
    batch_size: usize,
}

impl MiniBatch {
    /// A `batch_size` of zero is treated as one.
    pub fn new(batch_size: usize) -> MiniBatch {
        MiniBatch { batch_size: batch_size.max(1) }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Optimizer for MiniBatch {
    fn optimize(&mut self, network: &mut Network, dataset: &Dataset) -> Result<f64> {
        let mut total_loss = 0.0;

        for batch in dataset.batches(self.batch_size) {
            let mut acc = Gradients::zeros_like(network);
            for sample in batch {
                let (gradients, loss) = Gradients::compute(network, sample)?;
                acc.accumulate(&gradients);
                total_loss += loss;
            }
            let avg = acc.scale(1.0 / batch.len() as f64);
            network.apply_gradients(&avg, network.learning_rate())?;
        }

        Ok(total_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::dense::Layer;
    use crate::loss::loss_type::LossType;
    use crate::optim::sgd::Sgd;
    use crate::train::dataset::DataSample;

    fn net() -> Network {
        let layers = [Layer::new(1), Layer::new(2), Layer::new(1)];
        Network::new(0.1, LossType::Mse, &layers).unwrap()
    }

    #[test]
    fn batch_of_one_equals_sgd() {
        let data = Dataset::new(vec![
            DataSample::new(vec![0.1], vec![0.2]),
            DataSample::new(vec![0.7], vec![-0.4]),
        ]);
        let mut a = net();
        let mut b = a.clone();
        let la = MiniBatch::new(1).optimize(&mut a, &data).unwrap();
        let lb = Sgd.optimize(&mut b, &data).unwrap();
        assert_eq!(la, lb);
        assert_eq!(a, b);
    }

    #[test]
    fn full_batch_applies_the_average_once() {
        let data = Dataset::new(vec![
            DataSample::new(vec![0.1], vec![0.2]),
            DataSample::new(vec![0.7], vec![-0.4]),
            DataSample::new(vec![-0.3], vec![0.9]),
        ]);
        let mut net = net();
        let mut acc = Gradients::zeros_like(&net);
        for s in &data {
            acc.accumulate(&Gradients::compute(&net, s).unwrap().0);
        }
        let mut expected = net.clone();
        expected.apply_gradients(&acc.scale(1.0 / 3.0), 0.1).unwrap();

        MiniBatch::new(3).optimize(&mut net, &data).unwrap();
        assert_eq!(net, expected);
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        assert_eq!(MiniBatch::new(0).batch_size(), 1);
    }
}
