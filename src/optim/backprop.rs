use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::dataset::DataSample;

/// Loss gradients for every weight and bias matrix of a network.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    /// All-zero gradients shaped like `network`'s parameters.
    pub fn zeros_like(network: &Network) -> Gradients {
        Gradients {
            weights: network.weights().iter().map(|w| Matrix::zeros(w.rows, w.cols)).collect(),
            biases: network.biases().iter().map(|b| Matrix::zeros(b.rows, b.cols)).collect(),
        }
    }

    /// Backpropagates one sample through `network`.
    ///
    /// Returns the gradients and the sample's loss. The network itself is not
    /// modified.
    pub fn compute(network: &Network, sample: &DataSample) -> Result<(Gradients, f64)> {
        if sample.targets.len() != network.output_size() {
            return Err(NetworkError::TargetShape {
                expected: network.output_size(),
                got: sample.targets.len(),
            });
        }

        let pass = network.forward(&sample.inputs)?;
        let output = pass.output();
        let loss_fn = network.loss();
        let loss = loss_fn.loss(&output, &sample.targets);

        let transitions = network.weights().len();
        let mut weights = vec![Matrix::default(); transitions];
        let mut biases = vec![Matrix::default(); transitions];

        // ∂L/∂a for the layer currently being processed, starting at the output.
        let mut error = Matrix::column(&loss_fn.derivative(&output, &sample.targets));

        for i in (0..transitions).rev() {
            let activator = network.layers()[i + 1].activator();
            // δ = ∂L/∂a ⊙ σ'(z)
            let delta = error.hadamard(&pass.pre_activations[i].map(|z| activator.derivative(z)));

            weights[i] = delta.dot(&pass.activations[i].transpose());
            if i > 0 {
                error = network.weights()[i].transpose().dot(&delta);
            }
            biases[i] = delta;
        }

        Ok((Gradients { weights, biases }, loss))
    }

    /// Element-wise `self += other`.
    pub fn accumulate(&mut self, other: &Gradients) {
        for (acc, g) in self.weights.iter_mut().zip(other.weights.iter()) {
            acc.add_scaled(g, 1.0);
        }
        for (acc, g) in self.biases.iter_mut().zip(other.biases.iter()) {
            acc.add_scaled(g, 1.0);
        }
    }

    /// Applies `functor` to every gradient entry.
    pub fn map<F>(&self, functor: F) -> Gradients
    where
        F: Fn(f64) -> f64,
    {
        Gradients {
            weights: self.weights.iter().map(|w| w.map(&functor)).collect(),
            biases: self.biases.iter().map(|b| b.map(&functor)).collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Gradients {
        self.map(|x| x * factor)
    }
}
