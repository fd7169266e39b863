use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::loss_type::LossType;
use crate::math::matrix::{Matrix, INIT_RANGE};
use crate::network::forward::ForwardPass;
use crate::optim::{backprop::Gradients, Optimizer};
use crate::train::dataset::Dataset;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Minimum number of layers: input, one hidden, output.
pub const MIN_LAYERS: usize = 3;

/// A fully-connected feedforward network.
///
/// `weights[i]` has shape `(layers[i + 1].nodes, layers[i].nodes)` and
/// `biases[i]` has shape `(layers[i + 1].nodes, 1)`. Every stored layer has an
/// explicit activation.
///
/// `Clone` is a deep copy: the clone owns its own parameter matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    layers: Vec<Layer>,
    learning_rate: f64,
    loss: LossType,
    debug_mode: bool,
}

impl Network {
    /// Builds a network with parameters drawn uniformly from [`INIT_RANGE`].
    pub fn new(learning_rate: f64, loss: LossType, layers: &[Layer]) -> Result<Network> {
        Network::with_rng(learning_rate, loss, layers, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        learning_rate: f64,
        loss: LossType,
        layers: &[Layer],
        rng: &mut R,
    ) -> Result<Network> {
        validate_layers(layers)?;

        let (weights, biases) = layers.windows(2)
            .map(|pair| {
                let (current, next) = (&pair[0], &pair[1]);
                (
                    Matrix::random(next.nodes, current.nodes, INIT_RANGE, rng),
                    Matrix::random(next.nodes, 1, INIT_RANGE, rng),
                )
            })
            .unzip();

        Ok(Network {
            weights,
            biases,
            layers: layers.iter().map(Layer::resolved).collect(),
            learning_rate,
            loss,
            debug_mode: false,
        })
    }

    /// Assembles a network from already-built parts, checking every shape.
    pub(crate) fn from_parts(
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
        layers: Vec<Layer>,
        learning_rate: f64,
        loss: LossType,
        debug_mode: bool,
    ) -> Result<Network> {
        validate_layers(&layers)?;
        let transitions = layers.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(NetworkError::Corrupt(format!(
                "{} layers need {transitions} weight and bias matrices, found {} and {}",
                layers.len(),
                weights.len(),
                biases.len()
            )));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            let expected_w = (pair[1].nodes, pair[0].nodes);
            let expected_b = (pair[1].nodes, 1);
            if weights[i].shape() != expected_w || biases[i].shape() != expected_b {
                return Err(NetworkError::Corrupt(format!(
                    "transition {i}: expected weights {expected_w:?} and biases {expected_b:?}, \
                     found {:?} and {:?}",
                    weights[i].shape(),
                    biases[i].shape()
                )));
            }
        }

        Ok(Network {
            weights,
            biases,
            layers: layers.iter().map(Layer::resolved).collect(),
            learning_rate,
            loss,
            debug_mode,
        })
    }

    /// Enables `log::info!` progress reports during [`Network::train`].
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn loss(&self) -> LossType {
        self.loss
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].nodes
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].nodes
    }

    /// Runs the input through every layer and returns the full trace.
    pub fn forward(&self, inputs: &[f64]) -> Result<ForwardPass> {
        if inputs.len() != self.input_size() {
            return Err(NetworkError::InputShape {
                expected: self.input_size(),
                got: inputs.len(),
            });
        }

        let mut activations = Vec::with_capacity(self.layers.len());
        let mut pre_activations = Vec::with_capacity(self.weights.len());
        activations.push(Matrix::column(inputs));

        for (i, (w, b)) in self.weights.iter().zip(self.biases.iter()).enumerate() {
            let activator = self.layers[i + 1].activator();
            let z = &w.dot(&activations[i]) + b;
            activations.push(z.map(|x| activator.function(x)));
            pre_activations.push(z);
        }

        Ok(ForwardPass { activations, pre_activations })
    }

    /// Inference: the output layer's activations for `inputs`.
    pub fn predict(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(inputs)?.output())
    }

    /// Mean loss over `dataset` without touching any parameter.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<f64> {
        self.check_dataset(dataset)?;
        if dataset.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for sample in dataset {
            total += self.loss.loss(&self.predict(&sample.inputs)?, &sample.targets);
        }
        Ok(total / dataset.len() as f64)
    }

    /// Fails on the first sample whose shape does not fit the input/output layers.
    pub fn check_dataset(&self, dataset: &Dataset) -> Result<()> {
        let (expected_in, expected_out) = (self.input_size(), self.output_size());
        for (sample, data) in dataset.iter().enumerate() {
            if data.inputs.len() != expected_in {
                return Err(NetworkError::SampleInputShape {
                    sample,
                    expected: expected_in,
                    got: data.inputs.len(),
                });
            }
            if data.targets.len() != expected_out {
                return Err(NetworkError::SampleTargetShape {
                    sample,
                    expected: expected_out,
                    got: data.targets.len(),
                });
            }
        }
        Ok(())
    }

    /// `weight -= rate * gradient` and `bias -= rate * gradient` for every transition.
    ///
    /// Every gradient matrix is checked against its parameter first; on a
    /// mismatch nothing is updated.
    pub fn apply_gradients(&mut self, gradients: &Gradients, rate: f64) -> Result<()> {
        check_gradient_shapes(&self.weights, &gradients.weights)?;
        check_gradient_shapes(&self.biases, &gradients.biases)?;

        for (w, gw) in self.weights.iter_mut().zip(gradients.weights.iter()) {
            w.add_scaled(gw, -rate);
        }
        for (b, gb) in self.biases.iter_mut().zip(gradients.biases.iter()) {
            b.add_scaled(gb, -rate);
        }
        Ok(())
    }

    /// Trains for `epochs` epochs, shuffling `dataset` before each one.
    ///
    /// Every sample is checked against the layer sizes before the first epoch;
    /// one bad sample aborts the whole call. Returns the last epoch's
    /// statistics, or `None` when `epochs` is zero.
    pub fn train<O>(&mut self, optimizer: &mut O, dataset: &mut Dataset, epochs: usize) -> Result<Option<EpochStats>>
    where
        O: Optimizer + ?Sized,
    {
        self.train_with(optimizer, dataset, &TrainConfig::new(epochs), &mut rand::thread_rng())
    }

    pub fn train_with<O, R>(
        &mut self,
        optimizer: &mut O,
        dataset: &mut Dataset,
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<Option<EpochStats>>
    where
        O: Optimizer + ?Sized,
        R: Rng + ?Sized,
    {
        train_loop(self, optimizer, dataset, config, rng)
    }
}

/// A missing or surplus gradient is reported with shape `(0, 0)` on its absent side.
fn check_gradient_shapes(params: &[Matrix], grads: &[Matrix]) -> Result<()> {
    let shape_at = |ms: &[Matrix], i: usize| ms.get(i).map_or((0, 0), Matrix::shape);
    for index in 0..params.len().max(grads.len()) {
        let (expected, got) = (shape_at(params, index), shape_at(grads, index));
        if expected != got {
            return Err(NetworkError::GradientShape { index, expected, got });
        }
    }
    Ok(())
}

fn validate_layers(layers: &[Layer]) -> Result<()> {
    if layers.len() < MIN_LAYERS {
        return Err(NetworkError::TooFewLayers { got: layers.len() });
    }
    if let Some(index) = layers.iter().position(|l| l.nodes == 0) {
        return Err(NetworkError::EmptyLayer { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn topology() -> Vec<Layer> {
        vec![
            Layer::new(2),
            Layer::with_activation(3, ActivationFunction::ReLU),
            Layer::with_activation(4, ActivationFunction::Sigmoid),
            Layer::new(1),
        ]
    }

    #[test]
    fn construction_allocates_expected_shapes() {
        let net = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        assert_eq!(net.weights().len(), 3);
        assert_eq!(net.biases().len(), 3);
        assert_eq!(net.weights()[0].shape(), (3, 2));
        assert_eq!(net.weights()[1].shape(), (4, 3));
        assert_eq!(net.weights()[2].shape(), (1, 4));
        assert_eq!(net.biases()[1].shape(), (4, 1));
        for m in net.weights().iter().chain(net.biases()) {
            assert!(m.flatten().iter().all(|x| INIT_RANGE.contains(x)));
        }
    }

    #[test]
    fn construction_needs_three_layers() {
        let two = [Layer::new(2), Layer::new(1)];
        assert!(matches!(
            Network::new(0.1, LossType::Mse, &two),
            Err(NetworkError::TooFewLayers { got: 2 })
        ));
        assert!(matches!(
            Network::new(0.1, LossType::Mse, &[]),
            Err(NetworkError::TooFewLayers { got: 0 })
        ));
    }

    #[test]
    fn construction_rejects_empty_layer() {
        let layers = [Layer::new(2), Layer::new(0), Layer::new(1)];
        assert!(matches!(
            Network::new(0.1, LossType::Mse, &layers),
            Err(NetworkError::EmptyLayer { index: 1 })
        ));
    }

    #[test]
    fn identity_fallback_leaves_caller_layers_alone() {
        let layers = topology();
        let net = Network::new(0.1, LossType::Mse, &layers).unwrap();
        assert_eq!(layers[0].activation, None);
        assert_eq!(net.layers()[0].activation, Some(ActivationFunction::Identity));
        assert_eq!(net.layers()[3].activation, Some(ActivationFunction::Identity));
        assert_eq!(net.layers()[1].activation, Some(ActivationFunction::ReLU));
    }

    #[test]
    fn predict_matches_hand_computation() {
        let layers = [Layer::new(2), Layer::new(2), Layer::new(1)];
        let net = Network::from_parts(
            vec![
                Matrix::from_data(vec![vec![1.0, 2.0], vec![-1.0, 0.5]]),
                Matrix::from_data(vec![vec![0.5, -2.0]]),
            ],
            vec![Matrix::column(&[0.1, 0.2]), Matrix::column(&[1.0])],
            layers.to_vec(),
            0.1,
            LossType::Mse,
            false,
        )
        .unwrap();

        // hidden = [1*1 + 2*2 + 0.1, -1*1 + 0.5*2 + 0.2] = [5.1, 0.2]
        // output = 0.5*5.1 - 2*0.2 + 1 = 3.15
        let out = net.predict(&[1.0, 2.0]).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0], 3.15, epsilon = 1e-12);
    }

    #[test]
    fn predict_is_deterministic() {
        let net = Network::with_rng(0.1, LossType::Mse, &topology(), &mut StdRng::seed_from_u64(1)).unwrap();
        let a = net.predict(&[0.3, -0.7]).unwrap();
        let b = net.predict(&[0.3, -0.7]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), net.output_size());
    }

    #[test]
    fn predict_rejects_wrong_input_length() {
        let net = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        assert!(matches!(
            net.predict(&[1.0, 2.0, 3.0]),
            Err(NetworkError::InputShape { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn forward_records_every_layer() {
        let net = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        let pass = net.forward(&[0.5, 0.5]).unwrap();
        assert_eq!(pass.activations.len(), 4);
        assert_eq!(pass.pre_activations.len(), 3);
        assert_eq!(pass.activations[0].flatten(), vec![0.5, 0.5]);
        assert_eq!(pass.activations[2].shape(), (4, 1));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        let mut bump = Gradients::zeros_like(&copy);
        bump.weights[0].data[0][0] = 1.0;
        copy.apply_gradients(&bump, 1.0).unwrap();
        assert_ne!(copy.weights()[0], original.weights()[0]);

        let before = copy.weights()[1].clone();
        original.apply_gradients(&Gradients::zeros_like(&original).map(|_| 1.0), 1.0).unwrap();
        assert_eq!(copy.weights()[1], before);
    }

    #[test]
    fn mismatched_gradients_are_rejected_without_update() {
        let mut net = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        let before = net.clone();

        let mut grads = Gradients::zeros_like(&net).map(|_| 1.0);
        grads.weights[1] = Matrix::zeros(2, 2);
        assert!(matches!(
            net.apply_gradients(&grads, 1.0),
            Err(NetworkError::GradientShape { index: 1, .. })
        ));

        let mut grads = Gradients::zeros_like(&net).map(|_| 1.0);
        grads.biases.pop();
        assert!(matches!(net.apply_gradients(&grads, 1.0), Err(NetworkError::GradientShape { .. })));
        assert_eq!(net, before);
    }

    #[test]
    fn check_dataset_reports_first_bad_sample() {
        use crate::train::dataset::DataSample;

        let net = Network::new(0.1, LossType::Mse, &topology()).unwrap();
        let data = Dataset::new(vec![
            DataSample::new(vec![0.0, 1.0], vec![1.0]),
            DataSample::new(vec![0.0, 1.0], vec![1.0, 0.0]),
        ]);
        assert!(matches!(
            net.check_dataset(&data),
            Err(NetworkError::SampleTargetShape { sample: 1, expected: 1, got: 2 })
        ));
    }
}
