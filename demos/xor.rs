use feedforward_nn::{ActivationFunction, Dataset, Layer, LossType, MiniBatch, Network, TrainConfig};
use std::sync::mpsc;

fn main() {
    env_logger::init();

    let mut network = Network::new(
        0.8,
        LossType::BinaryCrossEntropy,
        &[
            Layer::new(2),
            Layer::with_activation(4, ActivationFunction::Tanh),
            Layer::with_activation(1, ActivationFunction::Sigmoid),
        ],
    )
    .expect("valid topology");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];
    let mut dataset = Dataset::from_pairs(&inputs, &expected_outputs).expect("one target per input");

    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(4000).with_progress(tx);
    network
        .train_with(&mut MiniBatch::new(2), &mut dataset, &config, &mut rand::thread_rng())
        .expect("dataset matches topology");

    for stats in rx.try_iter().filter(|s| s.epoch % 500 == 0) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    for input in &inputs {
        let output = network.predict(input).expect("two inputs");
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
}
