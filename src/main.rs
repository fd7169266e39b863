// Trains a small XOR network, saves it, reloads it and prints predictions.
// Set RUST_LOG=info to see epoch progress, RUST_LOG=debug for save/load.
use feedforward_nn::{ActivationFunction, DataSample, Dataset, Layer, LossType, Network, Sgd};

fn main() -> feedforward_nn::Result<()> {
    env_logger::init();

    let mut network = Network::new(
        0.5,
        LossType::Mse,
        &[
            Layer::new(2),
            Layer::with_activation(3, ActivationFunction::Sigmoid),
            Layer::with_activation(1, ActivationFunction::Sigmoid),
        ],
    )?;
    network.set_debug_mode(true);

    let mut dataset = Dataset::new(vec![
        DataSample::new(vec![0.0, 0.0], vec![0.0]),
        DataSample::new(vec![0.0, 1.0], vec![1.0]),
        DataSample::new(vec![1.0, 0.0], vec![1.0]),
        DataSample::new(vec![1.0, 1.0], vec![0.0]),
    ]);

    if let Some(last) = network.train(&mut Sgd::new(), &mut dataset, 5000)? {
        println!("final loss: {:.6}", last.train_loss);
    }

    let path = std::env::temp_dir().join("feedforward-nn-xor.bin");
    network.save(&path)?;
    let restored = Network::load(&path)?;

    for sample in &dataset {
        let output = restored.predict(&sample.inputs)?;
        println!("{:?} -> {:.4}", sample.inputs, output[0]);
    }
    Ok(())
}
