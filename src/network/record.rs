use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::loss::loss_type::LossType;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// A matrix as `(rows, columns, row-major data)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MatrixRecord {
    rows: u64,
    columns: u64,
    data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LayerRecord {
    nodes: u64,
    activation: String,
}

/// The on-disk form of a [`Network`], encoded with bincode.
///
/// Functions are stored by name and resolved again on load. `activations`
/// holds one zeroed `(nodes, 1)` column per layer; forward passes never write
/// into the network, so there is no cached state to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NetworkRecord {
    weights: Vec<MatrixRecord>,
    biases: Vec<MatrixRecord>,
    activations: Vec<MatrixRecord>,
    layers: Vec<LayerRecord>,
    debug_mode: bool,
    loss: String,
    learning_rate: f64,
}

impl From<&Matrix> for MatrixRecord {
    fn from(m: &Matrix) -> Self {
        MatrixRecord {
            rows: m.rows as u64,
            columns: m.cols as u64,
            data: m.flatten(),
        }
    }
}

impl MatrixRecord {
    fn to_matrix(&self) -> Result<Matrix> {
        Matrix::unflatten(to_usize(self.rows)?, to_usize(self.columns)?, &self.data)
    }
}

impl From<&Network> for NetworkRecord {
    fn from(n: &Network) -> Self {
        NetworkRecord {
            weights: n.weights().iter().map(MatrixRecord::from).collect(),
            biases: n.biases().iter().map(MatrixRecord::from).collect(),
            activations: n.layers().iter()
                .map(|l| MatrixRecord::from(&Matrix::zeros(l.nodes, 1)))
                .collect(),
            layers: n.layers().iter()
                .map(|l| LayerRecord {
                    nodes: l.nodes as u64,
                    activation: l.activator().name().to_string(),
                })
                .collect(),
            debug_mode: n.debug_mode(),
            loss: n.loss().name().to_string(),
            learning_rate: n.learning_rate(),
        }
    }
}

impl NetworkRecord {
    fn into_network(self) -> Result<Network> {
        let layers = self.layers.iter()
            .map(|l| {
                Ok(Layer::with_activation(
                    to_usize(l.nodes)?,
                    ActivationFunction::from_name(&l.activation)?,
                ))
            })
            .collect::<Result<Vec<Layer>>>()?;
        let loss = LossType::from_name(&self.loss)?;

        if self.activations.len() != layers.len() {
            return Err(NetworkError::Corrupt(format!(
                "{} layers but {} activation columns",
                layers.len(),
                self.activations.len()
            )));
        }
        for (i, (a, l)) in self.activations.iter().zip(layers.iter()).enumerate() {
            let column = a.to_matrix()?;
            if column.shape() != (l.nodes, 1) {
                return Err(NetworkError::Corrupt(format!(
                    "activation column {i} has shape {:?}, layer has {} nodes",
                    column.shape(),
                    l.nodes
                )));
            }
        }

        let weights = self.weights.iter().map(MatrixRecord::to_matrix).collect::<Result<Vec<_>>>()?;
        let biases = self.biases.iter().map(MatrixRecord::to_matrix).collect::<Result<Vec<_>>>()?;

        Network::from_parts(weights, biases, layers, self.learning_rate, loss, self.debug_mode)
    }
}

fn to_usize(v: u64) -> Result<usize> {
    usize::try_from(v).map_err(|_| NetworkError::Corrupt(format!("dimension {v} does not fit in memory")))
}

/// `<path>.tmp` next to the target, so the final rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Network {
    /// Encodes the network as a single binary record.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&NetworkRecord::from(self))?)
    }

    /// Decodes a record produced by [`Network::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Network> {
        let record: NetworkRecord = bincode::deserialize(bytes)?;
        record.into_network()
    }

    /// Writes the network to `path`.
    ///
    /// The record goes to a sibling temporary file first and is renamed into
    /// place once fully written, so `path` never holds a partial record.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let tmp = temp_path(path);

        let written = (|| -> Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, path)?;
            Ok(())
        })();

        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        } else {
            debug!("saved network ({} bytes) to {}", bytes.len(), path.display());
        }
        written
    }

    /// Reads a network previously written by [`Network::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let network = Network::from_bytes(&bytes)?;
        debug!(
            "loaded network with {} layers from {}",
            network.layers().len(),
            path.display()
        );
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn network() -> Network {
        let layers = [
            Layer::new(3),
            Layer::with_activation(5, ActivationFunction::Gelu),
            Layer::with_activation(2, ActivationFunction::LeakyReLU),
        ];
        let mut net = Network::with_rng(0.0375, LossType::Huber, &layers, &mut StdRng::seed_from_u64(21)).unwrap();
        net.set_debug_mode(true);
        net
    }

    #[test]
    fn bytes_round_trip_exactly() {
        let net = network();
        let restored = Network::from_bytes(&net.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, net);
        for (a, b) in restored.weights().iter().zip(net.weights()) {
            let bits_a: Vec<u64> = a.flatten().iter().map(|x| x.to_bits()).collect();
            let bits_b: Vec<u64> = b.flatten().iter().map(|x| x.to_bits()).collect();
            assert_eq!(bits_a, bits_b);
        }
    }

    #[test]
    fn record_stores_shapes_and_names() {
        let record = NetworkRecord::from(&network());
        assert_eq!(record.weights[0].rows, 5);
        assert_eq!(record.weights[0].columns, 3);
        assert_eq!(record.weights[0].data.len(), 15);
        assert_eq!(record.biases[1].columns, 1);
        assert_eq!(record.activations.len(), 3);
        assert_eq!(record.layers[0].activation, "identity");
        assert_eq!(record.layers[1].activation, "gelu");
        assert_eq!(record.loss, "huber");
        assert!(record.debug_mode);
    }

    #[test]
    fn unknown_activation_fails_to_load() {
        let mut record = NetworkRecord::from(&network());
        record.layers[1].activation = "softsign".to_string();
        let bytes = bincode::serialize(&record).unwrap();
        assert!(matches!(
            Network::from_bytes(&bytes),
            Err(NetworkError::UnknownActivation(name)) if name == "softsign"
        ));
    }

    #[test]
    fn unknown_loss_fails_to_load() {
        let mut record = NetworkRecord::from(&network());
        record.loss = "classification".to_string();
        let bytes = bincode::serialize(&record).unwrap();
        assert!(matches!(Network::from_bytes(&bytes), Err(NetworkError::UnknownLoss(_))));
    }

    #[test]
    fn inconsistent_shapes_are_corrupt() {
        let mut record = NetworkRecord::from(&network());
        record.weights[0].rows = 4;
        let bytes = bincode::serialize(&record).unwrap();
        assert!(matches!(Network::from_bytes(&bytes), Err(NetworkError::Corrupt(_))));

        let mut record = NetworkRecord::from(&network());
        record.biases.pop();
        let bytes = bincode::serialize(&record).unwrap();
        assert!(matches!(Network::from_bytes(&bytes), Err(NetworkError::Corrupt(_))));
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        assert!(matches!(Network::from_bytes(&[1, 2, 3]), Err(NetworkError::Encoding(_))));
    }

    #[test]
    fn temp_path_sits_next_to_target() {
        assert_eq!(temp_path(Path::new("/tmp/model.bin")), PathBuf::from("/tmp/model.bin.tmp"));
    }
}
