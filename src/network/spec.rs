use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::layers::dense::Layer;
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

/// A serializable description of a network architecture plus its training
/// hyperparameters, kept separate from trained weights.
///
/// ```json
/// {
///   "name": "xor",
///   "learning_rate": 0.5,
///   "loss": "mse",
///   "layers": [
///     { "nodes": 2 },
///     { "nodes": 3, "activation": "sigmoid" },
///     { "nodes": 1, "activation": "sigmoid" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, e.g. the file stem for saved weights.
    pub name: String,
    pub learning_rate: f64,
    pub loss: LossType,
    /// Ordered list of layer declarations (input → output).
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub debug_mode: bool,
}

impl NetworkSpec {
    /// Builds a freshly initialized network from this description.
    pub fn build(&self) -> Result<Network> {
        self.build_with(&mut rand::thread_rng())
    }

    pub fn build_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        let mut network = Network::with_rng(self.learning_rate, self.loss, &self.layers, rng)?;
        network.set_debug_mode(self.debug_mode);
        Ok(network)
    }

    /// Describes an existing network's architecture.
    pub fn describe(name: &str, network: &Network) -> NetworkSpec {
        NetworkSpec {
            name: name.to_string(),
            learning_rate: network.learning_rate(),
            loss: network.loss(),
            layers: network.layers().to_vec(),
            debug_mode: network.debug_mode(),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
