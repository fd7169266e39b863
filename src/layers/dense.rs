use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;

/// One fully-connected tier of a network: how many nodes it has and which
/// activation its weighted sums pass through.
///
/// A layer declared without an activation behaves as [`ActivationFunction::Identity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub nodes: usize,
    #[serde(default)]
    pub activation: Option<ActivationFunction>,
}

impl Layer {
    /// A layer with no explicit activation.
    pub fn new(nodes: usize) -> Layer {
        Layer { nodes, activation: None }
    }

    pub fn with_activation(nodes: usize, activation: ActivationFunction) -> Layer {
        Layer { nodes, activation: Some(activation) }
    }

    /// The activation this layer applies, falling back to identity.
    pub fn activator(&self) -> ActivationFunction {
        self.activation.unwrap_or_default()
    }

    /// Copy of this layer with the identity fallback made explicit.
    pub(crate) fn resolved(&self) -> Layer {
        Layer::with_activation(self.nodes, self.activator())
    }
}
