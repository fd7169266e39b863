use serde::{Serialize, Deserialize};
use std::f64::consts::{E, PI};

use crate::error::{NetworkError, Result};

const LEAKY_RELU_ALPHA: f64 = 0.01;
const ELU_ALPHA: f64 = 1.0;

/// Element-wise activation applied to a layer's weighted sum.
///
/// Every variant is identified by its [`name`](ActivationFunction::name) alone,
/// which is what a saved network stores. Parameterized functions therefore use
/// fixed constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Identity,
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU,
    Tanh,
    Elu,
    Gelu,
    Swish,
}

const NAMES: [(ActivationFunction, &str); 8] = [
    (ActivationFunction::Identity, "identity"),
    (ActivationFunction::Sigmoid, "sigmoid"),
    (ActivationFunction::ReLU, "relu"),
    (ActivationFunction::LeakyReLU, "leaky_relu"),
    (ActivationFunction::Tanh, "tanh"),
    (ActivationFunction::Elu, "elu"),
    (ActivationFunction::Gelu, "gelu"),
    (ActivationFunction::Swish, "swish"),
];

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU => if x > 0.0 { x } else { LEAKY_RELU_ALPHA * x },
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Elu => {
                if x > 0.0 { x } else { ELU_ALPHA * (E.powf(x) - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x * sigmoid(x),
        }
    }

    /// Derivative evaluated at the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = sigmoid(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU => if x > 0.0 { 1.0 } else { LEAKY_RELU_ALPHA },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Elu => {
                if x > 0.0 { 1.0 } else { ELU_ALPHA * E.powf(x) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                let inner = c * (x + 0.044715 * x.powi(3));
                let tanh_inner = inner.tanh();
                let sech2 = 1.0 - tanh_inner * tanh_inner;
                let d_inner = c * (1.0 + 3.0 * 0.044715 * x.powi(2));
                0.5 * tanh_inner + 0.5 * x * sech2 * d_inner + 0.5
            }
            ActivationFunction::Swish => {
                let sig = sigmoid(x);
                sig + x * sig * (1.0 - sig)
            }
        }
    }

    /// Stable name written into saved networks.
    pub fn name(&self) -> &'static str {
        NAMES.iter()
            .find(|(f, _)| f == self)
            .map(|(_, name)| *name)
            .unwrap_or("identity")
    }

    pub fn from_name(name: &str) -> Result<ActivationFunction> {
        NAMES.iter()
            .find(|(_, n)| *n == name)
            .map(|(f, _)| *f)
            .ok_or_else(|| NetworkError::UnknownActivation(name.to_string()))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}
