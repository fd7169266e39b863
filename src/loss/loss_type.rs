use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::loss::{bce::BceLoss, huber::HuberLoss, mae::MaeLoss, mse::MseLoss};

/// Selects the loss a network is trained against.
///
/// - `Mse`                — Mean-squared error; pair with Identity or Sigmoid output.
/// - `Mae`                — Mean absolute error; pair with Identity output.
/// - `Huber`              — Huber loss (δ=1.0); pair with Identity output.
/// - `BinaryCrossEntropy` — Binary cross-entropy; pair with Sigmoid output.
///
/// Every `derivative` is the exact gradient of the matching `loss` with
/// respect to the prediction vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mse,
    Mae,
    Huber,
    BinaryCrossEntropy,
}

const NAMES: [(LossType, &str); 4] = [
    (LossType::Mse, "mse"),
    (LossType::Mae, "mae"),
    (LossType::Huber, "huber"),
    (LossType::BinaryCrossEntropy, "binary_cross_entropy"),
];

impl LossType {
    /// Scalar loss for one sample.
    pub fn loss(&self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            LossType::Mse                => MseLoss::loss(predicted, expected),
            LossType::Mae                => MaeLoss::loss(predicted, expected),
            LossType::Huber              => HuberLoss::loss(predicted, expected),
            LossType::BinaryCrossEntropy => BceLoss::loss(predicted, expected),
        }
    }

    /// Per-output gradient for one sample.
    pub fn derivative(&self, predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        match self {
            LossType::Mse                => MseLoss::derivative(predicted, expected),
            LossType::Mae                => MaeLoss::derivative(predicted, expected),
            LossType::Huber              => HuberLoss::derivative(predicted, expected),
            LossType::BinaryCrossEntropy => BceLoss::derivative(predicted, expected),
        }
    }

    pub fn name(&self) -> &'static str {
        NAMES.iter()
            .find(|(l, _)| l == self)
            .map(|(_, name)| *name)
            .unwrap_or("mse")
    }

    pub fn from_name(name: &str) -> Result<LossType> {
        NAMES.iter()
            .find(|(_, n)| *n == name)
            .map(|(l, _)| *l)
            .ok_or_else(|| NetworkError::UnknownLoss(name.to_string()))
    }
}
