use std::fmt;

/// All errors that can occur while building, training or persisting a network.
#[derive(Debug)]
pub enum NetworkError {
    /// Fewer than three layers (input, hidden, output) were supplied.
    TooFewLayers { got: usize },
    /// A layer was declared with zero nodes.
    EmptyLayer { index: usize },
    /// `predict`/`forward` got an input of the wrong length.
    InputShape { expected: usize, got: usize },
    /// A training sample does not fit the input layer.
    SampleInputShape { sample: usize, expected: usize, got: usize },
    /// A training sample does not fit the output layer.
    SampleTargetShape { sample: usize, expected: usize, got: usize },
    /// A single sample handed to backpropagation has the wrong target length.
    TargetShape { expected: usize, got: usize },
    /// Parallel input and target lists differ in length.
    PairCount { inputs: usize, targets: usize },
    /// A gradient matrix does not match the parameter it updates.
    GradientShape { index: usize, expected: (usize, usize), got: (usize, usize) },
    /// A saved record names an activation this build does not know.
    UnknownActivation(String),
    /// A saved record names a loss this build does not know.
    UnknownLoss(String),
    /// A decoded record is internally inconsistent.
    Corrupt(String),
    Io(std::io::Error),
    Encoding(bincode::Error),
    Json(serde_json::Error),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewLayers { got } => {
                write!(f, "a network needs at least 3 layers, got {got}")
            }
            Self::EmptyLayer { index } => write!(f, "layer {index} has no nodes"),
            Self::InputShape { expected, got } => {
                write!(f, "input layer expects {expected} values, got {got}")
            }
            Self::SampleInputShape { sample, expected, got } => {
                write!(f, "sample {sample}: input layer expects {expected} values, got {got}")
            }
            Self::SampleTargetShape { sample, expected, got } => {
                write!(f, "sample {sample}: output layer expects {expected} targets, got {got}")
            }
            Self::TargetShape { expected, got } => {
                write!(f, "output layer expects {expected} targets, got {got}")
            }
            Self::PairCount { inputs, targets } => {
                write!(f, "{inputs} inputs but {targets} targets")
            }
            Self::GradientShape { index, expected, got } => {
                write!(f, "gradient {index} has shape {got:?}, parameter has {expected:?}")
            }
            Self::UnknownActivation(name) => write!(f, "unknown activation function: {name:?}"),
            Self::UnknownLoss(name) => write!(f, "unknown loss function: {name:?}"),
            Self::Corrupt(msg) => write!(f, "corrupt network record: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Encoding(e) => write!(f, "encoding error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bincode::Error> for NetworkError {
    fn from(e: bincode::Error) -> Self {
        Self::Encoding(e)
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
