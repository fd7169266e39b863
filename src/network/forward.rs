use crate::math::matrix::Matrix;

/// Everything one forward pass computed, owned by the caller.
///
/// `activations[0]` is the input column, `activations[i + 1]` the output of
/// transition `i`. `pre_activations[i]` is the weighted sum `W_i · a_i + b_i`
/// that produced `activations[i + 1]`; backpropagation evaluates activation
/// derivatives there.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub activations: Vec<Matrix>,
    pub pre_activations: Vec<Matrix>,
}

impl ForwardPass {
    /// The output layer's activations as a flat vector.
    pub fn output(&self) -> Vec<f64> {
        self.activations.last().map(Matrix::flatten).unwrap_or_default()
    }
}
