pub struct HuberLoss;

// δ is fixed so the loss is identified by its name alone.
const DELTA: f64 = 1.0;

impl HuberLoss {
    /// mean(h(p - y)) with h(x) = 0.5·x² for |x| ≤ δ, δ·(|x| - 0.5·δ) beyond.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| {
                let x = p - y;
                if x.abs() <= DELTA {
                    0.5 * x * x
                } else {
                    DELTA * (x.abs() - 0.5 * DELTA)
                }
            })
            .sum::<f64>() / n
    }

    /// x / n inside the quadratic zone, δ·sign(x) / n outside.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| {
                let x = p - y;
                let g = if x.abs() <= DELTA { x } else { DELTA * x.signum() };
                g / n
            })
            .collect()
    }
}
