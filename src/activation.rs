//! Activation functions and the perceptron update rule.
//!
//! The layered network applies `sigmoid` after every weight layer and caches
//! the *post-activation* outputs. Backprop recovers the derivative from those
//! cached outputs (`y * (1 - y)`) instead of keeping the pre-activations
//! around.

use crate::Matrix;

/// Elementwise logistic function `1 / (1 + e^-z)`.
///
/// Very large `|z|` saturates to exactly `0.0` or `1.0`; nothing downstream
/// guards against that.
pub fn sigmoid(z: &Matrix) -> Matrix {
    z.map(sigmoid_scalar)
}

/// Sigmoid derivative expressed through cached outputs: `a ⊙ (1 - a)`.
pub fn sigmoid_grad_from_output(a: &Matrix) -> Matrix {
    a.map(|y| y * (1.0 - y))
}

/// Elementwise `max(0, z)`.
pub fn relu(z: &Matrix) -> Matrix {
    z.map(|x| x.max(0.0))
}

/// Perceptron correction for a bias-augmented sample matrix.
///
/// `x` is `n × d` (one sample per row), `y` is `n × 1` with labels in
/// `{-1, 1}` and `w` is `d × 1`. A sample is misclassified when its score
/// `x_i · w` does not agree in sign with its label (`y_i * (x_i · w) <= 0`).
/// Returns `Σ y_i * x_iᵀ` over those samples, shaped like `w`.
pub fn perceptron_correction(x: &Matrix, y: &Matrix, w: &Matrix) -> Matrix {
    assert_eq!(x.height(), y.height(), "one label per sample row");
    assert_eq!(x.width(), w.height(), "one weight per feature column");

    let scores = x.matmul(w);
    let mut correction = Matrix::zeros(w.height(), 1);
    for i in 0..x.height() {
        let label = y.get(i, 0);
        if label * scores.get(i, 0) <= 0.0 {
            for (j, &xij) in x.row(i).iter().enumerate() {
                let c = correction.get(j, 0);
                correction.set(j, 0, label.mul_add(xij, c));
            }
        }
    }
    correction
}

#[inline]
fn sigmoid_scalar(x: f32) -> f32 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
