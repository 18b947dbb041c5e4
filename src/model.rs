//! Common interface of the single-layer models.

use crate::{Matrix, Result};

/// A model trained by full-batch gradient steps over row-per-sample data.
///
/// `x` is `n × d` (one sample per row) and `y` is `n × 1`. Weights are created
/// on the first `fit` and reused by later calls.
pub trait Model {
    /// What `predict` returns for `n` samples.
    type Prediction;

    /// Runs `epochs` updates with step size `learning_rate`.
    fn fit(&mut self, x: &Matrix, y: &Matrix, epochs: usize, learning_rate: f32) -> Result<()>;

    /// Returns `IllegalState` until the model has been fitted.
    fn predict(&self, x: &Matrix) -> Result<Self::Prediction>;

    /// One entry per epoch run so far, across all `fit` calls.
    fn errors(&self) -> &[f32];
}
