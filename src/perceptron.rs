//! Rosenblatt perceptron.
//!
//! Labels are `-1` / `+1`. Every epoch adds `lr * Σ y_i x_i` over the
//! misclassified samples (see [`perceptron_correction`]), so on linearly
//! separable data the misclassification rate eventually reaches 0 and the
//! weights stop moving.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::activation::perceptron_correction;
use crate::linear::with_bias_column;
use crate::metrics::error_rate;
use crate::train::check_learning_rate;
use crate::{BoolMatrix, Error, Matrix, Model, Result};

const INIT_RANGE: f32 = 2.0;

#[derive(Debug, Clone, Default)]
pub struct Perceptron {
    seed: u64,
    weights: Option<Matrix>,
    errors: Vec<f32>,
}

impl Perceptron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// `(d + 1) × 1`, bias last.
    #[inline]
    pub fn weights(&self) -> Option<&Matrix> {
        self.weights.as_ref()
    }
}

impl Model for Perceptron {
    type Prediction = BoolMatrix;

    fn fit(&mut self, x: &Matrix, y: &Matrix, epochs: usize, learning_rate: f32) -> Result<()> {
        if epochs == 0 {
            return Err(Error::InvalidArgument("epochs must be > 0".to_owned()));
        }
        check_learning_rate(learning_rate)?;
        if x.is_empty() {
            return Err(Error::InvalidArgument(
                "samples matrix must not be empty".to_owned(),
            ));
        }
        if y.width() != 1 || y.height() != x.height() {
            return Err(Error::InvalidArgument(format!(
                "labels must be {}x1, got {}x{}",
                x.height(),
                y.height(),
                y.width()
            )));
        }
        if let Some((r, _)) = y.find(|v| v != 1.0 && v != -1.0) {
            return Err(Error::InvalidArgument(format!(
                "perceptron labels must be -1 or 1, got {} at row {r}",
                y.get(r, 0)
            )));
        }

        let xa = with_bias_column(x);
        if let Some(w) = &self.weights {
            if w.height() != xa.width() {
                return Err(Error::InvalidArgument(format!(
                    "samples have {} features but the model was fitted on {}",
                    x.width(),
                    w.height() - 1
                )));
            }
        }
        let mut w = match self.weights.take() {
            Some(w) => w,
            None => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                debug!(features = x.width(), seed = self.seed, "initialized perceptron weights");
                Matrix::random_uniform(xa.width(), 1, -INIT_RANGE, INIT_RANGE, &mut rng)
            }
        };

        for epoch in 0..epochs {
            let margins = xa.matmul(&w).hadamard(y);
            let rate = error_rate(&margins.le(0.0));
            self.errors.push(rate);
            trace!(epoch, error_rate = rate, "perceptron epoch");

            let correction = perceptron_correction(&xa, y, &w);
            w = &w + &(&correction * learning_rate);
        }

        self.weights = Some(w);
        Ok(())
    }

    /// `x · w > 0` per sample row.
    ///
    /// `x` may be raw (`n × d`) or already carry the bias column (`n × (d+1)`).
    fn predict(&self, x: &Matrix) -> Result<BoolMatrix> {
        let Some(w) = &self.weights else {
            return Err(Error::IllegalState(
                "the perceptron must be fitted before predicting".to_owned(),
            ));
        };

        let scores = if x.width() == w.height() {
            x.matmul(w)
        } else if x.width() + 1 == w.height() {
            with_bias_column(x).matmul(w)
        } else {
            return Err(Error::InvalidArgument(format!(
                "samples have {} columns; expected {} (raw) or {} (with bias)",
                x.width(),
                w.height() - 1,
                w.height()
            )));
        };
        Ok(scores.gt(0.0))
    }

    fn errors(&self) -> &[f32] {
        &self.errors
    }
}
