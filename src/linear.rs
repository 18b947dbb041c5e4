//! Linear regression trained by gradient descent.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::train::check_learning_rate;
use crate::{Error, Loss, Matrix, Model, Result};

/// Initial weights are drawn from `[-INIT_RANGE, INIT_RANGE]`.
const INIT_RANGE: f32 = 2.0;

/// `y_pred = [X | 1] · w` with one weight per feature plus a trailing bias.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    loss: Loss,
    seed: u64,
    weights: Option<Matrix>,
    errors: Vec<f32>,
}

impl LinearRegression {
    pub fn new(loss: Loss) -> Self {
        Self {
            loss,
            ..Self::default()
        }
    }

    /// Seed for the initial weights.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn loss(&self) -> Loss {
        self.loss
    }

    /// `(d + 1) × 1`, bias last. `None` before the first fit.
    #[inline]
    pub fn weights(&self) -> Option<&Matrix> {
        self.weights.as_ref()
    }
}

impl Model for LinearRegression {
    type Prediction = Matrix;

    fn fit(&mut self, x: &Matrix, y: &Matrix, epochs: usize, learning_rate: f32) -> Result<()> {
        if epochs == 0 {
            return Err(Error::InvalidArgument("epochs must be > 0".to_owned()));
        }
        check_learning_rate(learning_rate)?;
        check_rows(x, y)?;

        let xa = with_bias_column(x);
        let mut w = match self.weights.take() {
            Some(w) if w.height() == xa.width() => w,
            Some(w) => {
                let expected = w.height() - 1;
                self.weights = Some(w);
                return Err(Error::InvalidArgument(format!(
                    "samples have {} features but the model was fitted on {expected}",
                    x.width()
                )));
            }
            None => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                debug!(features = x.width(), seed = self.seed, "initialized regression weights");
                Matrix::random_uniform(xa.width(), 1, -INIT_RANGE, INIT_RANGE, &mut rng)
            }
        };

        for epoch in 0..epochs {
            let pred = xa.matmul(&w);
            let loss = self.loss.forward(y, &pred)?;
            let grad = self.loss.weight_grad(&xa, y, &pred)?;
            w.scaled_sub_assign(learning_rate, &grad);
            self.errors.push(loss);
            trace!(epoch, loss, "regression epoch");
        }

        self.weights = Some(w);
        Ok(())
    }

    fn predict(&self, x: &Matrix) -> Result<Matrix> {
        let Some(w) = &self.weights else {
            return Err(Error::IllegalState(
                "the regression must be fitted before predicting".to_owned(),
            ));
        };
        if x.width() + 1 != w.height() {
            return Err(Error::InvalidArgument(format!(
                "samples have {} features but the model expects {}",
                x.width(),
                w.height() - 1
            )));
        }
        Ok(with_bias_column(x).matmul(w))
    }

    fn errors(&self) -> &[f32] {
        &self.errors
    }
}

fn check_rows(x: &Matrix, y: &Matrix) -> Result<()> {
    if x.is_empty() {
        return Err(Error::InvalidArgument(
            "samples matrix must not be empty".to_owned(),
        ));
    }
    if y.width() != 1 || y.height() != x.height() {
        return Err(Error::InvalidArgument(format!(
            "targets must be {}x1 (one per sample row), got {}x{}",
            x.height(),
            y.height(),
            y.width()
        )));
    }
    Ok(())
}

/// `[X | 1]`.
pub(crate) fn with_bias_column(x: &Matrix) -> Matrix {
    x.merge_columns(&Matrix::new(x.height(), 1, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line() -> (Matrix, Matrix) {
        let xs = [-1.0, -0.5, 0.0, 0.5, 1.0];
        let x = Matrix::column(&xs);
        let y = Matrix::column(&xs.map(|v| 2.0 * v + 1.0));
        (x, y)
    }

    #[test]
    fn mse_recovers_slope_and_intercept() {
        let (x, y) = line();
        let mut model = LinearRegression::new(Loss::Mse).with_seed(3);
        model.fit(&x, &y, 2000, 0.1).unwrap();

        let w = model.weights().unwrap();
        assert_abs_diff_eq!(w.get(0, 0), 2.0, epsilon = 1e-2);
        assert_abs_diff_eq!(w.get(1, 0), 1.0, epsilon = 1e-2);

        let errors = model.errors();
        assert_eq!(errors.len(), 2000);
        assert!(errors[errors.len() - 1] < errors[0]);
    }

    #[test]
    fn mae_reduces_loss() {
        let (x, y) = line();
        let mut model = LinearRegression::new(Loss::Mae).with_seed(3);
        model.fit(&x, &y, 3000, 0.01).unwrap();

        let errors = model.errors();
        assert!(errors[errors.len() - 1] < 0.1, "final mae {:?}", errors.last());
    }

    #[test]
    fn predict_shape_and_values() {
        let (x, y) = line();
        let mut model = LinearRegression::default();
        model.fit(&x, &y, 2000, 0.1).unwrap();

        let pred = model.predict(&Matrix::column(&[3.0])).unwrap();
        assert_eq!(pred.shape(), (1, 1));
        assert_abs_diff_eq!(pred.get(0, 0), 7.0, epsilon = 5e-2);
    }

    #[test]
    fn untrained_and_mismatched_calls_fail() {
        let (x, y) = line();
        let mut model = LinearRegression::default();
        assert!(matches!(model.predict(&x), Err(Error::IllegalState(_))));
        assert!(matches!(model.fit(&x, &y, 0, 0.1), Err(Error::InvalidArgument(_))));
        assert!(model.fit(&x, &y, 10, f32::NAN).is_err());

        model.fit(&x, &y, 10, 0.1).unwrap();
        let two_features = x.merge_columns(&x);
        assert!(matches!(
            model.fit(&two_features, &y, 10, 0.1),
            Err(Error::InvalidArgument(_))
        ));
        // The failed call keeps the fitted weights.
        assert!(model.predict(&x).is_ok());
    }
}
