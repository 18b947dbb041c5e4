//! Loss functions for single-output regression.
//!
//! Every function here expects column vectors: `y_true` and `y_pred` are
//! `n × 1` with matching `n`. The gradients are taken with respect to the
//! weights of a linear model `y_pred = X · w`, so they also need the sample
//! matrix `X` (`n × d`, one sample per row).

use crate::{Error, Matrix, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Supported loss functions.
pub enum Loss {
    /// Mean squared error.
    #[default]
    Mse,
    /// Mean absolute error.
    Mae,
}

impl Loss {
    /// Compute the loss value.
    #[inline]
    pub fn forward(self, y_true: &Matrix, y_pred: &Matrix) -> Result<f32> {
        match self {
            Loss::Mse => mse(y_true, y_pred),
            Loss::Mae => mae(y_true, y_pred),
        }
    }

    /// Compute the weight gradient for `y_pred = X · w`.
    #[inline]
    pub fn weight_grad(self, x: &Matrix, y_true: &Matrix, y_pred: &Matrix) -> Result<Matrix> {
        match self {
            Loss::Mse => mse_grad(x, y_true, y_pred),
            Loss::Mae => mae_grad(x, y_true, y_pred),
        }
    }
}

/// Mean squared error: `mean((y_pred - y_true)^2)`.
pub fn mse(y_true: &Matrix, y_pred: &Matrix) -> Result<f32> {
    check_labels(y_true, y_pred)?;
    let n = y_true.height();
    if n == 0 {
        return Ok(0.0);
    }

    let mut sum_sq = 0.0_f32;
    for (&t, &p) in y_true.as_slice().iter().zip(y_pred.as_slice()) {
        let diff = p - t;
        sum_sq = diff.mul_add(diff, sum_sq);
    }
    Ok(sum_sq / n as f32)
}

/// Mean absolute error: `mean(|y_pred - y_true|)`.
pub fn mae(y_true: &Matrix, y_pred: &Matrix) -> Result<f32> {
    check_labels(y_true, y_pred)?;
    let n = y_true.height();
    if n == 0 {
        return Ok(0.0);
    }

    let sum: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice())
        .map(|(&t, &p)| (p - t).abs())
        .sum();
    Ok(sum / n as f32)
}

/// MSE gradient w.r.t. `w`: `(2 / n) * Xᵀ (y_pred - y_true)`.
pub fn mse_grad(x: &Matrix, y_true: &Matrix, y_pred: &Matrix) -> Result<Matrix> {
    check_labels(y_true, y_pred)?;
    check_samples(x, y_pred)?;
    let n = y_true.height().max(1) as f32;

    let residual = y_pred - y_true;
    Ok(x.transpose_matmul(&residual).scale(2.0 / n))
}

/// MAE (sub)gradient w.r.t. `w`: `(1 / n) * Xᵀ sign(y_pred - y_true)`.
///
/// The subgradient is `0` where `y_pred == y_true`.
pub fn mae_grad(x: &Matrix, y_true: &Matrix, y_pred: &Matrix) -> Result<Matrix> {
    check_labels(y_true, y_pred)?;
    check_samples(x, y_pred)?;
    let n = y_true.height().max(1) as f32;

    let signs = y_pred.zip_map(y_true, |p, t| {
        let diff = p - t;
        if diff > 0.0 {
            1.0
        } else if diff < 0.0 {
            -1.0
        } else {
            0.0
        }
    });
    Ok(x.transpose_matmul(&signs).scale(1.0 / n))
}

fn check_labels(y_true: &Matrix, y_pred: &Matrix) -> Result<()> {
    if y_true.width() != 1 {
        return Err(Error::InvalidArgument(format!(
            "y_true must be a single column, got {}x{}",
            y_true.height(),
            y_true.width()
        )));
    }
    if y_pred.width() != 1 {
        return Err(Error::InvalidArgument(format!(
            "y_pred must be a single column, got {}x{}",
            y_pred.height(),
            y_pred.width()
        )));
    }
    if y_true.height() != y_pred.height() {
        return Err(Error::InvalidArgument(format!(
            "y_true has {} rows but y_pred has {}",
            y_true.height(),
            y_pred.height()
        )));
    }
    Ok(())
}

fn check_samples(x: &Matrix, y_pred: &Matrix) -> Result<()> {
    if x.height() != y_pred.height() {
        return Err(Error::InvalidArgument(format!(
            "sample matrix has {} rows but y_pred has {}",
            x.height(),
            y_pred.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn col(v: &[f32]) -> Matrix {
        Matrix::column(v)
    }

    #[test]
    fn mse_matches_known_values() {
        let zeros = col(&[0.0; 5]);
        let ramp = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(mse(&zeros, &ramp).unwrap(), 11.0);
        assert_eq!(mse(&ramp, &ramp).unwrap(), 0.0);

        let t = col(&[1.0, 2.2, 1.3]);
        let p = col(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(mse(&t, &p).unwrap(), 0.976_666_7, epsilon = 1e-5);
    }

    #[test]
    fn mae_matches_known_values() {
        let zeros = col(&[0.0; 5]);
        let ramp = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(mae(&zeros, &ramp).unwrap(), 3.0);
        assert_eq!(mae(&ramp, &ramp).unwrap(), 0.0);

        let t = col(&[1.0, 2.2, 1.3]);
        let p = col(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(mae(&t, &p).unwrap(), 0.633_333_3, epsilon = 1e-5);
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let five = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let four = col(&[1.0, 2.0, 3.0, 4.0]);
        for (t, p) in [(&five, &four), (&four, &five)] {
            assert!(matches!(mse(t, p), Err(Error::InvalidArgument(_))));
            assert!(matches!(mae(t, p), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn multi_column_labels_are_rejected() {
        let wide = Matrix::zeros(3, 2);
        let narrow = col(&[0.0; 3]);
        assert!(mse(&wide, &narrow).is_err());
        assert!(mae(&narrow, &wide).is_err());
    }

    #[test]
    fn mse_grad_matches_closed_form() {
        // X = [[1, 1], [2, 1]], residual = [1, -1] -> Xᵀ r = [-1, 0]; * 2/2.
        let x = Matrix::from_rows(&[vec![1.0, 1.0], vec![2.0, 1.0]]).unwrap();
        let t = col(&[0.0, 2.0]);
        let p = col(&[1.0, 1.0]);
        let g = mse_grad(&x, &t, &p).unwrap();
        assert_eq!(g.as_slice(), &[-1.0, 0.0]);

        let g = Loss::Mae.weight_grad(&x, &t, &p).unwrap();
        assert_eq!(g.as_slice(), &[-0.5, 0.0]);
    }

    #[test]
    fn grad_rejects_sample_mismatch() {
        let x = Matrix::zeros(3, 2);
        let t = col(&[0.0, 1.0]);
        assert!(matches!(
            mse_grad(&x, &t, &t),
            Err(Error::InvalidArgument(_))
        ));
    }
}
