//! Seeded synthetic datasets.
//!
//! Both generators return the layered-network layout: `X` is
//! `n_features × n_samples` (one sample per column) and `y` is
//! `1 × n_samples`. Use [`Matrix::transpose`] to get the row-per-sample layout
//! the linear models expect.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Matrix, Result};

/// Noisy class bands with integer class labels `0..n_classes`.
///
/// Each sample picks a class `c` and draws every feature uniformly from a
/// jittered band around `c`; even-indexed features are negated. Neighbouring
/// classes overlap, so the result is generally not linearly separable.
pub fn make_classification(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> Result<(Matrix, Matrix)> {
    check_counts(n_samples, n_features)?;
    if n_classes == 0 {
        return Err(Error::InvalidArgument(
            "the number of classes must be greater than 0".to_owned(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Matrix::zeros(n_features, n_samples);
    let mut y = Matrix::zeros(1, n_samples);

    for c in 0..n_samples {
        let class = rng.gen_range(0..n_classes) as f32;
        let lower = rng.gen_range(0..100) as f32 / 100.0 * random_sign(&mut rng);
        let upper = rng.gen_range(0..100) as f32 / 100.0 * random_sign(&mut rng);
        let (lo, hi) = if lower <= upper {
            (class + lower, class + upper)
        } else {
            (class + upper, class + lower)
        };

        for r in 0..n_features {
            let sign = if r % 2 == 1 { 1.0 } else { -1.0 };
            let value = if lo < hi { rng.gen_range(lo..hi) } else { lo };
            x.set(r, c, value * sign);
        }
        y.set(0, c, class);
    }

    Ok((x, y))
}

/// Two linearly separable blobs with 0/1 labels.
///
/// Class 1 is centred on `(1, …, 1)` and class 0 on `(-1, …, -1)`; every
/// feature gets uniform noise in `[-spread, spread]`. For `spread < 1` the
/// hyperplane `Σ x_i = 0` separates the classes.
pub fn make_blobs(
    n_samples: usize,
    n_features: usize,
    spread: f32,
    seed: u64,
) -> Result<(Matrix, Matrix)> {
    check_counts(n_samples, n_features)?;
    if !(spread.is_finite() && spread >= 0.0) {
        return Err(Error::InvalidArgument(format!(
            "spread must be finite and >= 0, got {spread}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Matrix::zeros(n_features, n_samples);
    let mut y = Matrix::zeros(1, n_samples);

    for c in 0..n_samples {
        // Alternate classes so every prefix is balanced.
        let label = (c % 2) as f32;
        let centre = if c % 2 == 1 { 1.0 } else { -1.0 };
        for r in 0..n_features {
            let noise = if spread > 0.0 {
                rng.gen_range(-spread..=spread)
            } else {
                0.0
            };
            x.set(r, c, centre + noise);
        }
        y.set(0, c, label);
    }

    Ok((x, y))
}

fn check_counts(n_samples: usize, n_features: usize) -> Result<()> {
    if n_samples == 0 {
        return Err(Error::InvalidArgument(
            "the number of samples must be greater than 0".to_owned(),
        ));
    }
    if n_features == 0 {
        return Err(Error::InvalidArgument(
            "the number of features must be greater than 0".to_owned(),
        ));
    }
    Ok(())
}

#[inline]
fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}
