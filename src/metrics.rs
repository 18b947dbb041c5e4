//! Metrics.
//!
//! Metrics are evaluation helpers; they never take part in backprop.

use crate::{BoolMatrix, Error, Result};

/// Fraction of samples whose predicted class indicators all match the truth.
///
/// Both masks are `n_outputs × n_samples` (one sample per column). With a
/// single output this is plain binary accuracy.
pub fn accuracy(predicted: &BoolMatrix, truth: &BoolMatrix) -> Result<f32> {
    if predicted.shape() != truth.shape() {
        return Err(Error::InvalidArgument(format!(
            "prediction shape {:?} does not match label shape {:?}",
            predicted.shape(),
            truth.shape()
        )));
    }
    if predicted.width() == 0 {
        return Err(Error::InvalidArgument(
            "accuracy needs at least one sample".to_owned(),
        ));
    }

    let hits = predicted.eq_mask(truth);
    let correct = (0..hits.width()).filter(|&c| hits.all_in_column(c)).count();
    Ok(correct as f32 / hits.width() as f32)
}

/// Fraction of set entries in a misclassification mask.
pub fn error_rate(wrong: &BoolMatrix) -> f32 {
    let total = wrong.height() * wrong.width();
    if total == 0 {
        return 0.0;
    }
    wrong.count_true() as f32 / total as f32
}
