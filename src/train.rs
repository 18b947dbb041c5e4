//! Training configuration, history and reports for the layered network.

use crate::{Error, Result};

/// Knobs for [`crate::LayeredNetwork::fit`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Number of full-batch epochs to run (unless accuracy reaches 100%).
    pub epochs: usize,
    /// Gradient descent step size.
    pub learning_rate: f32,
    /// Evaluate every `eval_interval` epochs; `0` disables evaluation and
    /// therefore early stopping.
    pub eval_interval: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            learning_rate: 0.01,
            eval_interval: 100,
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidArgument("epochs must be > 0".to_owned()));
        }
        check_learning_rate(self.learning_rate)
    }
}

/// Rejects NaN, infinite and non-positive step sizes.
///
/// A finite but too-large rate is accepted: divergence is not detected.
pub(crate) fn check_learning_rate(lr: f32) -> Result<()> {
    if !(lr.is_finite() && lr > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "learning rate must be finite and > 0, got {lr}"
        )));
    }
    Ok(())
}

/// Error values (`1 - accuracy`) recorded at evaluation checkpoints.
///
/// Append-only: entries accumulate across `fit` calls until the network is
/// reset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    errors: Vec<f32>,
}

impl TrainingHistory {
    #[inline]
    pub(crate) fn push(&mut self, error: f32) {
        self.errors.push(error);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }

    #[inline]
    pub fn errors(&self) -> &[f32] {
        &self.errors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<f32> {
        self.errors.last().copied()
    }
}

/// Summary of a single `fit` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Epochs actually executed (fewer than configured after an early stop).
    pub epochs_run: usize,
    /// True when an evaluation checkpoint reached 100% accuracy.
    pub stopped_early: bool,
    /// Error recorded at the last checkpoint of this call, if any.
    pub final_error: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FitConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_epochs_and_bad_rates_are_rejected() {
        let cfg = FitConfig {
            epochs: 0,
            ..FitConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidArgument(_))));

        for lr in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let cfg = FitConfig {
                learning_rate: lr,
                ..FitConfig::default()
            };
            assert!(cfg.validate().is_err(), "lr {lr} should be rejected");
        }
    }
}
