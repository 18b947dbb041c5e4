use thiserror::Error;

/// Errors raised by argument validation and model state checks.
///
/// Numeric trouble (divergence, NaN propagation, saturated sigmoids) is never
/// reported through this type: it flows silently into weights and history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed shapes, non-positive counts, labels outside the supported set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The model was asked to do something it has no weights for yet.
    #[error("illegal state: {0}")]
    IllegalState(String),
    /// A configuration document could not be parsed or is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
