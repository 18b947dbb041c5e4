//! Small neural-network models over dense matrices.
//!
//! `layered-nn` provides a layered sigmoid network trained by full-batch
//! gradient descent with backpropagation, plus two single-layer models
//! (a perceptron and a linear regression) and the matrix, activation and loss
//! primitives they share.
//!
//! # Panics vs `Result`
//!
//! The crate exposes two layers of API:
//!
//! - Matrix products and elementwise helpers panic on shape mismatch via
//!   `assert!`. They sit on the training hot path; a mismatch there is a
//!   programmer error.
//! - Model entry points ([`LayeredNetwork::fit`], [`LayeredNetwork::predict`],
//!   [`Model::fit`], [`Model::predict`]) validate their inputs and return
//!   [`Result`].
//!
//! Numeric trouble is not an error: a learning rate that makes training
//! diverge yields NaN/Inf weights and history entries.
//!
//! # Data layout
//!
//! - Scalars are `f32`; matrices are row-major.
//! - [`LayeredNetwork`] takes one sample per **column**: `X` is
//!   `n_features × n_samples`, `y` is `n_outputs × n_samples` with 0/1 entries.
//! - [`LinearRegression`] and [`Perceptron`] take one sample per **row**:
//!   `X` is `n × d`, `y` is `n × 1`.
//!
//! # Logging
//!
//! Training emits [`tracing`] events (`debug` on weight initialization, `info`
//! at evaluation checkpoints, `trace` per epoch for the single-layer models).
//! The crate never installs a subscriber.
//!
//! # Quick start
//!
//! ```rust
//! use layered_nn::{data, FitConfig, LayeredNetwork};
//!
//! # fn main() -> layered_nn::Result<()> {
//! let (x, y) = data::make_blobs(40, 2, 0.5, 0)?;
//!
//! // No hidden layers: a single sigmoid neuron.
//! let mut net = LayeredNetwork::default();
//! let report = net.fit(
//!     &x,
//!     &y,
//!     FitConfig {
//!         epochs: 1000,
//!         learning_rate: 0.1,
//!         eval_interval: 100,
//!     },
//! )?;
//!
//! let predicted = net.predict(&x)?;
//! assert_eq!(predicted.shape(), (1, 40));
//! assert!(report.epochs_run <= 1000);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod data;
pub mod error;
pub mod linear;
pub mod loss;
pub(crate) mod matmul;
pub mod matrix;
pub mod metrics;
pub mod model;
pub mod network;
pub mod perceptron;
pub mod train;

#[cfg(feature = "serde")]
mod serde_config;

pub use builder::NetworkBuilder;
pub use error::{Error, Result};
pub use linear::LinearRegression;
pub use loss::Loss;
pub use matrix::{BoolMatrix, Matrix};
pub use model::Model;
pub use network::LayeredNetwork;
pub use perceptron::Perceptron;
pub use train::{FitConfig, FitReport, TrainingHistory};
