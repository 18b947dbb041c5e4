//! The layered sigmoid network.
//!
//! Samples are columns: `X` is `n_features × n_samples` and `y` is
//! `n_outputs × n_samples`. The input gets a constant row of ones appended
//! (the only bias in the network), then every weight layer computes
//! `A_i = sigmoid(W_i · A_{i-1})`.
//!
//! Three index-keyed arenas hold the training state:
//!
//! - `weights[i]`, shape `D[i+1] × D[i]`
//! - `activations[i]` for `i in 0..=L`, index 0 being the bias-augmented input
//! - `gradients[i]`, same shape as `weights[i]`
//!
//! One epoch always runs forward → backward → update. The stages read each
//! other's caches without cross-checks, so the order is what keeps them
//! consistent.
//!
//! Numeric trouble is silent: a learning rate that makes the weights diverge
//! produces NaN/Inf activations and history entries, never an error.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::activation::{sigmoid, sigmoid_grad_from_output};
use crate::metrics;
use crate::train::{FitConfig, FitReport, TrainingHistory};
use crate::{BoolMatrix, Error, Matrix, Result};

/// Decision threshold applied to the output activations.
const THRESHOLD: f32 = 0.5;

/// Initial weights are drawn from `[-INIT_RANGE, INIT_RANGE]`.
const INIT_RANGE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct LayeredNetwork {
    hidden: Vec<usize>,
    topology_valid: bool,
    seed: u64,
    /// Full dimension list `[n_features + 1, hidden.., n_outputs]`; empty
    /// until the weights exist.
    dims: Vec<usize>,
    weights: Vec<Matrix>,
    activations: Vec<Matrix>,
    gradients: Vec<Matrix>,
    history: TrainingHistory,
}

impl Default for LayeredNetwork {
    /// The single-neuron binary classifier: no hidden layers.
    fn default() -> Self {
        Self::with_seed(&[], 0)
    }
}

impl LayeredNetwork {
    /// Creates a network with the given hidden layer widths.
    ///
    /// Never fails. A topology containing a zero width is discarded in favour
    /// of the default (no hidden layers); check [`Self::is_topology_valid`]
    /// to find out.
    pub fn new(hidden: &[usize]) -> Self {
        Self::with_seed(hidden, 0)
    }

    /// Like [`Self::new`], with the seed base used for weight initialization.
    pub fn with_seed(hidden: &[usize], seed: u64) -> Self {
        let topology_valid = hidden.iter().all(|&w| w > 0);
        let hidden = if topology_valid {
            hidden.to_vec()
        } else {
            Vec::new()
        };

        Self {
            hidden,
            topology_valid,
            seed,
            dims: Vec::new(),
            weights: Vec::new(),
            activations: Vec::new(),
            gradients: Vec::new(),
            history: TrainingHistory::default(),
        }
    }

    /// Whether the topology requested at construction was accepted.
    #[inline]
    pub fn is_topology_valid(&self) -> bool {
        self.topology_valid
    }

    #[inline]
    pub fn hidden_layers(&self) -> &[usize] {
        &self.hidden
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `[n_features + 1, hidden.., n_outputs]`, or empty before initialization.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Number of weight layers (`0` before initialization).
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// Activations from the most recent forward pass (fit or predict).
    #[inline]
    pub fn activations(&self) -> &[Matrix] {
        &self.activations
    }

    /// Gradients from the most recent backpropagation pass.
    #[inline]
    pub fn gradients(&self) -> &[Matrix] {
        &self.gradients
    }

    #[inline]
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// Draws fresh weights for `n_features` inputs and `n_outputs` outputs.
    ///
    /// `fit` calls this on its own the first time. Layer `i` (1-based) is
    /// seeded with `seed + i`, so the same topology and seed always produce
    /// the same weights. Any existing weights and caches are replaced; the
    /// history is kept.
    pub fn initialize(&mut self, n_features: usize, n_outputs: usize) -> Result<()> {
        if n_features == 0 {
            return Err(Error::InvalidArgument(
                "the number of features must be greater than 0".to_owned(),
            ));
        }
        if n_outputs == 0 {
            return Err(Error::InvalidArgument(
                "the number of outputs must be greater than 0".to_owned(),
            ));
        }

        let mut dims = Vec::with_capacity(self.hidden.len() + 2);
        dims.push(n_features + 1);
        dims.extend_from_slice(&self.hidden);
        dims.push(n_outputs);
        if !valid_dims(&dims) {
            return Err(Error::InvalidArgument(format!(
                "invalid layer dimensions {dims:?}"
            )));
        }

        self.weights = dims
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(idx as u64 + 1));
                Matrix::random_uniform(pair[1], pair[0], -INIT_RANGE, INIT_RANGE, &mut rng)
            })
            .collect();
        self.gradients = self
            .weights
            .iter()
            .map(|w| Matrix::zeros(w.height(), w.width()))
            .collect();
        self.activations.clear();

        debug!(dims = ?dims, seed = self.seed, "initialized network weights");
        self.dims = dims;
        Ok(())
    }

    /// Drops weights, caches and history. The next `fit` starts from scratch.
    pub fn reset(&mut self) {
        self.dims.clear();
        self.weights.clear();
        self.activations.clear();
        self.gradients.clear();
        self.history.clear();
    }

    /// Trains with full-batch gradient descent.
    ///
    /// `x` is `n_features × n_samples`; `y` is `n_outputs × n_samples` with
    /// 0/1 entries. Weights are created on the first call and reused by later
    /// calls, so fitting twice continues training.
    ///
    /// With `cfg.eval_interval = k > 0`, epochs `0, k, 2k, ..` are followed by
    /// a prediction pass over `x`; `1 - accuracy` is appended to the history
    /// and training stops as soon as accuracy is exactly 1.
    pub fn fit(&mut self, x: &Matrix, y: &Matrix, cfg: FitConfig) -> Result<FitReport> {
        cfg.validate()?;
        check_training_data(x, y)?;

        if !self.is_initialized() {
            self.initialize(x.height(), y.height())?;
        } else {
            self.check_features(x)?;
            let n_outputs = self.dims[self.dims.len() - 1];
            if y.height() != n_outputs {
                return Err(Error::InvalidArgument(format!(
                    "labels have {} rows but the network has {n_outputs} outputs",
                    y.height()
                )));
            }
        }

        let truth = y.nonzero();
        let mut report = FitReport {
            epochs_run: 0,
            stopped_early: false,
            final_error: None,
        };

        for epoch in 0..cfg.epochs {
            self.forward_propagation(x);
            self.back_propagation(y);
            self.gradient_descent(cfg.learning_rate);
            report.epochs_run = epoch + 1;

            if cfg.eval_interval > 0 && epoch % cfg.eval_interval == 0 {
                let predicted = self.run(x)?.gt(THRESHOLD);
                let accuracy = metrics::accuracy(&predicted, &truth)?;
                let error = 1.0 - accuracy;
                self.history.push(error);
                report.final_error = Some(error);
                info!(epoch, accuracy, "evaluation checkpoint");

                if accuracy == 1.0 {
                    info!(epoch, "training accuracy reached 100%, stopping early");
                    report.stopped_early = true;
                    break;
                }
            }
        }

        debug!(
            epochs_run = report.epochs_run,
            stopped_early = report.stopped_early,
            "fit finished"
        );
        Ok(report)
    }

    /// Class indicators (`output > 0.5`), shape `n_outputs × n_samples`.
    ///
    /// Overwrites the activation cache. Returns `IllegalState` if the network
    /// has no weights yet.
    pub fn predict(&mut self, x: &Matrix) -> Result<BoolMatrix> {
        Ok(self.run(x)?.gt(THRESHOLD))
    }

    /// Raw sigmoid outputs, shape `n_outputs × n_samples`.
    pub fn predict_proba(&mut self, x: &Matrix) -> Result<Matrix> {
        Ok(self.run(x)?.clone())
    }

    /// Checked forward pass returning the output activations.
    fn run(&mut self, x: &Matrix) -> Result<&Matrix> {
        if !self.is_initialized() {
            return Err(Error::IllegalState(
                "the network must be fitted or initialized before predicting".to_owned(),
            ));
        }
        self.check_features(x)?;

        self.forward_propagation(x);
        let last = self.activations.len() - 1;
        Ok(&self.activations[last])
    }

    fn check_features(&self, x: &Matrix) -> Result<()> {
        let n_features = self.dims[0] - 1;
        if x.height() != n_features {
            return Err(Error::InvalidArgument(format!(
                "samples have {} features but the network expects {n_features}",
                x.height()
            )));
        }
        Ok(())
    }

    /// Fills the activation cache for `x`.
    fn forward_propagation(&mut self, x: &Matrix) {
        let bias = Matrix::new(1, x.width(), 1.0);
        self.activations.clear();
        self.activations.push(x.merge_rows(&bias));

        for (idx, w) in self.weights.iter().enumerate() {
            let z = w.matmul(&self.activations[idx]);
            self.activations.push(sigmoid(&z));
        }
    }

    /// Fills the gradient cache from the activation cache and labels.
    ///
    /// Output error is `A_L - y` (sigmoid + cross-entropy); hidden errors use
    /// the sigmoid derivative recovered from the cached activations.
    fn back_propagation(&mut self, y: &Matrix) {
        let layers = self.weights.len();
        assert_eq!(
            self.activations.len(),
            layers + 1,
            "forward pass must run before backpropagation"
        );
        let inv_m = 1.0 / y.width() as f32;

        let mut delta = &self.activations[layers] - y;
        for idx in (0..layers).rev() {
            let a_prev = &self.activations[idx];
            self.gradients[idx] = delta.matmul_transpose_rhs(a_prev).scale(inv_m);

            if idx > 0 {
                let upstream = self.weights[idx].transpose_matmul(&delta);
                delta = upstream.hadamard(&sigmoid_grad_from_output(a_prev));
            }
        }
    }

    /// `W_i -= lr * dW_i` for every layer.
    fn gradient_descent(&mut self, learning_rate: f32) {
        for (w, g) in self.weights.iter_mut().zip(&self.gradients) {
            w.scaled_sub_assign(learning_rate, g);
        }
    }
}

fn valid_dims(dims: &[usize]) -> bool {
    dims.len() >= 2 && dims.iter().all(|&d| d > 0)
}

fn check_training_data(x: &Matrix, y: &Matrix) -> Result<()> {
    if x.width() == 0 || x.height() == 0 {
        return Err(Error::InvalidArgument(
            "samples matrix must not be empty".to_owned(),
        ));
    }
    if y.height() == 0 {
        return Err(Error::InvalidArgument(
            "labels matrix must have at least one row".to_owned(),
        ));
    }
    if x.width() != y.width() {
        return Err(Error::InvalidArgument(format!(
            "samples have {} columns but labels have {}",
            x.width(),
            y.width()
        )));
    }
    if let Some((r, c)) = y.find(|v| v != 0.0 && v != 1.0) {
        return Err(Error::InvalidArgument(format!(
            "label at ({r}, {c}) is {}; only 0/1 indicators are supported \
             (multi-class labels are not)",
            y.get(r, c)
        )));
    }
    Ok(())
}
