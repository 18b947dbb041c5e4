//! Network builder.
//!
//! `NetworkBuilder` collects hidden layer widths one at a time and hands them
//! to [`LayeredNetwork::with_seed`]. Input and output widths are not part of
//! the topology: they come from the data on the first `fit` (or from an
//! explicit [`LayeredNetwork::initialize`]).

use crate::LayeredNetwork;

#[derive(Debug, Clone, Default)]
/// Builder for a `LayeredNetwork`.
///
/// Example:
///
/// ```rust
/// use layered_nn::NetworkBuilder;
///
/// let net = NetworkBuilder::new()
///     .hidden_layer(8)
///     .hidden_layer(4)
///     .seed(7)
///     .build();
/// assert_eq!(net.hidden_layers(), &[8, 4]);
/// assert!(net.is_topology_valid());
/// ```
pub struct NetworkBuilder {
    hidden: Vec<usize>,
    seed: u64,
}

impl NetworkBuilder {
    /// Starts with no hidden layers and seed `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hidden layer with `width` sigmoid units.
    pub fn hidden_layer(mut self, width: usize) -> Self {
        self.hidden.push(width);
        self
    }

    /// Appends several hidden layers, in order.
    pub fn hidden_layers(mut self, widths: &[usize]) -> Self {
        self.hidden.extend_from_slice(widths);
        self
    }

    /// Seed base for weight initialization; layer `i` uses `seed + i`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the network.
    ///
    /// Like [`LayeredNetwork::new`] this never fails: a zero width falls back
    /// to the default topology and is reported by `is_topology_valid()`.
    pub fn build(self) -> LayeredNetwork {
        LayeredNetwork::with_seed(&self.hidden, self.seed)
    }
}
