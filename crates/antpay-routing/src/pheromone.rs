use std::collections::HashMap;

use antpay_core::{ChannelGraph, NodeId, PaymentEdge};

/// Trail strength of an edge that has never been written.
pub const DEFAULT_TRAIL: f64 = 1.0;

/// Pheromone trail levels on directed edges, owned by a single solve.
///
/// Levels are keyed by source, then destination, so reads borrow the node
/// ids instead of building a key. Levels are never negative. Reads of an
/// unknown edge return [`DEFAULT_TRAIL`] without inserting it.
#[derive(Debug, Clone, Default)]
pub struct PheromoneStore {
    trails: HashMap<NodeId, HashMap<NodeId, f64>>,
}

impl PheromoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every edge of `graph` at [`DEFAULT_TRAIL`].
    pub fn from_graph<G: ChannelGraph>(graph: &G) -> Self {
        let mut trails: HashMap<NodeId, HashMap<NodeId, f64>> = HashMap::new();
        for node in graph.nodes() {
            for edge in graph.outgoing(&node) {
                trails
                    .entry(edge.source().clone())
                    .or_default()
                    .insert(edge.destination().clone(), DEFAULT_TRAIL);
            }
        }
        let store = Self { trails };
        tracing::trace!(edges = store.len(), "pheromone store initialized");
        store
    }

    /// Current level of the edge `source -> destination`.
    pub fn level(&self, source: &NodeId, destination: &NodeId) -> f64 {
        self.trails
            .get(source)
            .and_then(|out| out.get(destination))
            .copied()
            .unwrap_or(DEFAULT_TRAIL)
    }

    /// Multiply every stored level by `1 - rate`.
    ///
    /// `rate` is clamped to [0, 1]; a NaN rate leaves the store untouched.
    pub fn evaporate(&mut self, rate: f64) {
        if rate.is_nan() {
            return;
        }
        let keep = 1.0 - rate.clamp(0.0, 1.0);
        for level in self.trails.values_mut().flat_map(|out| out.values_mut()) {
            *level *= keep;
        }
    }

    /// Add `amount` to the edge `source -> destination`, creating it at
    /// `amount` if absent. Negative and non-finite amounts are ignored.
    pub fn deposit(&mut self, source: &NodeId, destination: &NodeId, amount: f64) {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(%source, %destination, amount, "ignoring invalid pheromone deposit");
            return;
        }
        if let Some(level) = self
            .trails
            .get_mut(source)
            .and_then(|out| out.get_mut(destination))
        {
            *level += amount;
            return;
        }
        self.trails
            .entry(source.clone())
            .or_default()
            .insert(destination.clone(), amount);
    }

    /// Deposit `amount` on every consecutive edge of `path`.
    pub fn deposit_path(&mut self, path: &[NodeId], amount: f64) {
        for hop in path.windows(2) {
            self.deposit(&hop[0], &hop[1], amount);
        }
    }

    /// Number of edges with a stored level.
    pub fn len(&self) -> usize {
        self.trails.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no level has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over stored `((source, destination), level)` pairs in
    /// arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((&NodeId, &NodeId), f64)> {
        self.trails.iter().flat_map(|(source, out)| {
            out.iter()
                .map(move |(destination, level)| ((source, destination), *level))
        })
    }
}
