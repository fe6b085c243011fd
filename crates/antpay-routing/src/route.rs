use std::collections::HashSet;
use std::fmt;

use antpay_core::NodeId;
use serde::{Deserialize, Serialize};

/// A complete route: the nodes visited from source to destination and the
/// total fee paid at the routed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered nodes, source first.
    path: Vec<NodeId>,
    /// Sum of the per-edge fees along `path`.
    total_fee: f64,
}

impl Route {
    pub fn new(path: Vec<NodeId>, total_fee: f64) -> Self {
        Self { path, total_fee }
    }

    /// The ordered node sequence.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Total fee along the route.
    pub fn total_fee(&self) -> f64 {
        self.total_fee
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&NodeId> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&NodeId> {
        self.path.last()
    }

    /// Consecutive `(from, to)` pairs along the route.
    pub fn hops(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.path.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Returns `true` if no node appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.path.len());
        self.path.iter().all(|node| seen.insert(node))
    }

    pub fn into_path(self) -> Vec<NodeId> {
        self.path
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, " (fee {:.4})", self.total_fee)
    }
}
