use std::collections::HashSet;

use antpay_core::{ChannelGraph, NodeId, PaymentEdge};
use rand::Rng;

use crate::route::Route;
use crate::selector::EdgeSelector;

/// How one ant's walk ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AntOutcome {
    /// Reached the destination.
    Arrived(Route),
    /// No feasible edge left at `at` after `hops` steps.
    Stuck { at: NodeId, hops: usize },
    /// Walked the maximum path length without reaching the destination.
    HopLimit { at: NodeId },
}

impl AntOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            AntOutcome::Arrived(route) => Some(route),
            _ => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            AntOutcome::Arrived(route) => Some(route),
            _ => None,
        }
    }

    /// Fee of the route found, or `+inf` if the ant failed.
    pub fn fee(&self) -> f64 {
        self.route().map_or(f64::INFINITY, Route::total_fee)
    }
}

/// Builds a single path by repeatedly asking the selector for a next hop.
///
/// `max_len` bounds the number of nodes in the path and guarantees
/// termination; the colony sets it to the node count of the topology.
pub struct Ant<'s, 'a, G: ChannelGraph> {
    selector: &'s EdgeSelector<'a, G>,
    max_len: usize,
}

impl<'s, 'a, G: ChannelGraph> Ant<'s, 'a, G> {
    pub fn new(selector: &'s EdgeSelector<'a, G>, max_len: usize) -> Self {
        Self { selector, max_len }
    }

    /// Walk from `start` toward `end`.
    ///
    /// A walk with `start == end` arrives immediately with a one-node path
    /// and zero fee.
    pub fn walk<R: Rng>(&self, rng: &mut R, start: &NodeId, end: &NodeId) -> AntOutcome {
        let mut path = vec![start.clone()];
        let mut visited: HashSet<NodeId> = HashSet::from([start.clone()]);
        let mut current = start.clone();
        let mut total_fee = 0.0;

        while current != *end && path.len() < self.max_len {
            let Some(step) = self.selector.select(rng, &current, &visited) else {
                return AntOutcome::Stuck {
                    at: current,
                    hops: path.len() - 1,
                };
            };

            total_fee += step.fee;
            current = step.edge.destination().clone();
            visited.insert(current.clone());
            path.push(current.clone());
        }

        if current == *end {
            AntOutcome::Arrived(Route::new(path, total_fee))
        } else {
            AntOutcome::HopLimit { at: current }
        }
    }
}
