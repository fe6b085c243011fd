use std::collections::HashSet;

use antpay_core::{ChannelGraph, NodeId, PaymentEdge};
use rand::Rng;

use crate::pheromone::PheromoneStore;

/// Added to every fee before inversion so free channels stay finite.
pub const HEURISTIC_EPSILON: f64 = 1e-9;

/// A feasible next hop together with its selection weight.
#[derive(Debug, Clone)]
pub struct Candidate<E> {
    /// The edge that would be traversed.
    pub edge: E,
    /// Fee of the edge at the payment amount.
    pub fee: f64,
    /// Natural log of the unnormalized desirability
    /// `level^alpha * (1 / (fee + eps))^beta`. `-inf` for a zero trail when
    /// `alpha > 0`.
    pub log_weight: f64,
}

/// Chooses the next hop for an ant.
///
/// Holds read-only borrows of the topology and the pheromone snapshot for the
/// current iteration, so any number of ants can share one selector.
///
/// Weights are combined in log space and rescaled against the largest one
/// before sampling, so extreme `alpha`/`beta` or free channels never
/// overflow into an infinite or NaN total.
pub struct EdgeSelector<'a, G: ChannelGraph> {
    graph: &'a G,
    pheromones: &'a PheromoneStore,
    amount: u64,
    alpha: f64,
    beta: f64,
}

impl<'a, G: ChannelGraph> EdgeSelector<'a, G> {
    pub fn new(
        graph: &'a G,
        pheromones: &'a PheromoneStore,
        amount: u64,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            graph,
            pheromones,
            amount,
            alpha,
            beta,
        }
    }

    /// Feasible outgoing edges of `current` with their weights, in the
    /// graph's edge order.
    ///
    /// An edge is feasible when its destination is unvisited and its capacity
    /// covers the amount.
    pub fn candidates(&self, current: &NodeId, visited: &HashSet<NodeId>) -> Vec<Candidate<G::Edge>> {
        self.graph
            .outgoing(current)
            .into_iter()
            .filter(|edge| !visited.contains(edge.destination()) && edge.can_carry(self.amount))
            .map(|edge| {
                let fee = edge.fee_for(self.amount);
                let level = self.pheromones.level(edge.source(), edge.destination());
                Candidate {
                    log_weight: self.log_weight(level, fee),
                    edge,
                    fee,
                }
            })
            .collect()
    }

    /// Sample one feasible edge out of `current`.
    ///
    /// Returns `None` when the ant is stuck: no feasible edge, or every
    /// feasible edge has zero weight.
    pub fn select<R: Rng>(
        &self,
        rng: &mut R,
        current: &NodeId,
        visited: &HashSet<NodeId>,
    ) -> Option<Candidate<G::Edge>> {
        let mut candidates = self.candidates(current, visited);
        let log_weights: Vec<f64> = candidates.iter().map(|c| c.log_weight).collect();
        let weights = relative_weights(&log_weights);
        let r: f64 = rng.gen();
        let index = roulette(&weights, r)?;
        Some(candidates.swap_remove(index))
    }

    /// `alpha * ln(level) - beta * ln(fee + eps)`. A zero exponent drops its
    /// factor entirely, so `0^0` counts as 1.
    fn log_weight(&self, level: f64, fee: f64) -> f64 {
        let trail = if self.alpha == 0.0 {
            0.0
        } else {
            self.alpha * level.ln()
        };
        let heuristic = if self.beta == 0.0 {
            0.0
        } else {
            -self.beta * (fee + HEURISTIC_EPSILON).ln()
        };
        trail + heuristic
    }
}

/// Turn log weights into finite weights relative to the largest one.
///
/// The largest weight maps to 1.0 and the rest to `exp(lw - max)`, so the
/// sum lies in `[1, len]`. Every entry is 0.0 when all log weights are
/// `-inf` (all trails zero); NaN entries count as 0.0.
pub fn relative_weights(log_weights: &[f64]) -> Vec<f64> {
    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return vec![0.0; log_weights.len()];
    }
    log_weights
        .iter()
        .map(|&lw| {
            if lw == max {
                1.0
            } else {
                let w = (lw - max).exp();
                if w.is_nan() {
                    0.0
                } else {
                    w
                }
            }
        })
        .collect()
}

/// Roulette-wheel draw over unnormalized `weights` with `r` in [0, 1).
///
/// Returns the first index whose cumulative probability reaches `r`, falling
/// back to the last index when rounding leaves the sum short of `r`. Returns
/// `None` when the weights do not sum to a positive finite value.
pub fn roulette(weights: &[f64], r: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight / total;
        if r <= cumulative {
            return Some(index);
        }
    }
    Some(weights.len() - 1)
}
