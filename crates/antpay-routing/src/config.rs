use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Parameters of one colony run.
///
/// Every field has a default, so a partial TOML `[colony]` table is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyConfig {
    /// Ants launched per iteration.
    #[serde(default = "default_num_ants")]
    pub num_ants: usize,
    /// Number of iterations; the only termination bound.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Exponent applied to pheromone level (trail exploitation).
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Exponent applied to the inverse-fee heuristic (fee exploitation).
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Fraction of every trail removed per iteration, in [0, 1].
    #[serde(default = "default_evaporation_rate")]
    pub evaporation_rate: f64,
    /// Deposit constant: a route with fee `f` deposits `q / f` per edge.
    #[serde(default = "default_q")]
    pub q: f64,
    /// Seed for the solve's random streams. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker threads sharing the ants of one iteration.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_num_ants() -> usize {
    20
}
fn default_iterations() -> usize {
    50
}
fn default_alpha() -> f64 {
    1.0
}
fn default_beta() -> f64 {
    2.0
}
fn default_evaporation_rate() -> f64 {
    0.5
}
fn default_q() -> f64 {
    100.0
}
fn default_workers() -> usize {
    1
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            num_ants: default_num_ants(),
            iterations: default_iterations(),
            alpha: default_alpha(),
            beta: default_beta(),
            evaporation_rate: default_evaporation_rate(),
            q: default_q(),
            seed: None,
            workers: default_workers(),
        }
    }
}

impl ColonyConfig {
    /// Same configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter. Called before a solve does any work.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(RoutingError::invalid(
                "alpha",
                format!("must be finite and >= 0, got {}", self.alpha),
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(RoutingError::invalid(
                "beta",
                format!("must be finite and >= 0, got {}", self.beta),
            ));
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(RoutingError::invalid(
                "evaporation_rate",
                format!("must be in [0, 1], got {}", self.evaporation_rate),
            ));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(RoutingError::invalid(
                "q",
                format!("must be finite and > 0, got {}", self.q),
            ));
        }
        if self.num_ants == 0 {
            return Err(RoutingError::invalid("num_ants", "must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(RoutingError::invalid("iterations", "must be at least 1"));
        }
        if self.workers == 0 {
            return Err(RoutingError::invalid("workers", "must be at least 1"));
        }
        Ok(())
    }
}
