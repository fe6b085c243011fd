//! antpay routing: Ant Colony Optimization over a payment-channel graph.
//!
//! This crate provides:
//! - [`ColonyOptimizer`]: runs rounds of ants, tracks the cheapest route,
//!   and evaporates/reinforces pheromone between rounds.
//! - [`PheromoneStore`]: per-solve trail strength on directed edges.
//! - [`EdgeSelector`]: pheromone- and fee-weighted roulette choice of the
//!   next hop under capacity and loop constraints.
//! - [`Ant`]: one stochastic path construction from source to destination.
//! - [`ColonyConfig`]: tunable parameters, validated before any work starts.
//! - [`ProgressObserver`]: per-iteration progress callbacks.

pub mod ant;
pub mod colony;
pub mod config;
pub mod error;
pub mod observer;
pub mod pheromone;
pub mod route;
pub mod selector;

// Re-exports for convenience.
pub use ant::{Ant, AntOutcome};
pub use colony::{ColonyOptimizer, Solution};
pub use config::ColonyConfig;
pub use error::RoutingError;
pub use observer::{IterationProgress, ProgressObserver, RecordingObserver, TracingObserver};
pub use pheromone::PheromoneStore;
pub use route::Route;
pub use selector::{relative_weights, roulette, Candidate, EdgeSelector};
