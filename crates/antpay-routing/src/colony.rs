use std::sync::Arc;

use antpay_core::{ChannelGraph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ant::{Ant, AntOutcome};
use crate::config::ColonyConfig;
use crate::error::RoutingError;
use crate::observer::{IterationProgress, ProgressObserver, TracingObserver};
use crate::pheromone::PheromoneStore;
use crate::route::Route;
use crate::selector::EdgeSelector;

/// Fees below this floor are raised to it before computing `q / fee`, so a
/// free route deposits a large but finite amount.
pub const MIN_DEPOSIT_FEE: f64 = 1e-9;

/// Pheromone deposited on each edge of a route with total fee `fee`.
pub fn deposit_for(q: f64, fee: f64) -> f64 {
    q / fee.max(MIN_DEPOSIT_FEE)
}

/// Result of a solve: the cheapest route seen, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    route: Option<Route>,
    fee: f64,
    history: Vec<f64>,
}

impl Solution {
    fn trivial(node: NodeId) -> Self {
        Self {
            route: Some(Route::new(vec![node], 0.0)),
            fee: 0.0,
            history: Vec::new(),
        }
    }

    /// The best route found, or `None` if no ant ever arrived.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Fee of the best route, `+inf` when none was found.
    pub fn fee(&self) -> f64 {
        self.fee
    }

    pub fn is_found(&self) -> bool {
        self.route.is_some()
    }

    /// Best fee after each iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn iterations_run(&self) -> usize {
        self.history.len()
    }

    /// `(path, fee)`; the path is `None` and the fee `+inf` when no route
    /// was found.
    pub fn into_parts(self) -> (Option<Vec<NodeId>>, f64) {
        (self.route.map(Route::into_path), self.fee)
    }
}

/// Ant Colony Optimization router over a [`ChannelGraph`].
///
/// Each solve owns a fresh [`PheromoneStore`]. Within an iteration every ant
/// reads the same pheromone snapshot; evaporation and deposits happen only
/// after all ants of the iteration have returned. Each ant draws from its own
/// `StdRng`, seeded from the solve's master generator in ant order, so a
/// fixed `seed` reproduces the same result for any worker count.
pub struct ColonyOptimizer<'g, G: ChannelGraph> {
    graph: &'g G,
    config: ColonyConfig,
    observers: Vec<Arc<dyn ProgressObserver + 'g>>,
}

impl<'g, G> ColonyOptimizer<'g, G>
where
    G: ChannelGraph + Sync,
{
    /// Create an optimizer, rejecting invalid parameters before any work.
    ///
    /// Progress is logged through [`TracingObserver`] by default.
    pub fn new(graph: &'g G, config: ColonyConfig) -> Result<Self, RoutingError> {
        config.validate()?;
        let logger: Arc<dyn ProgressObserver + 'g> = Arc::new(TracingObserver);
        Ok(Self {
            graph,
            config,
            observers: vec![logger],
        })
    }

    /// Register an additional progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver + 'g>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Drop all observers, including the default tracing one.
    pub fn without_observers(mut self) -> Self {
        self.observers.clear();
        self
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Find a low-fee route from `start` to `end` able to carry `amount`.
    ///
    /// Runs the full iteration budget. When `start == end` the one-node route
    /// with zero fee is returned at once without running any iteration.
    pub fn solve(&self, start: &NodeId, end: &NodeId, amount: u64) -> Result<Solution, RoutingError> {
        let config = &self.config;
        let span = tracing::info_span!("colony_solve", %start, %end, amount);
        let _guard = span.enter();

        if start == end {
            tracing::debug!("start equals destination, returning trivial route");
            return Ok(Solution::trivial(start.clone()));
        }

        let nodes = self.graph.nodes();
        let max_len = nodes.len();
        if !nodes.contains(start) {
            tracing::warn!("start node is not in the topology");
        }
        if !nodes.contains(end) {
            tracing::warn!("destination node is not in the topology");
        }

        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut pheromones = PheromoneStore::from_graph(self.graph);
        let mut best: Option<Route> = None;
        let mut best_fee = f64::INFINITY;
        let mut history = Vec::with_capacity(config.iterations);

        tracing::info!(
            nodes = max_len,
            ants = config.num_ants,
            iterations = config.iterations,
            workers = config.workers,
            "starting colony solve"
        );

        for iteration in 0..config.iterations {
            let seeds: Vec<u64> = (0..config.num_ants).map(|_| master.gen()).collect();

            let outcomes = {
                let selector =
                    EdgeSelector::new(self.graph, &pheromones, amount, config.alpha, config.beta);
                self.run_ants(&selector, &seeds, max_len, start, end, iteration)?
            };

            let mut arrivals = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                match outcome {
                    AntOutcome::Arrived(route) => arrivals.push(route),
                    AntOutcome::Stuck { at, hops } => {
                        tracing::trace!(iteration, %at, hops, "ant stuck");
                    }
                    AntOutcome::HopLimit { at } => {
                        tracing::trace!(iteration, %at, "ant hit path length limit");
                    }
                }
            }

            let mut improved = false;
            for route in &arrivals {
                if route.total_fee() < best_fee {
                    best_fee = route.total_fee();
                    best = Some(route.clone());
                    improved = true;
                }
            }

            pheromones.evaporate(config.evaporation_rate);
            for route in &arrivals {
                pheromones.deposit_path(route.path(), deposit_for(config.q, route.total_fee()));
            }

            history.push(best_fee);
            let progress = IterationProgress {
                iteration,
                total_iterations: config.iterations,
                best_fee,
                arrivals: arrivals.len(),
                improved,
            };
            for observer in &self.observers {
                observer.on_iteration(&progress);
            }
        }

        match &best {
            Some(route) => tracing::info!(route = %route, "colony solve finished"),
            None => tracing::info!("colony solve finished without a route"),
        }

        Ok(Solution {
            route: best,
            fee: best_fee,
            history,
        })
    }

    /// Walk one ant per seed against the current snapshot, returning the
    /// outcomes in seed order.
    fn run_ants(
        &self,
        selector: &EdgeSelector<'_, G>,
        seeds: &[u64],
        max_len: usize,
        start: &NodeId,
        end: &NodeId,
        iteration: usize,
    ) -> Result<Vec<AntOutcome>, RoutingError> {
        let ant = Ant::new(selector, max_len);
        let workers = self.config.workers.min(seeds.len()).max(1);

        if workers == 1 {
            return Ok(seeds
                .iter()
                .map(|&seed| ant.walk(&mut StdRng::seed_from_u64(seed), start, end))
                .collect());
        }

        let batch_size = seeds.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let ant = &ant;
            let handles: Vec<_> = seeds
                .chunks(batch_size)
                .map(|batch| {
                    scope.spawn(move || {
                        batch
                            .iter()
                            .map(|&seed| ant.walk(&mut StdRng::seed_from_u64(seed), start, end))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let joined: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
            let mut outcomes = Vec::with_capacity(seeds.len());
            for batch in joined {
                outcomes.extend(batch.map_err(|_| RoutingError::WorkerPanicked { iteration })?);
            }
            Ok(outcomes)
        })
    }
}
