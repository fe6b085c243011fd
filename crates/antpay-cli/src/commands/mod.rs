pub mod demo;
pub mod init;
pub mod route;

use antpay_routing::{ColonyConfig, Solution};
use clap::Args;
use serde::Serialize;

/// Command-line overrides for colony parameters from the config file.
#[derive(Args, Debug, Default)]
pub struct ColonyOverrides {
    /// Ants launched per iteration.
    #[arg(long)]
    pub ants: Option<usize>,

    /// Number of iterations.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Pheromone exponent.
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Inverse-fee exponent.
    #[arg(long)]
    pub beta: Option<f64>,

    /// Fraction of pheromone evaporated per iteration, in [0, 1].
    #[arg(long)]
    pub evaporation: Option<f64>,

    /// Deposit constant Q.
    #[arg(long)]
    pub q: Option<f64>,

    /// Random seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads per iteration.
    #[arg(long)]
    pub workers: Option<usize>,
}

impl ColonyOverrides {
    /// Apply the overrides that were given on top of `config`.
    pub fn apply(&self, mut config: ColonyConfig) -> ColonyConfig {
        if let Some(ants) = self.ants {
            config.num_ants = ants;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(evaporation) = self.evaporation {
            config.evaporation_rate = evaporation;
        }
        if let Some(q) = self.q {
            config.q = q;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        config
    }
}

#[derive(Serialize)]
struct RouteReport<'a> {
    found: bool,
    path: Vec<&'a str>,
    fee: Option<f64>,
    hops: usize,
    iterations: usize,
}

/// Print a solution either as text or as a JSON object.
pub fn print_solution(solution: &Solution, amount: u64, json: bool) -> anyhow::Result<()> {
    if json {
        let report = RouteReport {
            found: solution.is_found(),
            path: solution
                .route()
                .map(|r| r.path().iter().map(|n| n.as_str()).collect())
                .unwrap_or_default(),
            fee: solution.route().map(|r| r.total_fee()),
            hops: solution.route().map_or(0, |r| r.hop_count()),
            iterations: solution.iterations_run(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match solution.route() {
        Some(route) => {
            let path: Vec<&str> = route.path().iter().map(|n| n.as_str()).collect();
            println!("Route found for {} units:", amount);
            println!("  Path:     {}", path.join(" -> "));
            println!("  Hops:     {}", route.hop_count());
            println!("  Fee:      {:.4}", route.total_fee());
        }
        None => {
            println!("No route found for {} units.", amount);
            println!("  Every ant was stuck or ran out of hops in {} iterations.", solution.iterations_run());
        }
    }
    Ok(())
}
