//! `antpay route`: Find a route through a network snapshot file.

use antpay_core::{NetworkSnapshot, NodeId};
use antpay_routing::{ColonyConfig, ColonyOptimizer};
use clap::Args;
use std::path::PathBuf;

use super::{print_solution, ColonyOverrides};

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Network snapshot (.json or .toml).
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Paying node.
    #[arg(short, long)]
    pub from: String,

    /// Receiving node.
    #[arg(short, long)]
    pub to: String,

    /// Amount to route (in atomic units).
    #[arg(short, long)]
    pub amount: u64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub colony: ColonyOverrides,
}

pub fn run(args: &RouteArgs, config: ColonyConfig) -> anyhow::Result<()> {
    let snapshot = NetworkSnapshot::load(&args.graph)?;
    tracing::info!(
        path = %args.graph.display(),
        channels = snapshot.channels.len(),
        "loaded network snapshot"
    );
    let table = snapshot.into_table()?;

    let config = args.colony.apply(config);
    let optimizer = ColonyOptimizer::new(&table, config)?;
    let solution = optimizer.solve(
        &NodeId::from(args.from.as_str()),
        &NodeId::from(args.to.as_str()),
        args.amount,
    )?;

    print_solution(&solution, args.amount, args.json)
}
