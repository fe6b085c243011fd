//! `antpay demo`: Route a payment through a small built-in network.

use antpay_core::{ChannelTable, NodeId};
use antpay_routing::{ColonyConfig, ColonyOptimizer};
use clap::Args;

use super::{print_solution, ColonyOverrides};

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Amount to route (in atomic units).
    #[arg(short, long, default_value_t = 100)]
    pub amount: u64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub colony: ColonyOverrides,
}

/// Five channels: A -> B -> D is cheap, A -> C -> D costs five times more,
/// and B -> C is a low-capacity decoy.
pub fn sample_network() -> anyhow::Result<ChannelTable> {
    let table = ChannelTable::new();
    table.add_channel("A", "B", 1_000, 1.0, 0.001)?;
    table.add_channel("B", "D", 1_000, 1.0, 0.001)?;
    table.add_channel("A", "C", 1_000, 5.0, 0.005)?;
    table.add_channel("C", "D", 1_000, 5.0, 0.005)?;
    table.add_channel("B", "C", 500, 1.0, 0.001)?;
    Ok(table)
}

pub fn run(args: &DemoArgs, config: ColonyConfig) -> anyhow::Result<()> {
    let table = sample_network()?;
    let config = args.colony.apply(config);

    if !args.json {
        println!("Finding path from A to D for amount {}...", args.amount);
        println!();
    }

    let optimizer = ColonyOptimizer::new(&table, config)?;
    let solution = optimizer.solve(&NodeId::from("A"), &NodeId::from("D"), args.amount)?;

    print_solution(&solution, args.amount, args.json)
}
