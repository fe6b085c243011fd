//! Integration test: the colony over a caller-defined graph.
//!
//! `LatticeGraph` computes its edges on demand and uses its own fee model,
//! so these solves go through the `ChannelGraph`/`PaymentEdge` seam only.

use antpay_core::ChannelGraph;
use antpay_integration_tests::{assert_route_valid, cheapest_fee, LatticeGraph};
use antpay_routing::{ColonyConfig, ColonyOptimizer};

fn config(seed: u64) -> ColonyConfig {
    ColonyConfig {
        num_ants: 30,
        iterations: 40,
        ..ColonyConfig::default()
    }
    .with_seed(seed)
}

#[test]
fn test_lattice_route_is_valid() {
    let grid = LatticeGraph { width: 4 };
    assert_eq!(grid.node_count(), 16);

    let start = LatticeGraph::cell(0, 0);
    let end = LatticeGraph::cell(3, 3);
    let optimizer = ColonyOptimizer::new(&grid, config(11)).unwrap();
    let solution = optimizer.solve(&start, &end, 5).unwrap();

    let route = solution.route().expect("lattice corner should be reachable");
    assert_route_valid(&grid, route, &start, &end, 5);
    // Every monotone corner-to-corner walk takes 2 * (width - 1) hops.
    assert_eq!(route.hop_count(), 6);

    let optimum = cheapest_fee(&grid, &start, &end, 5).unwrap();
    assert!(solution.fee() >= optimum - 1e-9);
}

#[test]
fn test_lattice_bottom_row_liquidity_is_respected() {
    let grid = LatticeGraph { width: 4 };
    let start = LatticeGraph::cell(0, 0);
    let end = LatticeGraph::cell(3, 3);
    let optimizer = ColonyOptimizer::new(&grid, config(12)).unwrap();

    let solution = optimizer.solve(&start, &end, 100).unwrap();
    let route = solution.route().expect("last column stays liquid");
    assert_route_valid(&grid, route, &start, &end, 100);

    // Edges out of the bottom row carry at most 10, so the only bottom-row
    // node on the route is the destination itself.
    let bottom_row: Vec<_> = route
        .path()
        .iter()
        .filter(|n| n.as_str().starts_with("r3"))
        .collect();
    assert_eq!(bottom_row, vec![&end]);
}

#[test]
fn test_lattice_upward_is_unreachable() {
    let grid = LatticeGraph { width: 3 };
    let optimizer = ColonyOptimizer::new(&grid, config(13)).unwrap();

    let solution = optimizer
        .solve(&LatticeGraph::cell(2, 2), &LatticeGraph::cell(0, 0), 1)
        .unwrap();
    assert!(!solution.is_found());
    assert_eq!(solution.iterations_run(), 40);
}
