//! Integration test: structural properties of routes on random networks.
//!
//! The colony is a heuristic, so these tests only check what must always
//! hold: returned routes are feasible simple paths whose fee is never below
//! the exact optimum, and the best fee never rises between iterations.

use antpay_core::ChannelGraph;
use antpay_integration_tests::{assert_route_valid, cheapest_fee, id, random_network};
use antpay_routing::{ColonyConfig, ColonyOptimizer};

fn config(seed: u64) -> ColonyConfig {
    ColonyConfig {
        num_ants: 15,
        iterations: 20,
        ..ColonyConfig::default()
    }
    .with_seed(seed)
}

#[test]
fn test_routes_on_random_networks_are_feasible() {
    let mut found = 0;
    let mut reachable = 0;

    for seed in 0..25u64 {
        let table = random_network(seed, 7, 0.35);
        let start = id("n0");
        let end = id("n6");
        let amount = 400;

        let exact = cheapest_fee(&table, &start, &end, amount);
        let optimizer = ColonyOptimizer::new(&table, config(seed)).unwrap();
        let solution = optimizer.solve(&start, &end, amount).unwrap();

        if exact.is_some() {
            reachable += 1;
        }

        match (solution.route(), exact) {
            (Some(route), Some(optimum)) => {
                found += 1;
                assert_route_valid(&table, route, &start, &end, amount);
                assert!(
                    route.total_fee() >= optimum - 1e-9,
                    "seed {}: colony fee {} beat exhaustive optimum {}",
                    seed,
                    route.total_fee(),
                    optimum
                );
            }
            (Some(route), None) => {
                panic!("seed {}: colony returned {} but no feasible route exists", seed, route)
            }
            (None, _) => assert!(solution.fee().is_infinite()),
        }
    }

    assert!(reachable > 0, "fixture produced no reachable pairs");
    assert!(found > 0, "colony never found a route on {} reachable networks", reachable);
}

#[test]
fn test_route_length_bounded_by_node_count() {
    for seed in 100..110u64 {
        let table = random_network(seed, 9, 0.5);
        let optimizer = ColonyOptimizer::new(&table, config(seed)).unwrap();
        let solution = optimizer.solve(&id("n0"), &id("n8"), 100).unwrap();

        if let Some(route) = solution.route() {
            assert!(route.path().len() <= table.node_count());
            assert!(route.is_simple());
        }
    }
}

#[test]
fn test_history_non_increasing_on_random_networks() {
    for seed in 200..210u64 {
        let table = random_network(seed, 8, 0.4);
        let optimizer = ColonyOptimizer::new(&table, config(seed)).unwrap();
        let solution = optimizer.solve(&id("n1"), &id("n5"), 250).unwrap();

        assert_eq!(solution.iterations_run(), 20);
        for pair in solution.history().windows(2) {
            assert!(pair[1] <= pair[0], "seed {}: best fee rose {:?}", seed, pair);
        }
        assert_eq!(solution.history().last().copied(), Some(solution.fee()));
    }
}

#[test]
fn test_parallel_workers_keep_routes_feasible() {
    let table = random_network(7, 10, 0.4);
    let config = ColonyConfig {
        workers: 3,
        ..config(7)
    };
    let optimizer = ColonyOptimizer::new(&table, config).unwrap();

    for (from, to) in [("n0", "n9"), ("n3", "n1"), ("n5", "n2")] {
        let solution = optimizer.solve(&id(from), &id(to), 150).unwrap();
        if let Some(route) = solution.route() {
            assert_route_valid(&table, route, &id(from), &id(to), 150);
        }
    }
}
