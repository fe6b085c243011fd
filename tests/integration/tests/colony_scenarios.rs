//! Integration test: end-to-end colony solves on the five-channel network.
//!
//! Covers convergence to the cheap route, unreachable destinations,
//! insufficient liquidity at the source, and the start == end convention.

use std::sync::Arc;

use antpay_core::ChannelGraph;
use antpay_integration_tests::{assert_route_valid, id, sample_network};
use antpay_routing::{
    Ant, AntOutcome, ColonyConfig, ColonyOptimizer, EdgeSelector, PheromoneStore, RecordingObserver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reference_config(seed: u64) -> ColonyConfig {
    ColonyConfig {
        num_ants: 20,
        iterations: 30,
        alpha: 1.0,
        beta: 2.0,
        evaporation_rate: 0.5,
        q: 100.0,
        seed: Some(seed),
        workers: 1,
    }
}

// =========================================================================
// Convergence
// =========================================================================

#[test]
fn test_converges_to_cheapest_route() {
    let table = sample_network();

    for seed in 0..10 {
        let optimizer = ColonyOptimizer::new(&table, reference_config(seed)).unwrap();
        let solution = optimizer.solve(&id("A"), &id("D"), 100).unwrap();

        let route = solution.route().expect("a route should be found");
        assert_eq!(
            route.path(),
            &[id("A"), id("B"), id("D")],
            "seed {} picked {}",
            seed,
            route
        );
        assert!((solution.fee() - 2.2).abs() < 1e-9, "fee was {}", solution.fee());
        assert!(solution.fee() < 11.0, "must beat A -> C -> D");
        assert_route_valid(&table, route, &id("A"), &id("D"), 100);
    }
}

#[test]
fn test_decoy_edge_excluded_above_its_capacity() {
    let table = sample_network();
    let optimizer = ColonyOptimizer::new(&table, reference_config(4)).unwrap();

    // 600 exceeds B -> C's capacity; only A-B-D and A-C-D remain.
    let solution = optimizer.solve(&id("A"), &id("D"), 600).unwrap();
    let route = solution.route().unwrap();
    assert_route_valid(&table, route, &id("A"), &id("D"), 600);
    assert_eq!(route.path(), &[id("A"), id("B"), id("D")]);
    // 2 * (1 + 0.6)
    assert!((solution.fee() - 3.2).abs() < 1e-9);
}

#[test]
fn test_best_fee_never_increases() {
    let table = sample_network();
    let recorder = Arc::new(RecordingObserver::new());
    let optimizer = ColonyOptimizer::new(&table, reference_config(17))
        .unwrap()
        .with_observer(recorder.clone());

    optimizer.solve(&id("A"), &id("D"), 100).unwrap();

    let reports = recorder.reports();
    assert_eq!(reports.len(), 30);
    for pair in reports.windows(2) {
        assert!(
            pair[1].best_fee <= pair[0].best_fee,
            "iteration {} raised best fee {} -> {}",
            pair[1].iteration,
            pair[0].best_fee,
            pair[1].best_fee
        );
    }
}

// =========================================================================
// No-route outcomes
// =========================================================================

#[test]
fn test_unreachable_destination() {
    let table = sample_network();
    table.remove(&id("B"), &id("D")).unwrap();
    table.remove(&id("C"), &id("D")).unwrap();
    assert_eq!(table.node_count(), 4, "D is still a known node");

    let recorder = Arc::new(RecordingObserver::new());
    let optimizer = ColonyOptimizer::new(&table, reference_config(1))
        .unwrap()
        .with_observer(recorder.clone());
    let solution = optimizer.solve(&id("A"), &id("D"), 100).unwrap();

    assert!(solution.route().is_none());
    assert!(solution.fee().is_infinite() && solution.fee() > 0.0);
    assert_eq!(solution.iterations_run(), 30, "full budget must run");
    assert_eq!(recorder.reports().len(), 30);
}

#[test]
fn test_insufficient_capacity_at_source() {
    let table = sample_network();
    let recorder = Arc::new(RecordingObserver::new());
    let optimizer = ColonyOptimizer::new(&table, reference_config(2))
        .unwrap()
        .with_observer(recorder.clone());

    let solution = optimizer.solve(&id("A"), &id("D"), 1_500).unwrap();

    assert!(solution.route().is_none());
    assert!(solution.fee().is_infinite());
    assert_eq!(solution.iterations_run(), 30);
    assert!(recorder.reports().iter().all(|p| p.arrivals == 0));

    // Every ant stops on its first step: no channel out of A carries 1500.
    let pheromones = PheromoneStore::from_graph(&table);
    let selector = EdgeSelector::new(&table, &pheromones, 1_500, 1.0, 2.0);
    let ant = Ant::new(&selector, table.node_count());
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        assert_eq!(
            ant.walk(&mut rng, &id("A"), &id("D")),
            AntOutcome::Stuck { at: id("A"), hops: 0 }
        );
    }
}

#[test]
fn test_unknown_nodes_yield_no_route() {
    let table = sample_network();
    let optimizer = ColonyOptimizer::new(&table, reference_config(3)).unwrap();

    let solution = optimizer.solve(&id("Q"), &id("D"), 100).unwrap();
    assert!(!solution.is_found());

    let solution = optimizer.solve(&id("A"), &id("Z"), 100).unwrap();
    assert!(!solution.is_found());
}

// =========================================================================
// Conventions
// =========================================================================

#[test]
fn test_start_equals_end_is_trivial_success() {
    let table = sample_network();
    let optimizer = ColonyOptimizer::new(&table, reference_config(5)).unwrap();

    let solution = optimizer.solve(&id("C"), &id("C"), 100).unwrap();
    let route = solution.route().unwrap();
    assert_eq!(route.path(), &[id("C")]);
    assert_eq!(route.hop_count(), 0);
    assert_eq!(solution.fee(), 0.0);
}

#[test]
fn test_invalid_parameters_fail_before_solving() {
    let table = sample_network();
    let bad = [
        ColonyConfig { alpha: -1.0, ..reference_config(0) },
        ColonyConfig { beta: -0.1, ..reference_config(0) },
        ColonyConfig { evaporation_rate: 1.5, ..reference_config(0) },
        ColonyConfig { num_ants: 0, ..reference_config(0) },
        ColonyConfig { iterations: 0, ..reference_config(0) },
    ];
    for config in bad {
        assert!(
            ColonyOptimizer::new(&table, config.clone()).is_err(),
            "config should be rejected: {:?}",
            config
        );
    }
}

#[test]
fn test_free_channels_use_floored_deposit() {
    let table = antpay_core::ChannelTable::new();
    table.add_channel("A", "B", 1_000, 0.0, 0.0).unwrap();
    table.add_channel("B", "D", 1_000, 0.0, 0.0).unwrap();
    table.add_channel("A", "D", 1_000, 3.0, 0.0).unwrap();

    let optimizer = ColonyOptimizer::new(&table, reference_config(6)).unwrap();
    let solution = optimizer.solve(&id("A"), &id("D"), 100).unwrap();

    assert_eq!(solution.fee(), 0.0);
    assert_eq!(solution.route().unwrap().path(), &[id("A"), id("B"), id("D")]);
}
