//! Property tests for the deadlock detector over seeded random graphs

use std::collections::HashSet;

use deadlock_lens::detector::{DeadlockDetector, Detection};
use deadlock_lens::error::ParseErrorKind;
use deadlock_lens::graph::{WaitForGraph, WaitForGraphBuilder};
use petgraph::algo::toposort;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SEEDS: u64 = 64;

/// Random DAG: edges only run from a lower rank to a higher rank, and names
/// are shuffled so rank order differs from name order
fn random_dag(rng: &mut StdRng) -> Vec<(String, String)> {
    let n = rng.random_range(1..=40);
    let mut names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
    names.shuffle(rng);

    let mut relations = Vec::new();
    for from in 0..n {
        for to in (from + 1)..n {
            if rng.random_bool(0.15) {
                relations.push((names[from].clone(), names[to].clone()));
            }
        }
    }
    relations.shuffle(rng);
    relations
}

fn build(relations: &[(String, String)]) -> WaitForGraph {
    let text: String = relations
        .iter()
        .map(|(waiter, holder)| format!("{waiter} -> {holder}\n"))
        .collect();
    WaitForGraphBuilder::new().parse_str(&text).unwrap().build()
}

fn assert_valid_cycle(graph: &WaitForGraph, detection: &Detection) {
    let cycle = detection.cycle().expect("graph has a cycle");
    assert!(!cycle.is_empty());

    let distinct: HashSet<_> = cycle.nodes().iter().collect();
    assert_eq!(distinct.len(), cycle.len(), "cycle repeats a process");

    for edge in cycle.edges() {
        assert!(
            graph.has_edge(edge.waiter(), edge.holder()),
            "ring edge {} -> {} is not in the graph",
            edge.waiter(),
            edge.holder()
        );
    }
}

#[test]
fn acyclic_graphs_have_no_deadlock() {
    let detector = DeadlockDetector::new();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = build(&random_dag(&mut rng));

        assert!(toposort(graph.graph(), None).is_ok());
        assert_eq!(detector.detect(&graph), Detection::NoDeadlock, "seed {seed}");
    }
}

#[test]
fn planted_rings_are_found() {
    let detector = DeadlockDetector::new();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut relations = random_dag(&mut rng);
        let feeder = relations.first().map(|(waiter, _)| waiter.clone());

        // Close a ring through fresh processes hanging off the DAG
        let ring_len = rng.random_range(1..=6);
        let ring: Vec<String> = (0..ring_len).map(|i| format!("R{i}")).collect();
        for i in 0..ring_len {
            relations.push((ring[i].clone(), ring[(i + 1) % ring_len].clone()));
        }
        if let Some(waiter) = feeder {
            relations.push((waiter, ring[0].clone()));
        }
        relations.shuffle(&mut rng);

        let graph = build(&relations);
        assert!(toposort(graph.graph(), None).is_err());

        let detection = detector.detect(&graph);
        assert_valid_cycle(&graph, &detection);

        // The planted ring is the only cycle
        let cycle = detection.cycle().unwrap();
        let found: HashSet<&str> = cycle.nodes().iter().map(String::as_str).collect();
        let planted: HashSet<&str> = ring.iter().map(String::as_str).collect();
        assert_eq!(found, planted, "seed {seed}");
    }
}

#[test]
fn detection_agrees_with_toposort_on_random_digraphs() {
    let detector = DeadlockDetector::new();

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.random_range(1..=25);
        let density = rng.random_range(0.02..0.2);

        let mut relations = Vec::new();
        for from in 0..n {
            for to in 0..n {
                if rng.random_bool(density) {
                    relations.push((format!("N{from}"), format!("N{to}")));
                }
            }
        }

        let graph = build(&relations);
        let detection = detector.detect(&graph);

        assert_eq!(
            detection.is_deadlock(),
            toposort(graph.graph(), None).is_err(),
            "seed {seed}"
        );
        if detection.is_deadlock() {
            assert_valid_cycle(&graph, &detection);
        }

        // Same graph, same answer
        assert_eq!(detector.detect(&graph), detection, "seed {seed}");
    }
}

#[test]
fn rebuilding_from_the_same_text_reports_the_same_cycle() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut relations = random_dag(&mut rng);
    relations.push(("T0".to_string(), "T0".to_string()));

    let first = DeadlockDetector::new().detect(&build(&relations));
    let second = DeadlockDetector::new().detect(&build(&relations));
    assert_eq!(first, second);
}

#[test]
fn documented_examples() {
    let detect = |text: &str| deadlock_lens::detect_deadlock(text).unwrap();

    // Zero relations
    assert_eq!(detect(""), Detection::NoDeadlock);

    // Self-wait
    let detection = detect("P1 -> P1");
    assert_eq!(
        serde_json::to_value(&detection).unwrap(),
        serde_json::json!({"deadlock": true, "cycle": ["P1"]})
    );

    // Chain
    assert_eq!(
        serde_json::to_value(detect("A -> B\nB -> C")).unwrap(),
        serde_json::json!({"deadlock": false})
    );

    // Three-way deadlock with a bystander
    let detection = detect("P1 -> P2\nP2 -> P3\nP3 -> P1\nP4 -> P1");
    assert_eq!(detection.cycle().unwrap().nodes(), ["P1", "P2", "P3"]);

    // Too many tokens
    let err = deadlock_lens::detect_deadlock("P1 P2 P3").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::WhitespaceInIdentifier);
    assert_eq!(err.line_number, 1);

    // Duplicate relation
    let graph = WaitForGraphBuilder::new()
        .parse_str("A -> B\nA -> B")
        .unwrap()
        .build();
    assert_eq!(graph.successors("A"), vec!["B"]);
    assert_eq!(graph.edge_count(), 1);
}
