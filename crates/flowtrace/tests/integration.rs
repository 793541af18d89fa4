//! End-to-end tests for the FlowTrace engine.
//!
//! These exercise the full pipeline on the canonical laundering
//! scenarios and verify the cross-stage invariants the engine promises.

use flowtrace::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn txn(id: &str, sender: &str, receiver: &str, amount: f64, timestamp: i64) -> TransactionRecord {
    TransactionRecord {
        transaction_id: id.to_string(),
        sender_id: sender.to_string(),
        receiver_id: receiver.to_string(),
        amount,
        timestamp,
    }
}

fn random_batch(seed: u64, len: usize) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|i| {
            let sender_idx = rng.gen_range(0..40);
            let receiver_idx = (sender_idx + rng.gen_range(1..40)) % 40;
            let sender = format!("ACC_{sender_idx:03}");
            let receiver = format!("ACC_{receiver_idx:03}");
            txn(
                &format!("T{i:05}"),
                &sender,
                &receiver,
                rng.gen_range(10.0..10_000.0),
                rng.gen_range(0..30 * DAY_MS),
            )
        })
        .collect()
}

// ============================================================================
// Scenario tests
// ============================================================================

#[test]
fn scenario_three_account_loop() {
    let batch = vec![
        txn("T1", "A", "B", 1000.0, 0),
        txn("T2", "B", "C", 1000.0, HOUR_MS),
        txn("T3", "C", "A", 1000.0, 2 * HOUR_MS),
    ];
    let run = DetectionPipeline::new().run(&batch);

    assert_eq!(run.suspicious.len(), 3);
    for account in &run.suspicious {
        assert!(account.detected_patterns.contains("cycle_length_3"));
        assert!((account.suspicion_score - 100.0).abs() < 1e-9);
    }

    assert_eq!(run.fraud_rings.len(), 1);
    let ring = &run.fraud_rings[0];
    assert_eq!(ring.member_accounts, vec!["A", "B", "C"]);
    assert_eq!(ring.pattern_type, "cycle_length_3");
}

#[test]
fn scenario_fan_in_hub_without_ring() {
    // H receives $100 from 10 distinct accounts within a 2-hour span.
    let batch: Vec<TransactionRecord> = (0..10)
        .map(|i| txn(&format!("T{i}"), &format!("S{i}"), "H", 100.0, i * 12 * 60 * 1000))
        .collect();
    let run = DetectionPipeline::new().run(&batch);

    let hub = run
        .suspicious
        .iter()
        .find(|s| s.account_id == "H")
        .expect("hub should be flagged");
    assert!(hub.detected_patterns.contains("fan_in"));

    // No suspicious neighbor, so the singleton group is discarded.
    assert!(run.fraud_rings.is_empty());
    assert_eq!(hub.ring_id, None);
}

#[test]
fn scenario_shell_chain() {
    // Low-activity accounts chained over 3 hops.
    let batch = vec![
        txn("T1", "A", "B", 500.0, 0),
        txn("T2", "B", "C", 490.0, HOUR_MS),
        txn("T3", "C", "D", 480.0, 2 * HOUR_MS),
    ];
    let run = DetectionPipeline::new().run(&batch);

    for account in ["A", "B", "C", "D"] {
        let flagged = run
            .suspicious
            .iter()
            .find(|s| s.account_id == account)
            .unwrap_or_else(|| panic!("{account} should be flagged"));
        assert!(flagged.detected_patterns.contains("shell_network"));
    }
}

#[test]
fn scenario_empty_batch() {
    let run = DetectionPipeline::new().run(&[]);
    assert_eq!(run.graph.num_nodes(), 0);
    assert_eq!(run.graph.num_edges(), 0);
    assert!(run.suspicious.is_empty());
    assert!(run.fraud_rings.is_empty());
}

#[test]
fn scenario_velocity_burst_vs_spread() {
    let mut batch: Vec<TransactionRecord> = (0..5)
        .map(|i| txn(&format!("TB{i}"), "BURST", &format!("R{i}"), 10.0, i * 2 * 60 * 1000))
        .collect();
    batch.extend(
        (0..5).map(|i| txn(&format!("TS{i}"), "SLOW", &format!("Q{i}"), 10.0, i * DAY_MS)),
    );
    let run = DetectionPipeline::new().run(&batch);

    let burst = run.suspicious.iter().find(|s| s.account_id == "BURST");
    assert!(
        burst.is_some_and(|s| s.detected_patterns.contains("high_velocity")),
        "burst account should be tagged"
    );
    assert!(
        !run.suspicious.iter().any(|s| s.account_id == "SLOW"),
        "spread-out account should not be tagged"
    );
}

// ============================================================================
// Cross-stage invariants
// ============================================================================

#[test]
fn invariant_every_account_is_one_node_and_flow_conserves() {
    let batch = random_batch(7, 500);
    let run = DetectionPipeline::new().run(&batch);

    for record in &batch {
        assert!(run.graph.node(&record.sender_id).is_some());
        assert!(run.graph.node(&record.receiver_id).is_some());
    }

    for (id, node) in &run.graph.nodes {
        let touching: f64 = run
            .graph
            .edges
            .iter()
            .filter(|e| &e.source == id || &e.target == id)
            .map(|e| e.amount)
            .sum();
        assert!(
            (node.total_sent + node.total_received - touching).abs() < 1e-6,
            "flow mismatch on {id}"
        );
        assert_eq!(node.txn_count, node.out_edges.len() + node.in_edges.len());
    }
}

#[test]
fn invariant_pipeline_is_idempotent() {
    let batch = random_batch(42, 800);
    let pipeline = DetectionPipeline::new();

    let first = pipeline.run(&batch);
    let second = pipeline.run(&batch);

    assert_eq!(first.suspicious, second.suspicious);
    assert_eq!(first.fraud_rings, second.fraud_rings);
}

#[test]
fn invariant_ring_membership_consistent() {
    let batch = random_batch(3, 600);
    let run = DetectionPipeline::new().run(&batch);

    for ring in &run.fraud_rings {
        assert!(ring.member_accounts.len() >= 2);
        let mut unique = ring.member_accounts.clone();
        unique.dedup();
        assert_eq!(unique.len(), ring.member_accounts.len());

        for member in &ring.member_accounts {
            let account = run
                .suspicious
                .iter()
                .find(|s| &s.account_id == member)
                .expect("ring member must be suspicious");
            assert_eq!(account.ring_id.as_deref(), Some(ring.ring_id.as_str()));
        }
        assert!(ring.risk_score >= 0.0 && ring.risk_score <= 100.0);
    }
}

#[test]
fn invariant_scores_bounded_and_top_account_at_100() {
    let batch = random_batch(11, 700);
    let run = DetectionPipeline::new().run(&batch);

    for account in &run.suspicious {
        assert!(account.suspicion_score >= 0.0 && account.suspicion_score <= 100.0);
        assert!(!account.detected_patterns.is_empty());
    }
    if let Some(top) = run.suspicious.first() {
        let max_raw = run.suspicious.iter().map(|s| s.raw_score).max().unwrap();
        assert_eq!(top.raw_score, max_raw);
        assert!((top.suspicion_score - 100.0).abs() < 1e-9);
    }
}

#[test]
fn invariant_windowed_rerun_matches_prefiltered_run() {
    let batch = random_batch(19, 400);
    let pipeline = DetectionPipeline::new();

    let from = 5 * DAY_MS;
    let to = 20 * DAY_MS;
    let windowed = pipeline.run_window(&batch, from, to);

    let prefiltered: Vec<TransactionRecord> = batch
        .iter()
        .filter(|t| t.timestamp >= from && t.timestamp <= to)
        .cloned()
        .collect();
    let direct = pipeline.run(&prefiltered);

    assert_eq!(windowed.suspicious, direct.suspicious);
    assert_eq!(windowed.fraud_rings, direct.fraud_rings);
    assert_eq!(windowed.graph.num_edges(), direct.graph.num_edges());
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn catalog_lists_every_stage() {
    let registry = flowtrace::catalog::registry().unwrap();
    let ids = registry.ids();

    for id in [
        "graph/builder",
        "forensics/cycle-detector",
        "forensics/fan-detector",
        "forensics/shell-detector",
        "forensics/velocity-detector",
        "forensics/suspicion-scorer",
        "forensics/ring-grouper",
    ] {
        assert!(ids.iter().any(|i| i == id), "missing analyzer {id}");
    }
}
