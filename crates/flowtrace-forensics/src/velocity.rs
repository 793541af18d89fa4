//! Transaction-velocity detection.

use crate::config::DetectorConfig;
use crate::types::VelocityScan;
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use flowtrace_graph::TransactionGraph;

/// Velocity detector.
///
/// Flags accounts transacting abnormally fast: at least
/// `velocity_threshold` transactions (sent or received, inclusive of the
/// window start) inside one `velocity_window_ms` window. Accounts with
/// fewer lifetime transactions than the threshold are never scanned.
#[derive(Debug, Clone)]
pub struct VelocityDetector {
    metadata: AnalyzerMetadata,
}

impl Default for VelocityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityDetector {
    /// Create a new velocity detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/velocity-detector", Domain::Forensics)
                .with_description("Sliding-window transaction rate scan"),
        }
    }

    /// Scan the graph for high-velocity accounts.
    #[must_use]
    pub fn compute(graph: &TransactionGraph, config: &DetectorConfig) -> VelocityScan {
        let mut scan = VelocityScan::default();

        for (account_id, node) in &graph.nodes {
            if node.transactions.len() < config.velocity_threshold {
                continue;
            }
            let mut timestamps: Vec<i64> = node.transactions.iter().map(|t| t.timestamp).collect();
            timestamps.sort_unstable();

            for i in 0..timestamps.len() {
                let window_end = timestamps[i] + config.velocity_window_ms;
                let count = timestamps[i..]
                    .iter()
                    .take_while(|&&t| t <= window_end)
                    .count();
                if count >= config.velocity_threshold {
                    scan.accounts.insert(account_id.clone());
                    break;
                }
            }
        }

        tracing::debug!(accounts = scan.accounts.len(), "velocity scan complete");
        scan
    }
}

impl Analyzer for VelocityDetector {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HOUR_MS;
    use flowtrace_graph::{GraphBuilder, TransactionRecord};

    fn txn(id: &str, sender: &str, receiver: &str, timestamp: i64) -> TransactionRecord {
        TransactionRecord {
            transaction_id: id.to_string(),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            amount: 10.0,
            timestamp,
        }
    }

    #[test]
    fn test_five_sends_in_ten_minutes() {
        let batch: Vec<TransactionRecord> = (0..5)
            .map(|i| txn(&format!("T{i}"), "A", &format!("R{i}"), i * 2 * 60 * 1000))
            .collect();
        let graph = GraphBuilder::build(&batch);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.accounts.contains("A"));
    }

    #[test]
    fn test_five_sends_across_five_days() {
        let batch: Vec<TransactionRecord> = (0..5)
            .map(|i| txn(&format!("T{i}"), "A", &format!("R{i}"), i * 24 * HOUR_MS))
            .collect();
        let graph = GraphBuilder::build(&batch);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.accounts.is_empty());
    }

    #[test]
    fn test_both_directions_counted() {
        // 3 sent + 2 received within minutes: combined count triggers.
        let graph = GraphBuilder::build(&[
            txn("T1", "A", "R1", 0),
            txn("T2", "A", "R2", 60_000),
            txn("T3", "A", "R3", 120_000),
            txn("T4", "S1", "A", 180_000),
            txn("T5", "S2", "A", 240_000),
        ]);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.accounts.contains("A"));
    }

    #[test]
    fn test_below_lifetime_minimum_skipped() {
        let batch: Vec<TransactionRecord> = (0..4)
            .map(|i| txn(&format!("T{i}"), "A", &format!("R{i}"), i))
            .collect();
        let graph = GraphBuilder::build(&batch);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.accounts.is_empty());
    }

    #[test]
    fn test_window_inclusive_of_boundary() {
        let batch: Vec<TransactionRecord> = vec![
            txn("T0", "A", "R0", 0),
            txn("T1", "A", "R1", 1),
            txn("T2", "A", "R2", 2),
            txn("T3", "A", "R3", 3),
            txn("T4", "A", "R4", HOUR_MS),
        ];
        let graph = GraphBuilder::build(&batch);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.accounts.contains("A"));
    }

    #[test]
    fn test_counterparties_not_flagged() {
        let batch: Vec<TransactionRecord> = (0..5)
            .map(|i| txn(&format!("T{i}"), "A", &format!("R{i}"), i))
            .collect();
        let graph = GraphBuilder::build(&batch);
        let scan = VelocityDetector::compute(&graph, &DetectorConfig::default());
        assert_eq!(scan.accounts.len(), 1);
    }
}
