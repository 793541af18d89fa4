//! End-to-end detection pipeline.

use crate::config::DetectorConfig;
use crate::cycles::CycleDetector;
use crate::fan::FanPatternDetector;
use crate::rings::RingGrouper;
use crate::scoring::SuspicionScorer;
use crate::shell::ShellNetworkDetector;
use crate::types::{FraudRing, SuspiciousAccount};
use crate::velocity::VelocityDetector;
use flowtrace_graph::{GraphBuilder, TransactionGraph, TransactionRecord};
use serde::{Deserialize, Serialize};

/// Output of one pipeline invocation.
///
/// Handed to an external presentation/export layer; the engine owns no
/// file format, wire protocol, or CLI surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionRun {
    /// The account graph built for this batch.
    pub graph: TransactionGraph,
    /// Flagged accounts, sorted by score descending (ties by id).
    pub suspicious: Vec<SuspiciousAccount>,
    /// Fraud rings with deterministic sequential ids.
    pub fraud_rings: Vec<FraudRing>,
}

/// The full detection pipeline.
///
/// Data flow is strictly one-directional: transactions to graph, graph
/// through the four detectors, detector outputs into the scorer, scored
/// accounts into the ring grouper. Every invocation is independent and
/// reproducible from its input list alone; nothing is retained between
/// runs. Zero transactions yield empty collections at every stage, never
/// an error.
#[derive(Debug, Clone, Default)]
pub struct DetectionPipeline {
    config: DetectorConfig,
}

impl DetectionPipeline {
    /// Create a pipeline with the stock detector configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with a custom detector configuration.
    #[must_use]
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The active detector configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full pipeline on a batch of validated transactions.
    #[must_use]
    pub fn run(&self, transactions: &[TransactionRecord]) -> DetectionRun {
        let span = tracing::info_span!("detection_run", transactions = transactions.len());
        let _guard = span.enter();

        let graph = GraphBuilder::build(transactions);

        // The four detectors are read-only over the shared graph and
        // independent of one another; the scorer joins their outputs.
        let cycles = CycleDetector::compute(&graph, &self.config);
        let fans = FanPatternDetector::compute(&graph, &self.config);
        let shells = ShellNetworkDetector::compute(&graph, &self.config);
        let velocity = VelocityDetector::compute(&graph, &self.config);

        let mut suspicious =
            SuspicionScorer::compute(&cycles, &fans, &shells, &velocity, &self.config);
        let fraud_rings = RingGrouper::compute(&mut suspicious, &cycles, &graph);

        tracing::info!(
            accounts = graph.num_nodes(),
            edges = graph.num_edges(),
            suspicious = suspicious.len(),
            rings = fraud_rings.len(),
            "detection run complete"
        );

        DetectionRun {
            graph,
            suspicious,
            fraud_rings,
        }
    }

    /// Run the pipeline on the slice of transactions with
    /// `from_ms <= timestamp <= to_ms` (both bounds inclusive).
    ///
    /// A date-range re-filter is always a brand-new end-to-end run on a
    /// freshly built graph, never an incremental patch of earlier state.
    #[must_use]
    pub fn run_window(
        &self,
        transactions: &[TransactionRecord],
        from_ms: i64,
        to_ms: i64,
    ) -> DetectionRun {
        let filtered: Vec<TransactionRecord> = transactions
            .iter()
            .filter(|t| t.timestamp >= from_ms && t.timestamp <= to_ms)
            .cloned()
            .collect();
        tracing::debug!(
            from_ms,
            to_ms,
            kept = filtered.len(),
            dropped = transactions.len() - filtered.len(),
            "windowed re-run"
        );
        self.run(&filtered)
    }
}
