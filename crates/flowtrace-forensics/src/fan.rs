//! Fan-in / fan-out (smurfing) detection.

use crate::config::DetectorConfig;
use crate::types::{tags, FanScan};
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use flowtrace_graph::{Edge, TransactionGraph};
use std::collections::HashSet;

/// Fan-pattern detector.
///
/// Flags accounts with many distinct counterparties inside a sliding
/// window: `fan_in` for converging senders, `fan_out` for diverging
/// receivers. The two scans are independent and an account may carry
/// both tags.
#[derive(Debug, Clone)]
pub struct FanPatternDetector {
    metadata: AnalyzerMetadata,
}

impl Default for FanPatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FanPatternDetector {
    /// Create a new fan-pattern detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/fan-detector", Domain::Forensics)
                .with_description("Windowed distinct-counterparty fan-in/fan-out scan"),
        }
    }

    /// Scan the graph for fan patterns.
    #[must_use]
    pub fn compute(graph: &TransactionGraph, config: &DetectorConfig) -> FanScan {
        let mut scan = FanScan::default();

        for (account_id, node) in &graph.nodes {
            if Self::has_fan(&node.in_edges, |e| &e.source, config) {
                scan.account_patterns
                    .entry(account_id.clone())
                    .or_default()
                    .insert(tags::FAN_IN.to_string());
            }
            if Self::has_fan(&node.out_edges, |e| &e.target, config) {
                scan.account_patterns
                    .entry(account_id.clone())
                    .or_default()
                    .insert(tags::FAN_OUT.to_string());
            }
        }

        tracing::debug!(accounts = scan.account_patterns.len(), "fan scan complete");
        scan
    }

    /// Slide a window over timestamp-sorted edges, counting distinct
    /// counterparties; stops at the first window reaching the threshold.
    fn has_fan<'a, F>(edges: &'a [Edge], counterparty: F, config: &DetectorConfig) -> bool
    where
        F: Fn(&'a Edge) -> &'a String,
    {
        let mut sorted: Vec<&Edge> = edges.iter().collect();
        sorted.sort_by_key(|e| e.timestamp);

        for i in 0..sorted.len() {
            let window_end = sorted[i].timestamp + config.fan_window_ms;
            let mut distinct: HashSet<&str> = HashSet::new();
            for &edge in &sorted[i..] {
                if edge.timestamp > window_end {
                    break;
                }
                distinct.insert(counterparty(edge));
            }
            if distinct.len() >= config.fan_threshold {
                return true;
            }
        }
        false
    }
}

impl Analyzer for FanPatternDetector {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}
