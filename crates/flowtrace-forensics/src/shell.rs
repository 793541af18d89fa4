//! Shell-network (pass-through chain) detection.

use crate::config::DetectorConfig;
use crate::types::ShellScan;
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use flowtrace_graph::TransactionGraph;
use std::collections::HashSet;

/// Shell-network detector.
///
/// A shell candidate is an account with at most `shell_max_txn` lifetime
/// transactions. From each candidate the detector walks out-adjacency
/// with a per-path visited set; when the path reaches
/// `shell_min_chain` hops and the node being visited is itself
/// low-activity, every account on the path is marked a shell-network
/// member. The walk also continues past a higher-activity node while the
/// hop count is still below the minimum chain length, so a busy
/// intermediary does not hide a depth-constrained chain.
#[derive(Debug, Clone)]
pub struct ShellNetworkDetector {
    metadata: AnalyzerMetadata,
}

impl Default for ShellNetworkDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellNetworkDetector {
    /// Create a new shell-network detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/shell-detector", Domain::Forensics)
                .with_description("Low-activity pass-through chain search"),
        }
    }

    /// Scan the graph for shell networks.
    #[must_use]
    pub fn compute(graph: &TransactionGraph, config: &DetectorConfig) -> ShellScan {
        let mut scan = ShellScan::default();

        for (account_id, node) in &graph.nodes {
            if node.txn_count <= config.shell_max_txn {
                let mut visited: HashSet<String> = HashSet::from([account_id.clone()]);
                Self::walk(graph, config, account_id, 1, &mut visited, &mut scan);
            }
        }

        tracing::debug!(accounts = scan.accounts.len(), "shell scan complete");
        scan
    }

    /// Walk one hop deeper; the visited set is restored on backtrack so
    /// sibling branches are explored independently.
    fn walk(
        graph: &TransactionGraph,
        config: &DetectorConfig,
        current: &str,
        depth: usize,
        visited: &mut HashSet<String>,
        scan: &mut ShellScan,
    ) {
        for next in graph.out_neighbors(current) {
            if visited.contains(next) {
                continue;
            }
            let Some(node) = graph.node(next) else { continue };
            visited.insert(next.clone());
            if depth >= config.shell_min_chain && node.txn_count <= config.shell_max_txn {
                for account in visited.iter() {
                    scan.accounts.insert(account.clone());
                }
            } else if node.txn_count <= config.shell_max_txn || depth < config.shell_min_chain {
                Self::walk(graph, config, next, depth + 1, visited, scan);
            }
            visited.remove(next);
        }
    }
}

impl Analyzer for ShellNetworkDetector {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}
