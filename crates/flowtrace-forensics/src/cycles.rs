//! Closed-loop (layering) detection.

use crate::config::DetectorConfig;
use crate::types::{tags, CycleScan};
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use flowtrace_graph::TransactionGraph;
use std::collections::HashSet;

/// Cycle detector.
///
/// Finds accounts participating in short closed money loops via a
/// depth-bounded DFS from every account over the out-adjacency sets. A
/// neighbor equal to the start node closes a cycle once the path holds at
/// least `cycle_min_length` members; the path never exceeds
/// `cycle_max_depth` members, which also bounds worst-case branching.
///
/// Cycle identity is the sorted member set: two topologically different
/// loops over the same accounts are deduplicated into one. This is the
/// documented contract; downstream scoring and ring grouping rely on it.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    metadata: AnalyzerMetadata,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/cycle-detector", Domain::Forensics)
                .with_description("Depth-bounded search for closed money loops"),
        }
    }

    /// Scan the graph for cycles.
    ///
    /// Read-only over the graph; an empty graph yields an empty scan.
    #[must_use]
    pub fn compute(graph: &TransactionGraph, config: &DetectorConfig) -> CycleScan {
        let mut scan = CycleScan::default();
        let mut seen_keys: HashSet<String> = HashSet::new();

        for start in graph.account_ids() {
            let mut path = vec![start.clone()];
            let mut visited: HashSet<String> = HashSet::from([start.clone()]);
            Self::dfs(
                graph,
                config,
                start,
                start,
                &mut path,
                &mut visited,
                &mut seen_keys,
                &mut scan,
            );
        }

        tracing::debug!(
            cycles = scan.cycles.len(),
            accounts = scan.account_patterns.len(),
            "cycle scan complete"
        );
        scan
    }

    /// DFS step with push/pop backtracking so sibling branches never
    /// observe another branch's partially-built path.
    #[allow(clippy::too_many_arguments)]
    fn dfs(
        graph: &TransactionGraph,
        config: &DetectorConfig,
        start: &str,
        current: &str,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
        seen_keys: &mut HashSet<String>,
        scan: &mut CycleScan,
    ) {
        if path.len() > config.cycle_max_depth {
            return;
        }
        for neighbor in graph.out_neighbors(current) {
            if neighbor == start && path.len() >= config.cycle_min_length {
                let mut members: Vec<&str> = path.iter().map(String::as_str).collect();
                members.sort_unstable();
                let key = members.join("|");
                if seen_keys.insert(key) {
                    scan.cycles.push(path.clone());
                    let tag = tags::cycle(path.len());
                    for account in path.iter() {
                        scan.account_patterns
                            .entry(account.clone())
                            .or_default()
                            .insert(tag.clone());
                    }
                }
            } else if !visited.contains(neighbor) {
                visited.insert(neighbor.clone());
                path.push(neighbor.clone());
                Self::dfs(graph, config, start, neighbor, path, visited, seen_keys, scan);
                path.pop();
                visited.remove(neighbor);
            }
        }
    }
}

impl Analyzer for CycleDetector {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowtrace_graph::{GraphBuilder, TransactionRecord};

    fn txn(id: &str, sender: &str, receiver: &str, timestamp: i64) -> TransactionRecord {
        TransactionRecord {
            transaction_id: id.to_string(),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            amount: 1000.0,
            timestamp,
        }
    }

    #[test]
    fn test_detector_metadata() {
        let detector = CycleDetector::new();
        assert_eq!(detector.metadata().id, "forensics/cycle-detector");
        assert_eq!(detector.metadata().domain, Domain::Forensics);
    }

    #[test]
    fn test_three_cycle_tags_all_members() {
        let graph = GraphBuilder::build(&[
            txn("T1", "A", "B", 0),
            txn("T2", "B", "C", 1),
            txn("T3", "C", "A", 2),
        ]);
        let scan = CycleDetector::compute(&graph, &DetectorConfig::default());

        assert_eq!(scan.cycles.len(), 1);
        for account in ["A", "B", "C"] {
            let patterns = scan.account_patterns.get(account).unwrap();
            assert!(patterns.contains("cycle_length_3"), "missing tag on {account}");
        }
    }

    #[test]
    fn test_two_cycle_too_short() {
        let graph = GraphBuilder::build(&[txn("T1", "A", "B", 0), txn("T2", "B", "A", 1)]);
        let scan = CycleDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.cycles.is_empty());
        assert!(scan.account_patterns.is_empty());
    }

    #[test]
    fn test_six_cycle_exceeds_depth_bound() {
        let graph = GraphBuilder::build(&[
            txn("T1", "A", "B", 0),
            txn("T2", "B", "C", 1),
            txn("T3", "C", "D", 2),
            txn("T4", "D", "E", 3),
            txn("T5", "E", "F", 4),
            txn("T6", "F", "A", 5),
        ]);
        let scan = CycleDetector::compute(&graph, &DetectorConfig::default());
        assert!(scan.cycles.is_empty());
    }

    #[test]
    fn test_five_cycle_within_bound() {
        let graph = GraphBuilder::build(&[
            txn("T1", "A", "B", 0),
            txn("T2", "B", "C", 1),
            txn("T3", "C", "D", 2),
            txn("T4", "D", "E", 3),
            txn("T5", "E", "A", 4),
        ]);
        let scan = CycleDetector::compute(&graph, &DetectorConfig::default());

        assert_eq!(scan.cycles.len(), 1);
        assert!(scan.account_patterns["A"].contains("cycle_length_5"));
    }

    #[test]
    fn test_sorted_member_set_dedupes_rotations() {
        // The same loop found from each start node collapses to one cycle.
        let graph = GraphBuilder::build(&[
            txn("T1", "A", "B", 0),
            txn("T2", "B", "C", 1),
            txn("T3", "C", "A", 2),
            // Reverse loop over the same member set dedupes too.
            txn("T4", "A", "C", 3),
            txn("T5", "C", "B", 4),
            txn("T6", "B", "A", 5),
        ]);
        let scan = CycleDetector::compute(&graph, &DetectorConfig::default());
        assert_eq!(scan.cycles.len(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let scan = CycleDetector::compute(&GraphBuilder::build(&[]), &DetectorConfig::default());
        assert!(scan.cycles.is_empty());
        assert_eq!(scan.accounts().count(), 0);
    }
}
