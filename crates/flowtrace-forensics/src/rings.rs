//! Fraud-ring grouping via union-find.

use crate::types::{CycleScan, FraudRing, SuspiciousAccount};
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use flowtrace_graph::TransactionGraph;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Disjoint-set forest over account ids.
///
/// `find` compresses paths iteratively, so adversarially large
/// suspicious-account sets cannot overflow the stack.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    index: HashMap<String, usize>,
    ids: Vec<String>,
}

impl UnionFind {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account as its own singleton set; returns its slot.
    pub fn insert(&mut self, id: &str) -> usize {
        if let Some(&slot) = self.index.get(id) {
            return slot;
        }
        let slot = self.parent.len();
        self.parent.push(slot);
        self.index.insert(id.to_string(), slot);
        self.ids.push(id.to_string());
        slot
    }

    /// Root slot for an account, with iterative path compression.
    pub fn find(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing two accounts.
    pub fn union(&mut self, a: &str, b: &str) {
        let slot_a = self.insert(a);
        let slot_b = self.insert(b);
        let root_a = self.find(slot_a);
        let root_b = self.find(slot_b);
        if root_a != root_b {
            self.parent[root_a] = root_b;
        }
    }

    /// Root account id for an account already in the forest.
    pub fn root_id(&mut self, id: &str) -> Option<String> {
        let slot = *self.index.get(id)?;
        let root = self.find(slot);
        Some(self.ids[root].clone())
    }
}

/// Ring grouper.
///
/// Clusters suspicious accounts that are structurally connected: cycle
/// co-membership and direct adjacency (either direction) both union.
/// Groups of size >= 2 become rings; singletons are discarded. Ring ids
/// are assigned in order of each group's smallest member account id, so
/// numbering is deterministic across runs.
#[derive(Debug, Clone)]
pub struct RingGrouper {
    metadata: AnalyzerMetadata,
}

impl Default for RingGrouper {
    fn default() -> Self {
        Self::new()
    }
}

impl RingGrouper {
    /// Create a new ring grouper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/ring-grouper", Domain::Forensics)
                .with_description("Union-find clustering of suspicious accounts"),
        }
    }

    /// Group suspicious accounts into fraud rings.
    ///
    /// Writes each assigned `ring_id` back onto the member's
    /// `SuspiciousAccount` record. The detectors' outputs are not
    /// otherwise mutated.
    #[must_use]
    pub fn compute(
        suspicious: &mut [SuspiciousAccount],
        cycles: &CycleScan,
        graph: &TransactionGraph,
    ) -> Vec<FraudRing> {
        let suspicious_ids: BTreeSet<String> =
            suspicious.iter().map(|s| s.account_id.clone()).collect();

        let mut forest = UnionFind::new();
        for id in &suspicious_ids {
            forest.insert(id);
        }

        // Rule 1: cycle co-membership.
        for cycle in &cycles.cycles {
            let Some(first) = cycle.first() else { continue };
            for member in &cycle[1..] {
                if suspicious_ids.contains(first) && suspicious_ids.contains(member) {
                    forest.union(first, member);
                }
            }
        }

        // Rule 2: direct adjacency, either direction.
        for id in &suspicious_ids {
            for neighbor in graph.out_neighbors(id) {
                if suspicious_ids.contains(neighbor) {
                    forest.union(id, neighbor);
                }
            }
            for neighbor in graph.in_neighbors(id) {
                if suspicious_ids.contains(neighbor) {
                    forest.union(id, neighbor);
                }
            }
        }

        // Suspicious ids iterate sorted, so each group's member list is
        // sorted and its first entry is the smallest member.
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for id in &suspicious_ids {
            if let Some(root) = forest.root_id(id) {
                groups.entry(root).or_default().push(id.clone());
            }
        }
        let mut ordered: Vec<Vec<String>> =
            groups.into_values().filter(|g| g.len() >= 2).collect();
        ordered.sort_by(|a, b| a[0].cmp(&b[0]));

        let by_id: HashMap<String, usize> = suspicious
            .iter()
            .enumerate()
            .map(|(i, s)| (s.account_id.clone(), i))
            .collect();

        let mut rings = Vec::with_capacity(ordered.len());
        for (number, members) in ordered.into_iter().enumerate() {
            let ring_id = format!("RING_{:03}", number + 1);

            let mut tag_counts: BTreeMap<String, usize> = BTreeMap::new();
            let mut score_sum = 0.0;
            for member in &members {
                if let Some(&i) = by_id.get(member.as_str()) {
                    for tag in &suspicious[i].detected_patterns {
                        *tag_counts.entry(tag.clone()).or_insert(0) += 1;
                    }
                    score_sum += suspicious[i].suspicion_score;
                }
            }
            // Counts iterate in tag order and only a strictly higher
            // count replaces, so ties fall to the lexicographically
            // smallest tag.
            let mut pattern_type = "unknown".to_string();
            let mut best_count = 0;
            for (tag, &count) in &tag_counts {
                if count > best_count {
                    best_count = count;
                    pattern_type = tag.clone();
                }
            }

            let avg = score_sum / members.len() as f64;
            let bonus = (members.len() as f64 * 1.5).min(15.0);
            let risk_score = (((avg + bonus) * 10.0).round() / 10.0).min(100.0);

            for member in &members {
                if let Some(&i) = by_id.get(member.as_str()) {
                    suspicious[i].ring_id = Some(ring_id.clone());
                }
            }

            rings.push(FraudRing {
                ring_id,
                member_accounts: members,
                pattern_type,
                risk_score,
            });
        }

        tracing::debug!(rings = rings.len(), "ring grouping complete");
        rings
    }
}

impl Analyzer for RingGrouper {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}
