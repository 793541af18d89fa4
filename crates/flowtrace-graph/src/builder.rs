//! Graph construction from a transaction batch.

use crate::types::{AccountNode, Edge, TransactionGraph, TransactionRecord};
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};

/// Graph builder analyzer.
///
/// Turns an ordered transaction list into the account graph in a single
/// additive pass: both endpoints are created lazily on first sight, the
/// edge is appended to the sender's outgoing and receiver's incoming
/// lists, adjacency sets are updated, and totals accumulate on both
/// nodes. Performs no validation; callers supply only records that
/// already passed upstream checks.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    metadata: AnalyzerMetadata,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("graph/builder", Domain::GraphAnalytics)
                .with_description("Single-pass account graph construction"),
        }
    }

    /// Build the account graph for a batch of transactions.
    ///
    /// O(transactions); purely additive, no side effects beyond the
    /// returned graph. An empty batch yields an empty graph.
    #[must_use]
    pub fn build(transactions: &[TransactionRecord]) -> TransactionGraph {
        let mut graph = TransactionGraph::empty();

        for txn in transactions {
            Self::ensure_node(&mut graph, &txn.sender_id);
            Self::ensure_node(&mut graph, &txn.receiver_id);

            let edge = Edge {
                source: txn.sender_id.clone(),
                target: txn.receiver_id.clone(),
                amount: txn.amount,
                timestamp: txn.timestamp,
                transaction_id: txn.transaction_id.clone(),
            };
            graph.edges.push(edge.clone());

            if let Some(out) = graph.adj_out.get_mut(&txn.sender_id) {
                out.insert(txn.receiver_id.clone());
            }
            if let Some(inn) = graph.adj_in.get_mut(&txn.receiver_id) {
                inn.insert(txn.sender_id.clone());
            }

            if let Some(sender) = graph.nodes.get_mut(&txn.sender_id) {
                sender.out_edges.push(edge.clone());
                sender.total_sent += txn.amount;
                sender.txn_count += 1;
                sender.transactions.push(txn.clone());
            }
            if let Some(index) = graph.txn_by_account.get_mut(&txn.sender_id) {
                index.push(txn.clone());
            }

            if let Some(receiver) = graph.nodes.get_mut(&txn.receiver_id) {
                receiver.in_edges.push(edge);
                receiver.total_received += txn.amount;
                receiver.txn_count += 1;
                receiver.transactions.push(txn.clone());
            }
            if let Some(index) = graph.txn_by_account.get_mut(&txn.receiver_id) {
                index.push(txn.clone());
            }
        }

        tracing::debug!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "built transaction graph"
        );
        graph
    }

    fn ensure_node(graph: &mut TransactionGraph, id: &str) {
        if !graph.nodes.contains_key(id) {
            graph.nodes.insert(id.to_string(), AccountNode::new(id));
            graph.adj_out.insert(id.to_string(), Default::default());
            graph.adj_in.insert(id.to_string(), Default::default());
            graph.txn_by_account.insert(id.to_string(), Vec::new());
        }
    }
}

impl Analyzer for GraphBuilder {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}
