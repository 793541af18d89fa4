//! Common graph types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A money-transfer record, already validated upstream.
///
/// The engine never mutates or rejects individual records; rejection of
/// malformed rows is the parser's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction identifier.
    pub transaction_id: String,
    /// Sending account id (non-empty).
    pub sender_id: String,
    /// Receiving account id (non-empty).
    pub receiver_id: String,
    /// Transfer amount (>= 0).
    pub amount: f64,
    /// Timestamp in epoch milliseconds.
    pub timestamp: i64,
}

/// A directed edge in the transaction multigraph.
///
/// Parallel edges between the same account pair are kept distinct;
/// repeated transfers are never merged at the edge layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Sending account id.
    pub source: String,
    /// Receiving account id.
    pub target: String,
    /// Transfer amount.
    pub amount: f64,
    /// Timestamp in epoch milliseconds.
    pub timestamp: i64,
    /// Originating transaction id.
    pub transaction_id: String,
}

/// One node per distinct account id seen as sender or receiver.
///
/// Invariant: `total_sent` equals the sum of outgoing edge amounts,
/// `total_received` the sum of incoming edge amounts, and `txn_count`
/// the outgoing plus incoming edge count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountNode {
    /// Account id.
    pub id: String,
    /// Outgoing edges, in batch order.
    pub out_edges: Vec<Edge>,
    /// Incoming edges, in batch order.
    pub in_edges: Vec<Edge>,
    /// All transactions touching this account (both directions).
    pub transactions: Vec<TransactionRecord>,
    /// Sum of outgoing amounts.
    pub total_sent: f64,
    /// Sum of incoming amounts.
    pub total_received: f64,
    /// Outgoing plus incoming edge count.
    pub txn_count: usize,
}

impl AccountNode {
    /// Create an empty node for an account id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Total money flow through this account (sent + received).
    #[must_use]
    pub fn total_flow(&self) -> f64 {
        self.total_sent + self.total_received
    }
}

/// The account graph for one batch of transactions.
///
/// Owned by a single pipeline invocation; detectors borrow it read-only.
/// A new batch always yields a fully new graph, never a partial update.
/// All index maps use ordered containers so iteration is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionGraph {
    /// Account id to node.
    pub nodes: BTreeMap<String, AccountNode>,
    /// Full edge list, in batch order.
    pub edges: Vec<Edge>,
    /// Account id to distinct out-neighbor account ids.
    pub adj_out: BTreeMap<String, BTreeSet<String>>,
    /// Account id to distinct in-neighbor account ids.
    pub adj_in: BTreeMap<String, BTreeSet<String>>,
    /// Account id to every transaction touching it.
    pub txn_by_account: BTreeMap<String, Vec<TransactionRecord>>,
}

impl TransactionGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of accounts.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges (parallel edges counted individually).
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by account id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&AccountNode> {
        self.nodes.get(id)
    }

    /// Distinct out-neighbors of an account, in sorted order.
    pub fn out_neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.adj_out.get(id).into_iter().flatten()
    }

    /// Distinct in-neighbors of an account, in sorted order.
    pub fn in_neighbors(&self, id: &str) -> impl Iterator<Item = &String> {
        self.adj_in.get(id).into_iter().flatten()
    }

    /// Account ids, in sorted order.
    pub fn account_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }
}
