//! # FlowTrace Graph
//!
//! Transaction graph model for the FlowTrace forensics engine:
//! - Typed transaction records and directed multi-edges
//! - Per-account nodes with flow totals and a full transaction index
//! - Adjacency-set indices for cheap reachability checks
//! - `GraphBuilder` - single-pass construction from a transaction batch
//!
//! The graph is built fresh per run and never mutated afterwards, so the
//! detectors in `flowtrace-forensics` can share it read-only.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod types;

pub use builder::GraphBuilder;
pub use types::{AccountNode, Edge, TransactionGraph, TransactionRecord};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::builder::*;
    pub use crate::types::*;
}

/// Register all graph analyzers with a registry.
pub fn register_all(
    registry: &flowtrace_core::registry::AnalyzerRegistry,
) -> flowtrace_core::error::Result<()> {
    use flowtrace_core::analyzer::Analyzer;

    registry.register(builder::GraphBuilder::new().metadata().clone())?;
    Ok(())
}
