//! # FlowTrace
//!
//! Batch transaction-forensics engine. Feed it a closed, already-validated
//! ledger of money transfers and it returns a directed account graph, a
//! ranked list of suspicious accounts with explainable pattern tags and a
//! 0-100 score, and the fraud rings connecting them.
//!
//! ```
//! use flowtrace::prelude::*;
//!
//! let batch = vec![
//!     TransactionRecord {
//!         transaction_id: "T1".into(),
//!         sender_id: "A".into(),
//!         receiver_id: "B".into(),
//!         amount: 1000.0,
//!         timestamp: 0,
//!     },
//! ];
//! let run = DetectionPipeline::new().run(&batch);
//! assert_eq!(run.graph.num_nodes(), 2);
//! ```
//!
//! Heuristic flags only: the engine claims no legal or financial
//! certainty. It is a pure batch computation with no streaming,
//! persistence, or incremental update.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use flowtrace_core as core;
pub use flowtrace_forensics as forensics;
pub use flowtrace_graph as graph;

pub use flowtrace_core::error::{EngineError, Result};
pub use flowtrace_forensics::{
    DetectionPipeline, DetectionRun, DetectorConfig, FraudRing, SuspiciousAccount,
};
pub use flowtrace_graph::{TransactionGraph, TransactionRecord};

/// Prelude for convenient imports.
pub mod prelude {
    pub use flowtrace_core::prelude::*;
    pub use flowtrace_forensics::prelude::*;
    pub use flowtrace_graph::prelude::*;
}

/// Analyzer catalog.
pub mod catalog {
    use flowtrace_core::error::Result;
    use flowtrace_core::registry::AnalyzerRegistry;

    /// Build a registry holding every analyzer in this build.
    ///
    /// # Errors
    ///
    /// Propagates duplicate-registration errors, which would indicate a
    /// packaging defect.
    pub fn registry() -> Result<AnalyzerRegistry> {
        let registry = AnalyzerRegistry::new();
        flowtrace_graph::register_all(&registry)?;
        flowtrace_forensics::register_all(&registry)?;
        Ok(registry)
    }

    /// Total analyzer count across all domains.
    #[must_use]
    pub fn total_analyzer_count() -> usize {
        registry().map(|r| r.total_count()).unwrap_or(0)
    }
}

/// Engine version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
