//! # FlowTrace Forensics
//!
//! Fraud-pattern analyzers over a transaction graph, plus the pipeline
//! that chains them.
//!
//! ## Analyzers
//!
//! - `CycleDetector` - depth-bounded search for closed money loops
//! - `FanPatternDetector` - windowed fan-in/fan-out (smurfing) scan
//! - `ShellNetworkDetector` - low-activity pass-through chain search
//! - `VelocityDetector` - sliding-window transaction rate scan
//! - `SuspicionScorer` - weighted tag merge and normalization
//! - `RingGrouper` - union-find clustering into fraud rings
//!
//! All analyzers are stateless and read-only over the shared
//! `TransactionGraph`; `DetectionPipeline` wires them end to end.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod cycles;
pub mod fan;
pub mod pipeline;
pub mod rings;
pub mod scoring;
pub mod shell;
pub mod types;
pub mod velocity;

pub use config::DetectorConfig;
pub use cycles::CycleDetector;
pub use fan::FanPatternDetector;
pub use pipeline::{DetectionPipeline, DetectionRun};
pub use rings::{RingGrouper, UnionFind};
pub use scoring::SuspicionScorer;
pub use shell::ShellNetworkDetector;
pub use types::{tags, CycleScan, FanScan, FraudRing, ShellScan, SuspiciousAccount, VelocityScan};
pub use velocity::VelocityDetector;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::*;
    pub use crate::cycles::*;
    pub use crate::fan::*;
    pub use crate::pipeline::*;
    pub use crate::rings::*;
    pub use crate::scoring::*;
    pub use crate::shell::*;
    pub use crate::types::*;
    pub use crate::velocity::*;
}

/// Register all forensics analyzers with a registry.
pub fn register_all(
    registry: &flowtrace_core::registry::AnalyzerRegistry,
) -> flowtrace_core::error::Result<()> {
    use flowtrace_core::analyzer::Analyzer;

    registry.register(cycles::CycleDetector::new().metadata().clone())?;
    registry.register(fan::FanPatternDetector::new().metadata().clone())?;
    registry.register(shell::ShellNetworkDetector::new().metadata().clone())?;
    registry.register(velocity::VelocityDetector::new().metadata().clone())?;
    registry.register(scoring::SuspicionScorer::new().metadata().clone())?;
    registry.register(rings::RingGrouper::new().metadata().clone())?;
    Ok(())
}
