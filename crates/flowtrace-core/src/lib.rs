//! # FlowTrace Core
//!
//! Core abstractions, traits, and registry for the FlowTrace
//! transaction-forensics engine.
//!
//! This crate provides:
//! - Domain and analyzer type definitions
//! - Analyzer metadata and configuration
//! - Analyzer registry
//! - Error taxonomy shared across the engine
//! - Structured-logging bootstrap

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod domain;
pub mod error;
pub mod observability;
pub mod registry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analyzer::{Analyzer, AnalyzerMetadata};
    pub use crate::domain::Domain;
    pub use crate::error::{EngineError, Result};
    pub use crate::observability::{LogConfig, LogLevel};
    pub use crate::registry::{AnalyzerRegistry, RegistryStats};
}
