//! Analyzer metadata and the analyzer trait.
//!
//! Every stage of the detection engine (graph builder, pattern detectors,
//! scorer, ring grouper) is an analyzer: a stateless service object that
//! carries metadata and exposes pure compute functions over the graph.
//! No analyzer retains cross-invocation state.

use crate::domain::Domain;
use serde::{Deserialize, Serialize};

/// Analyzer metadata.
///
/// Contains the identity and description of an engine stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzerMetadata {
    /// Unique analyzer identifier (e.g., "forensics/cycle-detector").
    pub id: String,

    /// Analytical domain for organization.
    pub domain: Domain,

    /// Human-readable description.
    pub description: String,

    /// Version of the analyzer implementation.
    pub version: u32,
}

impl AnalyzerMetadata {
    /// Create new analyzer metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, domain: Domain) -> Self {
        Self {
            id: id.into(),
            domain,
            description: String::new(),
            version: 1,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Returns the analyzer name without its domain prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

impl Default for AnalyzerMetadata {
    fn default() -> Self {
        Self::new("unnamed", Domain::Core)
    }
}

/// Trait implemented by every engine stage.
///
/// Analyzers are read-only over the shared graph; the trait exposes only
/// identity, never mutable state.
pub trait Analyzer {
    /// Returns the analyzer metadata.
    fn metadata(&self) -> &AnalyzerMetadata;
}
