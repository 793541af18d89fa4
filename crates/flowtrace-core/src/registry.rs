//! Analyzer registry.
//!
//! The registry holds metadata for every analyzer an engine build exposes.
//! It exists for discovery (listing the stages of a pipeline) and for
//! duplicate-registration detection; it never holds analyzer state.

use crate::analyzer::AnalyzerMetadata;
use crate::domain::Domain;
use crate::error::{EngineError, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Registry of analyzer metadata, keyed by analyzer id.
///
/// Iteration order is the sorted id order, so listings are deterministic.
#[derive(Debug, Default)]
pub struct AnalyzerRegistry {
    entries: RwLock<BTreeMap<String, AnalyzerMetadata>>,
}

/// Summary statistics for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Total registered analyzers.
    pub total: usize,
    /// Registered analyzers per domain.
    pub per_domain: BTreeMap<String, usize>,
}

impl AnalyzerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register analyzer metadata.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::AnalyzerAlreadyRegistered` if the id is taken.
    pub fn register(&self, metadata: AnalyzerMetadata) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| EngineError::internal(format!("registry lock poisoned: {e}")))?;
        if entries.contains_key(&metadata.id) {
            return Err(EngineError::AnalyzerAlreadyRegistered(metadata.id));
        }
        tracing::debug!(id = %metadata.id, domain = %metadata.domain, "registered analyzer");
        entries.insert(metadata.id.clone(), metadata);
        Ok(())
    }

    /// Look up analyzer metadata by id.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::AnalyzerNotFound` if no analyzer has the id.
    pub fn get(&self, id: &str) -> Result<AnalyzerMetadata> {
        let entries = self
            .entries
            .read()
            .map_err(|e| EngineError::internal(format!("registry lock poisoned: {e}")))?;
        entries
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(id))
    }

    /// All registered ids, in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All registered metadata for a domain, in sorted-id order.
    #[must_use]
    pub fn by_domain(&self, domain: Domain) -> Vec<AnalyzerMetadata> {
        self.entries
            .read()
            .map(|e| {
                e.values()
                    .filter(|m| m.domain == domain)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total registered analyzer count.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Summary statistics.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        let entries = match self.entries.read() {
            Ok(e) => e,
            Err(_) => {
                return RegistryStats {
                    total: 0,
                    per_domain: BTreeMap::new(),
                }
            }
        };
        let mut per_domain: BTreeMap<String, usize> = BTreeMap::new();
        for meta in entries.values() {
            *per_domain.entry(meta.domain.to_string()).or_insert(0) += 1;
        }
        RegistryStats {
            total: entries.len(),
            per_domain,
        }
    }
}
