//! Domain definitions for analyzer categorization.
//!
//! Analyzers are organized into domains representing the distinct areas of
//! the engine. Domains are used for:
//! - Analyzer discovery and organization
//! - Stable analyzer identifiers (`domain/analyzer-name`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Analytical domain for analyzer categorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Domain {
    /// Graph construction: account nodes, multi-edges, adjacency indices
    GraphAnalytics,

    /// Forensics: pattern detectors, suspicion scoring, ring grouping
    Forensics,

    /// Core: infrastructure and validation
    Core,
}

impl Domain {
    /// All available domains.
    pub const ALL: &'static [Domain] = &[Domain::GraphAnalytics, Domain::Forensics, Domain::Core];

    /// Returns the domain name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Domain::GraphAnalytics => "GraphAnalytics",
            Domain::Forensics => "Forensics",
            Domain::Core => "Core",
        }
    }

    /// Parse a domain from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GraphAnalytics" => Some(Domain::GraphAnalytics),
            "Forensics" => Some(Domain::Forensics),
            "Core" => Some(Domain::Core),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
