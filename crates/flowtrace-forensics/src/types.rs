//! Detection result types and pattern tags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Pattern tag strings attached to flagged accounts.
pub mod tags {
    /// Many distinct senders converging within the fan window.
    pub const FAN_IN: &str = "fan_in";
    /// Many distinct receivers diverging within the fan window.
    pub const FAN_OUT: &str = "fan_out";
    /// Member of a chain of low-activity pass-through accounts.
    pub const SHELL_NETWORK: &str = "shell_network";
    /// Abnormally many transactions within the velocity window.
    pub const HIGH_VELOCITY: &str = "high_velocity";

    /// Tag for membership in a closed loop of `len` accounts.
    #[must_use]
    pub fn cycle(len: usize) -> String {
        format!("cycle_length_{len}")
    }
}

/// Output of the cycle detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleScan {
    /// Raw cycles as node-id sequences (first entry is the start node).
    ///
    /// Cycle identity is the sorted member set, so two topologically
    /// different loops over the same accounts appear once.
    pub cycles: Vec<Vec<String>>,
    /// Account id to its cycle tags.
    pub account_patterns: BTreeMap<String, BTreeSet<String>>,
}

impl CycleScan {
    /// Accounts participating in at least one cycle, in sorted order.
    pub fn accounts(&self) -> impl Iterator<Item = &String> {
        self.account_patterns.keys()
    }
}

/// Output of the fan-pattern detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FanScan {
    /// Account id to its fan tags (`fan_in`, `fan_out`, or both).
    pub account_patterns: BTreeMap<String, BTreeSet<String>>,
}

/// Output of the shell-network detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellScan {
    /// Shell-network member accounts.
    pub accounts: BTreeSet<String>,
}

/// Output of the velocity detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VelocityScan {
    /// High-velocity accounts.
    pub accounts: BTreeSet<String>,
}

/// A flagged account with its explainable score.
///
/// Exists only as pipeline output; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    /// Account id.
    pub account_id: String,
    /// Normalized score in [0, 100], one decimal.
    pub suspicion_score: f64,
    /// Every pattern tag the account triggered.
    pub detected_patterns: BTreeSet<String>,
    /// Additive weighted score before normalization.
    pub raw_score: u32,
    /// Ring assignment, if the account belongs to a fraud ring.
    pub ring_id: Option<String>,
}

/// A cluster of structurally connected suspicious accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRing {
    /// Sequential ring id (`RING_001`, `RING_002`, ...).
    pub ring_id: String,
    /// Member account ids (>= 2, unique, sorted).
    pub member_accounts: Vec<String>,
    /// Most frequent tag across member accounts.
    pub pattern_type: String,
    /// Aggregate risk in [0, 100], one decimal.
    pub risk_score: f64,
}
