//! Detector thresholds and score weights.

use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// Thresholds and weights for the four pattern detectors and the scorer.
///
/// `Default` holds the stock configuration; the pipeline uses it unless a
/// caller narrows it. Detectors take the config explicitly so repeated
/// runs never share state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Maximum cycle path length in hops.
    pub cycle_max_depth: usize,
    /// Minimum member count for a closed loop to count as a cycle.
    pub cycle_min_length: usize,
    /// Sliding window for fan-in/fan-out scans, in milliseconds.
    pub fan_window_ms: i64,
    /// Distinct counterparties within the window to trigger a fan tag.
    pub fan_threshold: usize,
    /// Maximum lifetime transaction count for a shell candidate.
    pub shell_max_txn: usize,
    /// Minimum chain length (hops) for a shell network.
    pub shell_min_chain: usize,
    /// Sliding window for the velocity scan, in milliseconds.
    pub velocity_window_ms: i64,
    /// Transactions within the window to trigger a velocity tag; also the
    /// minimum lifetime transaction count for an account to be scanned.
    pub velocity_threshold: usize,
    /// Points per distinct cycle tag.
    pub score_cycle: u32,
    /// Points per fan tag (`fan_in` and `fan_out` score independently).
    pub score_fan: u32,
    /// Points for the shell-network tag.
    pub score_shell: u32,
    /// Points for the high-velocity tag.
    pub score_velocity: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cycle_max_depth: 5,
            cycle_min_length: 3,
            fan_window_ms: 72 * HOUR_MS,
            fan_threshold: 10,
            shell_max_txn: 3,
            shell_min_chain: 3,
            velocity_window_ms: HOUR_MS,
            velocity_threshold: 5,
            score_cycle: 50,
            score_fan: 30,
            score_shell: 20,
            score_velocity: 10,
        }
    }
}
