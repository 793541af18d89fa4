//! Suspicion scoring across detector outputs.

use crate::config::DetectorConfig;
use crate::types::{tags, CycleScan, FanScan, ShellScan, SuspiciousAccount, VelocityScan};
use flowtrace_core::{analyzer::Analyzer, analyzer::AnalyzerMetadata, domain::Domain};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Suspicion scorer.
///
/// Merges the four detectors' outputs into one additive weighted score
/// per account, then normalizes against the highest raw score in the
/// batch so the most-flagged account lands at 100. Each distinct tag
/// scores once; an account tagged `fan_in` and `fan_out` collects both
/// fan weights.
#[derive(Debug, Clone)]
pub struct SuspicionScorer {
    metadata: AnalyzerMetadata,
}

impl Default for SuspicionScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspicionScorer {
    /// Create a new scorer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: AnalyzerMetadata::new("forensics/suspicion-scorer", Domain::Forensics)
                .with_description("Weighted tag merge and batch-relative normalization"),
        }
    }

    /// Combine detector outputs into a ranked suspicious-account list.
    ///
    /// Accounts with zero tags never appear. The list is sorted by score
    /// descending, ties broken by ascending account id so output is
    /// reproducible.
    #[must_use]
    pub fn compute(
        cycles: &CycleScan,
        fans: &FanScan,
        shells: &ShellScan,
        velocity: &VelocityScan,
        config: &DetectorConfig,
    ) -> Vec<SuspiciousAccount> {
        let mut raw_scores: BTreeMap<String, u32> = BTreeMap::new();
        let mut patterns: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        let mut add = |account: &str, points: u32, tag: String| {
            *raw_scores.entry(account.to_string()).or_insert(0) += points;
            patterns.entry(account.to_string()).or_default().insert(tag);
        };

        for (account, cycle_tags) in &cycles.account_patterns {
            for tag in cycle_tags {
                add(account, config.score_cycle, tag.clone());
            }
        }
        for (account, fan_tags) in &fans.account_patterns {
            for tag in fan_tags {
                add(account, config.score_fan, tag.clone());
            }
        }
        for account in &shells.accounts {
            add(account, config.score_shell, tags::SHELL_NETWORK.to_string());
        }
        for account in &velocity.accounts {
            add(account, config.score_velocity, tags::HIGH_VELOCITY.to_string());
        }

        // Minimum 1 so an empty batch never divides by zero.
        let max_raw = raw_scores.values().copied().max().unwrap_or(0).max(1);

        let mut suspicious: Vec<SuspiciousAccount> = raw_scores
            .into_iter()
            .map(|(account_id, raw_score)| {
                let normalized = (f64::from(raw_score) / f64::from(max_raw) * 1000.0).round() / 10.0;
                let detected_patterns = patterns.remove(&account_id).unwrap_or_default();
                SuspiciousAccount {
                    account_id,
                    suspicion_score: normalized.min(100.0),
                    detected_patterns,
                    raw_score,
                    ring_id: None,
                }
            })
            .collect();

        suspicious.sort_by(|a, b| {
            b.suspicion_score
                .partial_cmp(&a.suspicion_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.account_id.cmp(&b.account_id))
        });

        tracing::debug!(flagged = suspicious.len(), "scoring complete");
        suspicious
    }
}

impl Analyzer for SuspicionScorer {
    fn metadata(&self) -> &AnalyzerMetadata {
        &self.metadata
    }
}
