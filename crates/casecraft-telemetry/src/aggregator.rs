// SPDX-License-Identifier: MIT OR Apache-2.0
//! Thread-safe collector feeding [`UsageReport`].
//!
//! A single mutex guards the whole provider map rather than per-field
//! atomics, since one [`UsageRecord`] updates several related counters
//! (attempt count, outcome bucket, tokens, wall time) that must land
//! together.

use crate::counters::ProviderCounters;
use crate::report::UsageReport;
use casecraft_contract::usage::UsageRecord;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Accumulates [`UsageRecord`]s into a per-provider [`UsageReport`].
///
/// Cheap to clone (the inner map is already behind an `Arc<Mutex<_>>>`),
/// so every job task in the scheduler can hold its own handle.
#[derive(Debug, Clone, Default)]
pub struct UsageAggregator {
    inner: Arc<Mutex<BTreeMap<String, ProviderCounters>>>,
}

impl UsageAggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one usage record into its provider's counters.
    pub fn record(&self, record: UsageRecord) {
        tracing::debug!(
            provider = %record.provider,
            outcome = ?record.outcome,
            duration_ms = record.duration.as_millis() as u64,
            "usage_record"
        );
        let mut guard = self.inner.lock().expect("telemetry mutex poisoned");
        guard.entry(record.provider.clone()).or_default().record(&record);
    }

    /// Fold every record in `records` into their providers' counters.
    pub fn record_all(&self, records: impl IntoIterator<Item = UsageRecord>) {
        for record in records {
            self.record(record);
        }
    }

    /// Snapshot the current state as a [`UsageReport`].
    #[must_use]
    pub fn report(&self) -> UsageReport {
        let guard = self.inner.lock().expect("telemetry mutex poisoned");
        UsageReport {
            providers: guard.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_contract::usage::Outcome;
    use std::time::Duration;

    fn record(provider: &str, outcome: Outcome) -> UsageRecord {
        UsageRecord {
            provider: provider.to_string(),
            prompt_tokens: Some(1),
            completion_tokens: Some(1),
            duration: Duration::from_millis(10),
            outcome,
        }
    }

    #[test]
    fn records_group_by_provider() {
        let agg = UsageAggregator::new();
        agg.record(record("glm", Outcome::Success));
        agg.record(record("qwen", Outcome::Timeout));
        agg.record(record("glm", Outcome::Success));
        let report = agg.report();
        assert_eq!(report.providers["glm"].attempts, 2);
        assert_eq!(report.providers["qwen"].attempts, 1);
    }

    #[test]
    fn record_all_folds_a_batch() {
        let agg = UsageAggregator::new();
        agg.record_all(vec![
            record("glm", Outcome::Success),
            record("glm", Outcome::InvalidOutput),
        ]);
        assert_eq!(agg.report().providers["glm"].attempts, 2);
    }

    #[test]
    fn clone_shares_underlying_state() {
        let agg = UsageAggregator::new();
        let clone = agg.clone();
        clone.record(record("glm", Outcome::Success));
        assert_eq!(agg.report().providers["glm"].successes, 1);
    }
}
