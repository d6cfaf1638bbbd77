// SPDX-License-Identifier: MIT OR Apache-2.0
//! Whole-run usage summary: per-provider counters plus aggregate totals.

use crate::counters::ProviderCounters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Final usage report produced at shutdown, covering every provider that
/// handled at least one attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UsageReport {
    /// Per-provider counters, keyed by provider name (deterministic order).
    pub providers: BTreeMap<String, ProviderCounters>,
}

impl UsageReport {
    /// Total attempts across every provider.
    #[must_use]
    pub fn total_attempts(&self) -> u64 {
        self.providers.values().map(|c| c.attempts).sum()
    }

    /// Total successful attempts across every provider.
    #[must_use]
    pub fn total_successes(&self) -> u64 {
        self.providers.values().map(|c| c.successes).sum()
    }

    /// Total prompt and completion tokens billed across every provider.
    #[must_use]
    pub fn total_tokens(&self) -> (u64, u64) {
        let tokens_in = self.providers.values().map(|c| c.tokens_in).sum();
        let tokens_out = self.providers.values().map(|c| c.tokens_out).sum();
        (tokens_in, tokens_out)
    }

    /// `total_successes / total_attempts`, or `0.0` if no attempts were made.
    #[must_use]
    pub fn overall_success_rate(&self) -> f64 {
        let attempts = self.total_attempts();
        if attempts == 0 {
            0.0
        } else {
            self.total_successes() as f64 / attempts as f64
        }
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error if serialization fails,
    /// which cannot happen for this type's field set but is surfaced
    /// rather than unwrapped.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tokens_in, tokens_out) = self.total_tokens();
        writeln!(
            f,
            "{} attempts, {} succeeded ({:.1}%), {tokens_in} tokens in / {tokens_out} tokens out",
            self.total_attempts(),
            self.total_successes(),
            self.overall_success_rate() * 100.0,
        )?;
        for (provider, counters) in &self.providers {
            writeln!(
                f,
                "  {provider}: {}/{} ({:.1}%), {} retries, {}ms",
                counters.successes,
                counters.attempts,
                counters.success_rate() * 100.0,
                counters.retries(),
                counters.wall_time_ms,
            )?;
        }
        Ok(())
    }
}
