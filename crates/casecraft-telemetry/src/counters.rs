// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-provider running counters, updated one [`UsageRecord`] at a time.

use casecraft_contract::usage::{Outcome, UsageRecord};
use serde::{Deserialize, Serialize};

/// Running usage counters for a single provider.
///
/// `retries` counts attempts that did not end the job outright (every
/// non-success, non-cancelled attempt needs either a same-provider retry
/// with a correction prompt or a fallback-chain advance); it does not
/// distinguish between the two, since both consume a provider request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderCounters {
    /// Total request attempts made against this provider.
    pub attempts: u64,
    /// Attempts that passed validation.
    pub successes: u64,
    /// Attempts whose response failed validation.
    pub invalid_output: u64,
    /// Attempts that failed with a retryable transport error.
    pub transport_errors: u64,
    /// Attempts the provider rate-limited.
    pub rate_limited: u64,
    /// Attempts that exceeded their deadline.
    pub timeouts: u64,
    /// Attempts abandoned due to cancellation.
    pub cancelled: u64,
    /// Prompt tokens billed.
    pub tokens_in: u64,
    /// Completion tokens billed.
    pub tokens_out: u64,
    /// Cumulative wall-clock time spent in requests, in milliseconds.
    pub wall_time_ms: u64,
}

impl ProviderCounters {
    /// Fold one [`UsageRecord`] into these counters.
    pub fn record(&mut self, rec: &UsageRecord) {
        self.attempts += 1;
        match rec.outcome {
            Outcome::Success => self.successes += 1,
            Outcome::InvalidOutput => self.invalid_output += 1,
            Outcome::TransportError => self.transport_errors += 1,
            Outcome::RateLimited => self.rate_limited += 1,
            Outcome::Timeout => self.timeouts += 1,
            Outcome::Cancelled => self.cancelled += 1,
        }
        self.tokens_in += rec.prompt_tokens.unwrap_or(0);
        self.tokens_out += rec.completion_tokens.unwrap_or(0);
        self.wall_time_ms += rec.duration.as_millis() as u64;
    }

    /// Attempts that needed another attempt elsewhere in the chain:
    /// every non-success, non-cancelled outcome.
    #[must_use]
    pub fn retries(&self) -> u64 {
        self.invalid_output + self.transport_errors + self.rate_limited + self.timeouts
    }

    /// `successes / attempts`, or `0.0` if no attempts were made.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}
