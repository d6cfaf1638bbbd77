// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-request usage accounting, aggregated by the telemetry component into
//! a final run summary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a single provider request attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The provider returned a response that passed validation.
    Success,
    /// The provider responded, but the output failed validation.
    InvalidOutput,
    /// A retryable transport-level failure (connection reset, 5xx, ...).
    TransportError,
    /// The provider signalled rate limiting.
    RateLimited,
    /// The request exceeded its deadline.
    Timeout,
    /// The job was cancelled before this attempt completed.
    Cancelled,
}

impl Outcome {
    /// `true` for the only outcome that represents successful generation.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Usage accounting for a single provider request attempt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UsageRecord {
    /// Provider that served (or attempted to serve) the request.
    pub provider: String,
    /// Prompt tokens billed, when the provider reports them.
    pub prompt_tokens: Option<u64>,
    /// Completion tokens billed, when the provider reports them.
    pub completion_tokens: Option<u64>,
    /// Wall-clock duration of the attempt.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// How the attempt ended.
    pub outcome: Outcome,
}

impl UsageRecord {
    /// Total tokens billed for this attempt, when both halves are known.
    #[must_use]
    pub fn total_tokens(&self) -> Option<u64> {
        match (self.prompt_tokens, self.completion_tokens) {
            (Some(p), Some(c)) => Some(p + c),
            _ => None,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(val: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        (val.as_millis() as u64).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(de)?;
        Ok(Duration::from_millis(millis))
    }
}
