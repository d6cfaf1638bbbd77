// SPDX-License-Identifier: MIT OR Apache-2.0
//! Immutable per-provider configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one LLM provider, loaded once at startup and never
/// mutated thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, as used in the registry and in `fallback_chain`s.
    pub name: String,
    /// Model identifier to request.
    pub model: String,
    /// API key / bearer token, when the provider requires one.
    pub api_key: Option<String>,
    /// Base URL for the provider's chat-completion endpoint.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Maximum retry attempts after the initial one, per job-provider pair.
    pub max_retries: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Whether to use the provider's streaming API.
    pub stream: bool,
    /// Maximum concurrent in-flight requests for this provider.
    pub max_workers: usize,
}

impl ProviderConfig {
    /// The per-job overall deadline given a fallback chain length, per
    /// `timeout × (max_retries + 1) × (chain_len + 1)`.
    #[must_use]
    pub fn overall_deadline(&self, fallback_chain_len: usize) -> Duration {
        self.timeout * (self.max_retries + 1) * (fallback_chain_len as u32 + 1)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(val: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        val.as_secs_f64().serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(de)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
