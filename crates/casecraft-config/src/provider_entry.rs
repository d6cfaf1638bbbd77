// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML-facing provider settings, converted into a runtime
//! [`ProviderConfig`] once the operator's API key has been resolved.

use casecraft_contract::provider_config::ProviderConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_max_workers() -> usize {
    1
}

/// One `[providers.<name>]` table.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderEntry {
    /// Model identifier to request.
    pub model: String,
    /// API key given directly in the file. Prefer `api_key_env` for
    /// anything checked into version control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Name of an environment variable to read the API key from at load
    /// time, taking precedence over `api_key` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Base URL for the provider's chat-completion endpoint.
    pub base_url: String,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum retry attempts after the initial one.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whether to use the provider's streaming API.
    #[serde(default)]
    pub stream: bool,
    /// Maximum concurrent in-flight requests for this provider.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl ProviderEntry {
    /// Resolve the effective API key: `api_key_env`, read from the
    /// environment, wins over a literal `api_key`.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(var) = &self.api_key_env
            && let Ok(val) = std::env::var(var)
        {
            return Some(val);
        }
        self.api_key.clone()
    }

    /// Build the runtime [`ProviderConfig`] for this entry.
    #[must_use]
    pub fn to_provider_config(&self, name: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            model: self.model.clone(),
            api_key: self.resolve_api_key(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: self.stream,
            max_workers: self.max_workers,
        }
    }
}
