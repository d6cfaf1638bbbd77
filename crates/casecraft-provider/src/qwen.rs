// SPDX-License-Identifier: MIT OR Apache-2.0
//! Alibaba Qwen provider client.
//!
//! Same OpenAI-compatible envelope as [`crate::glm`]; Qwen's hosted API
//! tolerates more concurrency, so the default worker count is `3`.

use crate::client::{GenerateOpts, GenerateResponse, ProgressSink, ProviderClient};
use crate::shared;
use async_trait::async_trait;
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;

/// Default maximum concurrent requests for Qwen.
pub const DEFAULT_MAX_WORKERS: usize = 3;

/// Alibaba Qwen chat-completion client.
pub struct QwenClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl QwenClient {
    /// Construct a client from `config`.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ProviderClient for QwenClient {
    fn name(&self) -> &str {
        "qwen"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        opts: &GenerateOpts,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateResponse, CaseCraftError> {
        shared::generate(&self.http, &self.config, "qwen", prompt, system_prompt, opts, progress)
            .await
    }

    fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    fn validate_config(&self) -> Result<(), CaseCraftError> {
        shared::validate_common_config(&self.config)?;
        if self.config.api_key.is_none() {
            return Err(CaseCraftError::Config {
                reason: "qwen requires an api_key".to_string(),
            });
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), CaseCraftError> {
        self.validate_config()?;
        let opts = GenerateOpts {
            stream: false,
            attempt: 0,
        };
        self.generate("ping", "reply with \"pong\"", &opts, &crate::client::NoopProgressSink)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> ProviderConfig {
        ProviderConfig {
            name: "qwen".into(),
            model: "qwen-max".into(),
            api_key: Some("key".into()),
            base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1".into(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            temperature: 0.2,
            max_tokens: 2048,
            stream: false,
            max_workers: 3,
        }
    }

    #[test]
    fn name_is_qwen() {
        assert_eq!(QwenClient::new(config()).name(), "qwen");
    }

    #[test]
    fn max_workers_defaults_to_three() {
        assert_eq!(QwenClient::new(config()).max_workers(), 3);
    }
}
