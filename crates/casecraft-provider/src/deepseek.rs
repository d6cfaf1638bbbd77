// SPDX-License-Identifier: MIT OR Apache-2.0
//! DeepSeek provider client.
//!
//! Same OpenAI-compatible envelope as [`crate::glm`]; default worker
//! count is `3`, matching DeepSeek's documented rate limits for the chat
//! completion endpoint.

use crate::client::{GenerateOpts, GenerateResponse, ProgressSink, ProviderClient};
use crate::shared;
use async_trait::async_trait;
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;

/// Default maximum concurrent requests for DeepSeek.
pub const DEFAULT_MAX_WORKERS: usize = 3;

/// DeepSeek chat-completion client.
pub struct DeepSeekClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl DeepSeekClient {
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
impl ProviderClient for DeepSeekClient {
    fn name(&self) -> &str {
        "deepseek"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        opts: &GenerateOpts,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateResponse, CaseCraftError> {
        shared::generate(
            &self.http,
            &self.config,
            "deepseek",
            prompt,
            system_prompt,
            opts,
            progress,
        )
        .await
    }

    fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    fn validate_config(&self) -> Result<(), CaseCraftError> {
        shared::validate_common_config(&self.config)?;
        if self.config.api_key.is_none() {
            return Err(CaseCraftError::Config {
                reason: "deepseek requires an api_key".to_string(),
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
            name: "deepseek".into(),
            model: "deepseek-chat".into(),
            api_key: Some("key".into()),
            base_url: "https://api.deepseek.com".into(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            temperature: 0.2,
            max_tokens: 2048,
            stream: false,
            max_workers: 3,
        }
    }

    #[test]
    fn name_is_deepseek() {
        assert_eq!(DeepSeekClient::new(config()).name(), "deepseek");
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let mut cfg = config();
        cfg.api_key = None;
        assert!(DeepSeekClient::new(cfg).validate_config().is_err());
    }
}
