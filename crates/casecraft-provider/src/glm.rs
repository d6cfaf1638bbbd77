// SPDX-License-Identifier: MIT OR Apache-2.0
//! Zhipu GLM provider client.
//!
//! Speaks the same OpenAI-compatible `/chat/completions` envelope as every
//! other built-in ([`crate::shared::generate`]). GLM's hosted API caps
//! concurrent requests tightly, so the default worker count is `1`
//! regardless of what the operator configures elsewhere.

use crate::client::{GenerateOpts, GenerateResponse, ProgressSink, ProviderClient};
use crate::shared;
use async_trait::async_trait;
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;

/// Default maximum concurrent requests for GLM.
pub const DEFAULT_MAX_WORKERS: usize = 1;

/// Zhipu GLM chat-completion client.
pub struct GlmClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl GlmClient {
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
impl ProviderClient for GlmClient {
    fn name(&self) -> &str {
        "glm"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        opts: &GenerateOpts,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateResponse, CaseCraftError> {
        shared::generate(&self.http, &self.config, "glm", prompt, system_prompt, opts, progress)
            .await
    }

    fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    fn validate_config(&self) -> Result<(), CaseCraftError> {
        shared::validate_common_config(&self.config)?;
        if self.config.api_key.is_none() {
            return Err(CaseCraftError::Config {
                reason: "glm requires an api_key".to_string(),
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
