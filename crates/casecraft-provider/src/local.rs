// SPDX-License-Identifier: MIT OR Apache-2.0
//! Local (Ollama/vLLM) provider client.
//!
//! Speaks the same OpenAI-compatible envelope as the hosted providers, but
//! against an operator-supplied `base_url` rather than a fixed vendor
//! host, and does not require an `api_key` (local servers are typically
//! unauthenticated). Worker count is fully operator-configured since a
//! local server's capacity varies with hardware.

use crate::client::{GenerateOpts, GenerateResponse, ProgressSink, ProviderClient};
use crate::shared;
use async_trait::async_trait;
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;

/// Local provider client (Ollama, vLLM, or any OpenAI-compatible server).
pub struct LocalClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl LocalClient {
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
impl ProviderClient for LocalClient {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        opts: &GenerateOpts,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateResponse, CaseCraftError> {
        shared::generate(&self.http, &self.config, "local", prompt, system_prompt, opts, progress)
            .await
    }

    fn max_workers(&self) -> usize {
        self.config.max_workers
    }

    fn validate_config(&self) -> Result<(), CaseCraftError> {
        shared::validate_common_config(&self.config)
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
