// SPDX-License-Identifier: MIT OR Apache-2.0
//! The uniform provider contract every built-in client implements.

use async_trait::async_trait;
use casecraft_error::CaseCraftError;

/// Options controlling a single [`ProviderClient::generate`] call.
#[derive(Debug, Clone)]
pub struct GenerateOpts {
    /// Request server-sent streaming of partial chunks, when the provider
    /// supports it.
    pub stream: bool,
    /// Zero-indexed retry attempt this call represents, used to drive the
    /// non-streaming progress simulation's rollback.
    pub attempt: u32,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            stream: false,
            attempt: 0,
        }
    }
}

/// Token usage reported (or estimated) for a single [`GenerateResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (system + task).
    pub prompt_tokens: u64,
    /// Tokens generated in the completion.
    pub completion_tokens: u64,
    /// `true` if the remote did not report usage and these counts were
    /// estimated from word counts.
    pub estimated: bool,
}

/// The result of a successful [`ProviderClient::generate`] call.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Raw completion text (expected to be a JSON array of test cases).
    pub text: String,
    /// Token usage, reported by the remote or estimated.
    pub usage: TokenUsage,
}

/// Receives progress updates while a [`ProviderClient::generate`] call is
/// in flight — either streamed text chunks, or the simulated percentage
/// curve used for non-streaming calls.
pub trait ProgressSink: Send + Sync {
    /// A streamed partial completion chunk arrived.
    fn on_chunk(&self, _text: &str) {}
    /// The simulated or real completion percentage advanced.
    fn on_percent(&self, _percent: u8) {}
}

/// A [`ProgressSink`] that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {}

/// The uniform contract every built-in provider client implements.
///
/// Implementations speak an HTTP chat-completion style API; transport
/// failures are classified into [`casecraft_error::TransportErrorKind`] so
/// the scheduler can decide whether to retry or fall back.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// The provider's registered name, e.g. `"glm"`.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt` under `system_prompt`.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        opts: &GenerateOpts,
        progress: &dyn ProgressSink,
    ) -> Result<GenerateResponse, CaseCraftError>;

    /// Maximum concurrent in-flight requests this client supports.
    fn max_workers(&self) -> usize;

    /// Check that the client's configuration is internally consistent
    /// (required fields present) without making a network call.
    fn validate_config(&self) -> Result<(), CaseCraftError>;

    /// Make a lightweight network call to confirm the provider is
    /// reachable and the credentials are accepted.
    async fn health_check(&self) -> Result<(), CaseCraftError>;
}
