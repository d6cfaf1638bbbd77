// SPDX-License-Identifier: MIT OR Apache-2.0
//! Chat-completion request plumbing shared by every built-in provider
//! client. Each provider module (see [`crate::glm`], [`crate::qwen`],
//! [`crate::deepseek`], [`crate::local`]) calls [`generate`] with its own
//! name and default retry policy; only the endpoint path and defaults
//! differ between them.

use crate::client::{GenerateOpts, GenerateResponse, ProgressSink, TokenUsage};
use crate::progress;
use crate::sse;
use crate::token_estimate::{estimate_tokens, Language};
use crate::transport::{classify_reqwest_error, classify_status, parse_chat_completion};
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;
use casecraft_retry::RetryConfig;
use futures::StreamExt;
use std::time::Duration;

/// Validate the configuration fields every chat-completion provider needs,
/// regardless of which vendor it talks to.
pub(crate) fn validate_common_config(config: &ProviderConfig) -> Result<(), CaseCraftError> {
    if config.base_url.trim().is_empty() {
        return Err(CaseCraftError::Config {
            reason: format!("provider '{}' has an empty base_url", config.name),
        });
    }
    if config.model.trim().is_empty() {
        return Err(CaseCraftError::Config {
            reason: format!("provider '{}' has an empty model", config.name),
        });
    }
    Ok(())
}

/// Generate a completion via an OpenAI-compatible `/chat/completions`
/// endpoint, retrying rate-limited, transient, and timeout failures with
/// exponential backoff starting at 1s and capped at 30s. A fatal (4xx,
/// malformed envelope) failure is returned immediately for the scheduler
/// to handle via its fallback chain.
pub(crate) async fn generate(
    http: &reqwest::Client,
    config: &ProviderConfig,
    provider_name: &str,
    prompt: &str,
    system_prompt: &str,
    opts: &GenerateOpts,
    progress: &dyn ProgressSink,
) -> Result<GenerateResponse, CaseCraftError> {
    let retry_config = RetryConfig {
        max_retries: config.max_retries,
        base_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(30),
        overall_timeout: config.overall_deadline(0),
        jitter_factor: 0.2,
    };

    let outcome = casecraft_retry::retry_async(
        &retry_config,
        || send_once(http, config, provider_name, prompt, system_prompt, opts, progress),
        |err| matches!(err, CaseCraftError::ProviderTransport { kind, .. } if kind.is_retryable()),
    )
    .await?;

    Ok(outcome.value)
}

async fn send_once(
    http: &reqwest::Client,
    config: &ProviderConfig,
    provider_name: &str,
    prompt: &str,
    system_prompt: &str,
    opts: &GenerateOpts,
    progress: &dyn ProgressSink,
) -> Result<GenerateResponse, CaseCraftError> {
    let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
    let body = serde_json::json!({
        "model": config.model,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": prompt},
        ],
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "stream": opts.stream,
    });

    let mut request = http.post(&url).json(&body).timeout(config.timeout);
    if let Some(key) = &config.api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().await.map_err(|e| CaseCraftError::ProviderTransport {
        provider: provider_name.to_string(),
        kind: classify_reqwest_error(&e),
    })?;

    let status = response.status();
    if !status.is_success() {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(CaseCraftError::ProviderTransport {
            provider: provider_name.to_string(),
            kind: classify_status(status.as_u16(), retry_after),
        });
    }

    if opts.stream {
        receive_stream(response, provider_name, progress).await
    } else {
        let sequence = progress::progress_sequence(opts.attempt);
        progress::emit(&sequence, progress).await;

        let value: serde_json::Value =
            response.json().await.map_err(|e| CaseCraftError::InvalidOutput {
                provider: provider_name.to_string(),
                reason: format!("response body is not valid JSON: {e}"),
            })?;
        let (text, usage) = parse_chat_completion(provider_name, &value)?;
        Ok(GenerateResponse { text, usage })
    }
}

async fn receive_stream(
    response: reqwest::Response,
    provider_name: &str,
    progress: &dyn ProgressSink,
) -> Result<GenerateResponse, CaseCraftError> {
    let mut stream = response.bytes_stream();
    let mut buf = String::new();
    let mut collected = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| CaseCraftError::ProviderTransport {
            provider: provider_name.to_string(),
            kind: classify_reqwest_error(&e),
        })?;
        buf.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(pos) = buf.find('\n') {
            let line = buf[..pos].trim().to_string();
            buf.drain(..=pos);
            if let Some(value) = sse::parse_sse_data_line(&line)
                && let Some(delta) = sse::extract_delta_content(&value)
            {
                progress.on_chunk(&delta);
                collected.push_str(&delta);
            }
        }
    }

    let usage = TokenUsage {
        prompt_tokens: estimate_tokens("", Language::English),
        completion_tokens: estimate_tokens(&collected, Language::English),
        estimated: true,
    };
    Ok(GenerateResponse {
        text: collected,
        usage,
    })
}
