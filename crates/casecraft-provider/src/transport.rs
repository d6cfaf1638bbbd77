// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared HTTP plumbing for the built-in provider clients: status-code
//! classification and response-envelope probing.

use crate::client::TokenUsage;
use crate::token_estimate::{estimate_tokens, Language};
use casecraft_error::{CaseCraftError, TransportErrorKind};
use std::time::Duration;

/// Classify an HTTP status code into a [`TransportErrorKind`].
///
/// `429` is [`TransportErrorKind::RateLimited`]; any other `4xx` is
/// [`TransportErrorKind::Fatal`] (non-retryable within the client); any
/// `5xx` is [`TransportErrorKind::Transient`]. Anything else (a successful
/// status reaching this function is a caller bug) is treated as fatal.
#[must_use]
pub fn classify_status(status: u16, retry_after: Option<Duration>) -> TransportErrorKind {
    match status {
        429 => TransportErrorKind::RateLimited { retry_after },
        400..=499 => TransportErrorKind::Fatal {
            detail: format!("HTTP {status}"),
        },
        500..=599 => TransportErrorKind::Transient {
            status: Some(status),
        },
        other => TransportErrorKind::Fatal {
            detail: format!("unexpected HTTP {other}"),
        },
    }
}

/// Wrap a [`reqwest::Error`] (connection reset, DNS failure, timeout) into
/// a [`TransportErrorKind`].
#[must_use]
pub fn classify_reqwest_error(err: &reqwest::Error) -> TransportErrorKind {
    if err.is_timeout() {
        TransportErrorKind::Timeout {
            after: Duration::from_secs(0),
        }
    } else if err.is_connect() {
        TransportErrorKind::Transient { status: None }
    } else {
        TransportErrorKind::Fatal {
            detail: err.to_string(),
        }
    }
}

/// Extract the completion text and usage from an OpenAI-compatible chat
/// completion JSON envelope:
///
/// ```json
/// {
///   "choices": [{"message": {"content": "..."}}],
///   "usage": {"prompt_tokens": 1, "completion_tokens": 2}
/// }
/// ```
///
/// Falls back to word-count estimation via [`estimate_tokens`] when
/// `usage` is absent, per the documented approximate fallback.
pub fn parse_chat_completion(
    provider: &str,
    body: &serde_json::Value,
) -> Result<(String, TokenUsage), CaseCraftError> {
    let text = body
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CaseCraftError::InvalidOutput {
            provider: provider.to_string(),
            reason: "missing choices[0].message.content in response envelope".to_string(),
        })?
        .to_string();

    let usage = match body.get("usage") {
        Some(u) => {
            let prompt_tokens = u
                .get("prompt_tokens")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| CaseCraftError::InvalidOutput {
                    provider: provider.to_string(),
                    reason: "usage present but missing prompt_tokens".to_string(),
                })?;
            let completion_tokens = u
                .get("completion_tokens")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| CaseCraftError::InvalidOutput {
                    provider: provider.to_string(),
                    reason: "usage present but missing completion_tokens".to_string(),
                })?;
            TokenUsage {
                prompt_tokens,
                completion_tokens,
                estimated: false,
            }
        }
        None => TokenUsage {
            prompt_tokens: estimate_tokens("", Language::English),
            completion_tokens: estimate_tokens(&text, Language::English),
            estimated: true,
        },
    };

    Ok((text, usage))
}
