// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unified error taxonomy for CaseCraft.
//!
//! Every top-level failure mode named in the generation core's design is a
//! variant of [`CaseCraftError`], each carrying a stable [`ErrorCode`] and
//! whatever structured context is useful for a terminal-failure summary.
//! Transport-layer detail (rate limits, timeouts, transient 5xx) lives in
//! [`TransportErrorKind`], which [`CaseCraftError::ProviderTransport`] wraps.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Stable, machine-readable error code. Serializes as `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Configuration is missing, malformed, or internally inconsistent.
    ConfigInvalid,
    /// The spec document could not be read or parsed.
    SpecInvalid,
    /// No provider is configured for a job that needs one.
    NoProviderConfigured,
    /// A transport-level failure talking to a provider.
    ProviderTransport,
    /// A provider returned a non-retryable (fatal) error.
    ProviderFatal,
    /// A provider's response could not be parsed into the expected envelope.
    InvalidOutput,
    /// A generated artifact failed structural or semantic validation.
    ValidationFailed,
    /// Reading or writing the state file failed.
    StateIo,
    /// The run was cancelled before completion.
    Cancelled,
}

impl ErrorCode {
    /// Machine-readable code string, e.g. `"CASECRAFT-CONFIG_INVALID"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigInvalid => "CASECRAFT-CONFIG_INVALID",
            Self::SpecInvalid => "CASECRAFT-SPEC_INVALID",
            Self::NoProviderConfigured => "CASECRAFT-NO_PROVIDER_CONFIGURED",
            Self::ProviderTransport => "CASECRAFT-PROVIDER_TRANSPORT",
            Self::ProviderFatal => "CASECRAFT-PROVIDER_FATAL",
            Self::InvalidOutput => "CASECRAFT-INVALID_OUTPUT",
            Self::ValidationFailed => "CASECRAFT-VALIDATION_FAILED",
            Self::StateIo => "CASECRAFT-STATE_IO",
            Self::Cancelled => "CASECRAFT-CANCELLED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// TransportErrorKind
// ---------------------------------------------------------------------------

/// Classification of a provider HTTP transport failure.
///
/// `RateLimited`, `Transient`, and `Timeout` are retryable by the scheduler's
/// backoff policy; `Fatal` is not and triggers fallback-chain traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportErrorKind {
    /// HTTP 429 or a provider-specific rate-limit signal.
    RateLimited {
        /// Server-suggested retry delay, if one was provided.
        retry_after: Option<Duration>,
    },
    /// HTTP 5xx or a connection reset.
    Transient {
        /// HTTP status code, if the failure reached the HTTP layer.
        status: Option<u16>,
    },
    /// The request did not complete within the configured timeout.
    Timeout {
        /// The timeout duration that was exceeded.
        after: Duration,
    },
    /// HTTP 4xx (other than 429) or a malformed response envelope.
    Fatal {
        /// Human-readable detail.
        detail: String,
    },
}

impl TransportErrorKind {
    /// Returns `true` if the scheduler should retry with the same provider.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Fatal { .. })
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited { retry_after } => match retry_after {
                Some(d) => write!(f, "rate limited, retry after {d:?}"),
                None => write!(f, "rate limited"),
            },
            Self::Transient { status } => match status {
                Some(s) => write!(f, "transient failure (HTTP {s})"),
                None => write!(f, "transient failure"),
            },
            Self::Timeout { after } => write!(f, "timed out after {after:?}"),
            Self::Fatal { detail } => write!(f, "fatal: {detail}"),
        }
    }
}

impl std::error::Error for TransportErrorKind {}

// ---------------------------------------------------------------------------
// CaseCraftError
// ---------------------------------------------------------------------------

/// Top-level error taxonomy for CaseCraft.
#[derive(Debug, thiserror::Error)]
pub enum CaseCraftError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// The API spec could not be read or parsed.
    #[error("spec error: {reason}")]
    Spec {
        /// Parse or I/O failure description.
        reason: String,
        /// Line number hint, when the underlying parser provides one.
        line: Option<usize>,
    },

    /// A job needed a provider that was never registered or configured.
    #[error("no provider configured: {name}")]
    NoProviderConfigured {
        /// The provider name that was requested.
        name: String,
    },

    /// A provider transport call failed (rate limit, timeout, transient 5xx).
    #[error("provider '{provider}' transport error: {kind}")]
    ProviderTransport {
        /// Name of the provider that failed.
        provider: String,
        /// Classification of the transport failure.
        kind: TransportErrorKind,
    },

    /// A provider returned a fatal, non-retryable error.
    #[error("provider '{provider}' fatal error: {reason}")]
    ProviderFatal {
        /// Name of the provider that failed.
        provider: String,
        /// Human-readable detail.
        reason: String,
    },

    /// A provider's response could not be parsed into the expected envelope.
    #[error("invalid output from provider '{provider}': {reason}")]
    InvalidOutput {
        /// Name of the provider that produced the output.
        provider: String,
        /// Why parsing/structural checks failed.
        reason: String,
    },

    /// A generated artifact failed validation against the test-case contract.
    #[error("validation failed for {endpoint}: {}", .violations.join("; "))]
    Validation {
        /// `METHOD path` identity of the endpoint being validated.
        endpoint: String,
        /// Every violation found (validation accumulates, not short-circuits).
        violations: Vec<String>,
    },

    /// Reading or writing `.casecraft_state.json` (or an artifact file) failed.
    #[error("state I/O error: {reason}")]
    StateIo {
        /// Underlying I/O failure description.
        reason: String,
        #[source]
        /// The underlying I/O error, when one is available.
        source: Option<std::io::Error>,
    },

    /// The run was cancelled before the job completed.
    #[error("cancelled")]
    Cancelled,
}

impl CaseCraftError {
    /// Return the stable [`ErrorCode`] for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::ConfigInvalid,
            Self::Spec { .. } => ErrorCode::SpecInvalid,
            Self::NoProviderConfigured { .. } => ErrorCode::NoProviderConfigured,
            Self::ProviderTransport { .. } => ErrorCode::ProviderTransport,
            Self::ProviderFatal { .. } => ErrorCode::ProviderFatal,
            Self::InvalidOutput { .. } => ErrorCode::InvalidOutput,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::StateIo { .. } => ErrorCode::StateIo,
            Self::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// `true` if this error should abort the run before any job is dispatched
    /// (config and spec errors), as opposed to being handled per-job.
    #[must_use]
    pub fn is_preflight_fatal(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Spec { .. })
    }
}

impl From<std::io::Error> for CaseCraftError {
    fn from(err: std::io::Error) -> Self {
        Self::StateIo {
            reason: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_strings_are_stable() {
        assert_eq!(ErrorCode::ConfigInvalid.code(), "CASECRAFT-CONFIG_INVALID");
        assert_eq!(ErrorCode::Cancelled.code(), "CASECRAFT-CANCELLED");
    }

    #[test]
    fn transport_kind_retryability() {
        assert!(TransportErrorKind::RateLimited { retry_after: None }.is_retryable());
        assert!(TransportErrorKind::Transient { status: Some(503) }.is_retryable());
        assert!(
            TransportErrorKind::Timeout {
                after: Duration::from_secs(5)
            }
            .is_retryable()
        );
        assert!(
            !TransportErrorKind::Fatal {
                detail: "bad request".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn preflight_fatal_classification() {
        let config = CaseCraftError::Config {
            reason: "missing api_key".into(),
        };
        let spec = CaseCraftError::Spec {
            reason: "malformed yaml".into(),
            line: Some(12),
        };
        let transport = CaseCraftError::ProviderTransport {
            provider: "glm".into(),
            kind: TransportErrorKind::Timeout {
                after: Duration::from_secs(30),
            },
        };
        assert!(config.is_preflight_fatal());
        assert!(spec.is_preflight_fatal());
        assert!(!transport.is_preflight_fatal());
    }

    #[test]
    fn validation_error_message_lists_all_violations() {
        let err = CaseCraftError::Validation {
            endpoint: "GET /users/{id}".into(),
            violations: vec!["empty name".into(), "missing expected_status".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("empty name"));
        assert!(msg.contains("missing expected_status"));
    }

    #[test]
    fn io_error_converts_to_state_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CaseCraftError = io_err.into();
        assert_eq!(err.code(), ErrorCode::StateIo);
    }

    #[test]
    fn error_code_serde_roundtrip() {
        let json = serde_json::to_string(&ErrorCode::ProviderFatal).unwrap();
        assert_eq!(json, "\"PROVIDER_FATAL\"");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::ProviderFatal);
    }
}
