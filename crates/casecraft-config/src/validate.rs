// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic validation of a loaded [`CaseCraftConfig`].
//!
//! Hard problems (no providers declared, a strategy referencing an
//! undeclared provider) come back as a [`CaseCraftError::Config`]; soft
//! issues come back as advisory [`ConfigWarning`]s.

use crate::settings::CaseCraftConfig;
use casecraft_error::CaseCraftError;
use std::fmt;

/// Threshold above which a provider timeout generates a warning.
const LARGE_TIMEOUT_THRESHOLD_SECS: u64 = 120;

/// Advisory-level issues that do not prevent a run but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A recommended optional field is missing.
    MissingOptionalField {
        /// Name of the missing field.
        field: String,
        /// Why it matters.
        hint: String,
    },
    /// A provider timeout is unusually large for an interactive LLM call.
    LargeTimeout {
        /// Provider name.
        provider: String,
        /// Timeout value in seconds.
        secs: u64,
    },
    /// A provider's API key could not be resolved from either the literal
    /// field or the named environment variable.
    MissingApiKey {
        /// Provider name.
        provider: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOptionalField { field, hint } => {
                write!(f, "missing optional field '{field}': {hint}")
            }
            Self::LargeTimeout { provider, secs } => {
                write!(f, "provider '{provider}' has a large timeout ({secs}s)")
            }
            Self::MissingApiKey { provider } => {
                write!(f, "provider '{provider}' has no resolvable api key")
            }
        }
    }
}

/// Validate a loaded configuration, returning advisory warnings.
///
/// # Errors
/// Returns [`CaseCraftError::Config`] if no providers are declared, or if
/// the assignment strategy references a provider name absent from
/// `config.providers`.
pub fn validate_config(config: &CaseCraftConfig) -> Result<Vec<ConfigWarning>, CaseCraftError> {
    let mut warnings = Vec::new();

    if config.providers.is_empty() {
        return Err(CaseCraftError::Config {
            reason: "configuration declares no [providers] entries".to_string(),
        });
    }

    for name in config.strategy.referenced_providers() {
        if !config.providers.contains_key(name) {
            return Err(CaseCraftError::Config {
                reason: format!(
                    "strategy references provider '{name}', which has no [providers.{name}] entry"
                ),
            });
        }
    }

    for (name, entry) in &config.providers {
        if entry.timeout_secs > LARGE_TIMEOUT_THRESHOLD_SECS {
            warnings.push(ConfigWarning::LargeTimeout {
                provider: name.clone(),
                secs: entry.timeout_secs,
            });
        }
        if entry.resolve_api_key().is_none() {
            warnings.push(ConfigWarning::MissingApiKey {
                provider: name.clone(),
            });
        }
    }

    if config.state_file.is_none() {
        warnings.push(ConfigWarning::MissingOptionalField {
            field: "state_file".into(),
            hint: "every endpoint will be regenerated on each run".into(),
        });
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_entry::ProviderEntry;
    use crate::strategy_config::StrategyConfig;

    fn provider() -> ProviderEntry {
        ProviderEntry {
            model: "glm-4".into(),
            api_key: Some("sk-test".into()),
            api_key_env: None,
            base_url: "https://api.example.com".into(),
            timeout_secs: 30,
            max_retries: 2,
            temperature: 0.7,
            max_tokens: 2048,
            stream: false,
            max_workers: 1,
        }
    }

    #[test]
    fn no_providers_is_a_hard_error() {
        let cfg = CaseCraftConfig::default();
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }

    #[test]
    fn strategy_referencing_undeclared_provider_is_a_hard_error() {
        let mut cfg = CaseCraftConfig::default();
        cfg.providers.insert("glm".into(), provider());
        cfg.strategy = StrategyConfig::RoundRobin {
            providers: vec!["qwen".into()],
        };
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }

    #[test]
    fn valid_config_with_state_file_has_no_missing_state_file_warning() {
        let mut cfg = CaseCraftConfig::default();
        cfg.providers.insert("glm".into(), provider());
        cfg.strategy = StrategyConfig::RoundRobin {
            providers: vec!["glm".into()],
        };
        cfg.state_file = Some(".casecraft-state.json".into());
        let warnings = validate_config(&cfg).unwrap();
        assert!(
            !warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::MissingOptionalField { .. }))
        );
    }

    #[test]
    fn large_timeout_produces_warning() {
        let mut cfg = CaseCraftConfig::default();
        let mut entry = provider();
        entry.timeout_secs = 300;
        cfg.providers.insert("glm".into(), entry);
        cfg.strategy = StrategyConfig::RoundRobin {
            providers: vec!["glm".into()],
        };
        let warnings = validate_config(&cfg).unwrap();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::LargeTimeout { .. }))
        );
    }

    #[test]
    fn missing_api_key_produces_warning() {
        let mut cfg = CaseCraftConfig::default();
        let mut entry = provider();
        entry.api_key = None;
        cfg.providers.insert("glm".into(), entry);
        cfg.strategy = StrategyConfig::RoundRobin {
            providers: vec!["glm".into()],
        };
        let warnings = validate_config(&cfg).unwrap();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::MissingApiKey { .. }))
        );
    }

    #[test]
    fn config_warning_display_mentions_field() {
        let w = ConfigWarning::MissingOptionalField {
            field: "state_file".into(),
            hint: "h".into(),
        };
        assert!(w.to_string().contains("state_file"));
    }
}
