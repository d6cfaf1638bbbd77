// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loading a [`CaseCraftConfig`] from disk and layering environment
//! variable overrides on top.

use crate::settings::CaseCraftConfig;
use casecraft_error::CaseCraftError;
use std::path::Path;

/// Load a [`CaseCraftConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, starts from [`CaseCraftConfig::default()`].
///
/// Environment variable overrides from [`apply_env_overrides`] are applied
/// on top in both cases.
///
/// # Errors
/// Returns [`CaseCraftError::Config`] if the file can't be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<CaseCraftConfig, CaseCraftError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|e| CaseCraftError::Config {
                reason: format!("cannot read config file {}: {e}", p.display()),
            })?;
            parse_toml(&content)?
        }
        None => CaseCraftConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`CaseCraftConfig`].
///
/// # Errors
/// Returns [`CaseCraftError::Config`] describing the parse failure.
pub fn parse_toml(content: &str) -> Result<CaseCraftConfig, CaseCraftError> {
    toml::from_str(content).map_err(|e| CaseCraftError::Config {
        reason: format!("failed to parse config: {e}"),
    })
}

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `CASECRAFT_SPEC`
/// - `CASECRAFT_OUTPUT_DIR`
/// - `CASECRAFT_STATE_FILE`
/// - `CASECRAFT_LOG_LEVEL`
/// - `CASECRAFT_PROVIDER_<NAME>_API_KEY` — overrides the API key of an
///   already-declared `[providers.<name>]` entry (name upper-cased,
///   non-alphanumeric characters become `_`). Providers not already
///   present in the file are left undeclared; env vars override secrets,
///   they don't invent new provider wiring.
pub fn apply_env_overrides(config: &mut CaseCraftConfig) {
    if let Ok(val) = std::env::var("CASECRAFT_SPEC") {
        config.spec = Some(val);
    }
    if let Ok(val) = std::env::var("CASECRAFT_OUTPUT_DIR") {
        config.output_dir = val;
    }
    if let Ok(val) = std::env::var("CASECRAFT_STATE_FILE") {
        config.state_file = Some(val);
    }
    if let Ok(val) = std::env::var("CASECRAFT_LOG_LEVEL") {
        config.log_level = Some(val);
    }

    for (name, entry) in config.providers.iter_mut() {
        let env_key = format!("CASECRAFT_PROVIDER_{}_API_KEY", env_key_fragment(name));
        if let Ok(val) = std::env::var(&env_key) {
            entry.api_key = Some(val);
        }
    }
}

fn env_key_fragment(provider_name: &str) -> String {
    provider_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_invalid_toml_gives_config_error() {
        let err = parse_toml("this is [not valid toml =").unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }

    #[test]
    fn empty_string_toml_parses_to_defaults() {
        let cfg = parse_toml("").unwrap();
        assert_eq!(cfg.spec, None);
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/casecraft.toml"))).unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }

    #[test]
    fn load_none_returns_default() {
        let cfg = load_config(None).unwrap();
        assert_eq!(cfg.output_dir, "casecraft-output");
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casecraft.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "spec = \"openapi.json\"\noutput_dir = \"out\"").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.spec.as_deref(), Some("openapi.json"));
        assert_eq!(cfg.output_dir, "out");
    }

    #[test]
    fn env_override_wins_for_top_level_fields() {
        let mut cfg = CaseCraftConfig::default();
        // SAFETY: test-only, single-threaded within this process's test harness slot.
        unsafe {
            std::env::set_var("CASECRAFT_OUTPUT_DIR", "from-env");
        }
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.output_dir, "from-env");
        unsafe {
            std::env::remove_var("CASECRAFT_OUTPUT_DIR");
        }
    }

    #[test]
    fn env_override_sets_declared_provider_api_key() {
        use crate::provider_entry::ProviderEntry;
        let mut cfg = CaseCraftConfig::default();
        cfg.providers.insert(
            "glm".into(),
            ProviderEntry {
                model: "glm-4".into(),
                api_key: None,
                api_key_env: None,
                base_url: "https://api.example.com".into(),
                timeout_secs: 30,
                max_retries: 2,
                temperature: 0.7,
                max_tokens: 2048,
                stream: false,
                max_workers: 1,
            },
        );
        // SAFETY: test-only, single-threaded within this process's test harness slot.
        unsafe {
            std::env::set_var("CASECRAFT_PROVIDER_GLM_API_KEY", "sk-test");
        }
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.providers["glm"].api_key.as_deref(), Some("sk-test"));
        unsafe {
            std::env::remove_var("CASECRAFT_PROVIDER_GLM_API_KEY");
        }
    }

    #[test]
    fn env_key_fragment_normalizes_non_alphanumeric() {
        assert_eq!(env_key_fragment("my-provider"), "MY_PROVIDER");
        assert_eq!(env_key_fragment("glm"), "GLM");
    }
}
