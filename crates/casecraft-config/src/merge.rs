// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layering a CLI-flag overlay on top of a file-loaded configuration.

use crate::filter_config::FilterConfig;
use crate::settings::CaseCraftConfig;
use crate::strategy_config::StrategyConfig;

/// Merge two configurations. Values in `overlay` take precedence over
/// `base`; provider maps are combined, with `overlay` entries winning on
/// name collisions.
///
/// `overlay.strategy` and `overlay.filter` replace `base`'s wholesale when
/// they differ from their type's default, since partial strategy/filter
/// merges have no well-defined semantics (e.g. half a manual rule list).
#[must_use]
pub fn merge_configs(base: CaseCraftConfig, overlay: CaseCraftConfig) -> CaseCraftConfig {
    let mut providers = base.providers;
    providers.extend(overlay.providers);

    let strategy = if overlay.strategy == StrategyConfig::default() {
        base.strategy
    } else {
        overlay.strategy
    };

    let filter = if overlay.filter == FilterConfig::default() {
        base.filter
    } else {
        overlay.filter
    };

    CaseCraftConfig {
        spec: overlay.spec.or(base.spec),
        output_dir: if overlay.output_dir == CaseCraftConfig::default().output_dir {
            base.output_dir
        } else {
            overlay.output_dir
        },
        nest_by_tag: overlay.nest_by_tag || base.nest_by_tag,
        state_file: overlay.state_file.or(base.state_file),
        log_level: overlay.log_level.or(base.log_level),
        strategy,
        providers,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_entry::ProviderEntry;

    fn provider(model: &str) -> ProviderEntry {
        ProviderEntry {
            model: model.into(),
            api_key: None,
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
    fn overlay_spec_overrides_base() {
        let base = CaseCraftConfig {
            spec: Some("base.json".into()),
            ..CaseCraftConfig::default()
        };
        let overlay = CaseCraftConfig {
            spec: Some("overlay.json".into()),
            ..CaseCraftConfig::default()
        };
        let merged = merge_configs(base, overlay);
        assert_eq!(merged.spec.as_deref(), Some("overlay.json"));
    }

    #[test]
    fn merge_preserves_base_when_overlay_is_default() {
        let base = CaseCraftConfig {
            spec: Some("base.json".into()),
            output_dir: "custom-out".into(),
            ..CaseCraftConfig::default()
        };
        let merged = merge_configs(base.clone(), CaseCraftConfig::default());
        assert_eq!(merged.spec.as_deref(), Some("base.json"));
        assert_eq!(merged.output_dir, "custom-out");
    }

    #[test]
    fn provider_maps_combine_with_overlay_winning_on_collision() {
        let mut base = CaseCraftConfig::default();
        base.providers.insert("glm".into(), provider("glm-3"));
        base.providers.insert("qwen".into(), provider("qwen-max"));

        let mut overlay = CaseCraftConfig::default();
        overlay.providers.insert("glm".into(), provider("glm-4"));

        let merged = merge_configs(base, overlay);
        assert_eq!(merged.providers["glm"].model, "glm-4");
        assert_eq!(merged.providers["qwen"].model, "qwen-max");
    }

    #[test]
    fn overlay_strategy_replaces_base_strategy_when_non_default() {
        let base = CaseCraftConfig {
            strategy: StrategyConfig::RoundRobin {
                providers: vec!["glm".into()],
            },
            ..CaseCraftConfig::default()
        };
        let overlay = CaseCraftConfig {
            strategy: StrategyConfig::RoundRobin {
                providers: vec!["qwen".into(), "deepseek".into()],
            },
            ..CaseCraftConfig::default()
        };
        let merged = merge_configs(base, overlay);
        match merged.strategy {
            StrategyConfig::RoundRobin { providers } => {
                assert_eq!(providers, vec!["qwen".to_string(), "deepseek".to_string()]);
            }
            other => panic!("expected RoundRobin, got {other:?}"),
        }
    }

    #[test]
    fn nest_by_tag_is_sticky_once_set() {
        let base = CaseCraftConfig {
            nest_by_tag: true,
            ..CaseCraftConfig::default()
        };
        let merged = merge_configs(base, CaseCraftConfig::default());
        assert!(merged.nest_by_tag);
    }
}
