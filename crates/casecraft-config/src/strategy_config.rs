// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML-facing assignment strategy selection, converted into a
//! [`AssignmentStrategy`] once the endpoint set and spec fingerprint are
//! known (the `random` strategy's default seed is derived from both).

use casecraft_contract::endpoint::Method;
use casecraft_strategy::complexity::ComplexityRoles;
use casecraft_strategy::manual::ManualRule;
use casecraft_strategy::seed::default_seed;
use casecraft_strategy::AssignmentStrategy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One `pattern = "provider"` entry in a `[[strategy.rules]]` manual list.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ManualRuleConfig {
    /// HTTP method the rule is restricted to. Omit to match any method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    /// Glob pattern matched against the endpoint's path.
    pub pattern: String,
    /// Provider name assigned when this rule matches.
    pub provider: String,
}

/// The `[strategy]` table. `kind` selects which variant's fields apply.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Cycle through `providers` in declaration order.
    RoundRobin {
        /// Provider names to cycle through, in order.
        providers: Vec<String>,
    },
    /// Pick uniformly at random from `providers`.
    Random {
        /// Provider names to choose among.
        providers: Vec<String>,
        /// RNG seed. Omit to derive one from the endpoint count and spec
        /// fingerprint, so repeat runs against an unchanged spec are
        /// reproducible without the operator picking a seed by hand.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    /// Route by per-endpoint complexity score into one of three roles.
    Complexity {
        /// Provider for endpoints with score `> 10`.
        strongest: String,
        /// Provider for endpoints with score `<= 5`.
        fastest: String,
        /// Provider for everything in between.
        balanced: String,
    },
    /// An ordered `pattern -> provider` glob list, first match wins. Must
    /// end in a `*` fallback rule.
    Manual {
        /// Rules tried in order.
        rules: Vec<ManualRuleConfig>,
    },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::RoundRobin {
            providers: Vec::new(),
        }
    }
}

impl StrategyConfig {
    /// Provider names this strategy references, for cross-checking against
    /// the configured `[providers]` table.
    #[must_use]
    pub fn referenced_providers(&self) -> Vec<&str> {
        match self {
            Self::RoundRobin { providers } | Self::Random { providers, .. } => {
                providers.iter().map(String::as_str).collect()
            }
            Self::Complexity {
                strongest,
                fastest,
                balanced,
            } => vec![strongest.as_str(), fastest.as_str(), balanced.as_str()],
            Self::Manual { rules } => rules.iter().map(|r| r.provider.as_str()).collect(),
        }
    }

    /// Resolve this configuration into a runtime [`AssignmentStrategy`].
    #[must_use]
    pub fn into_assignment_strategy(
        self,
        endpoint_count: usize,
        spec_fingerprint: &str,
    ) -> AssignmentStrategy {
        match self {
            Self::RoundRobin { providers } => AssignmentStrategy::RoundRobin { providers },
            Self::Random { providers, seed } => AssignmentStrategy::Random {
                seed: seed.unwrap_or_else(|| default_seed(endpoint_count, spec_fingerprint)),
                providers,
            },
            Self::Complexity {
                strongest,
                fastest,
                balanced,
            } => AssignmentStrategy::Complexity {
                roles: ComplexityRoles {
                    strongest,
                    fastest,
                    balanced,
                },
            },
            Self::Manual { rules } => AssignmentStrategy::Manual {
                rules: rules
                    .into_iter()
                    .map(|r| match r.method {
                        Some(method) => ManualRule::with_method(method, r.pattern, r.provider),
                        None => ManualRule::new(r.pattern, r.provider),
                    })
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_round_trips_through_toml() {
        let cfg = StrategyConfig::RoundRobin {
            providers: vec!["glm".into(), "qwen".into()],
        };
        let text = toml::to_string(&cfg).unwrap();
        let back: StrategyConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn random_without_seed_derives_one() {
        let cfg = StrategyConfig::Random {
            providers: vec!["glm".into()],
            seed: None,
        };
        let strategy = cfg.into_assignment_strategy(3, "fingerprint-a");
        match strategy {
            AssignmentStrategy::Random { seed, .. } => assert_eq!(
                seed,
                default_seed(3, "fingerprint-a")
            ),
            other => panic!("expected Random, got {other:?}"),
        }
    }

    #[test]
    fn random_with_explicit_seed_is_preserved() {
        let cfg = StrategyConfig::Random {
            providers: vec!["glm".into()],
            seed: Some(42),
        };
        let strategy = cfg.into_assignment_strategy(3, "fingerprint-a");
        match strategy {
            AssignmentStrategy::Random { seed, .. } => assert_eq!(seed, 42),
            other => panic!("expected Random, got {other:?}"),
        }
    }

    #[test]
    fn referenced_providers_covers_manual_rules() {
        let cfg = StrategyConfig::Manual {
            rules: vec![
                ManualRuleConfig {
                    method: None,
                    pattern: "/admin/**".into(),
                    provider: "glm".into(),
                },
                ManualRuleConfig {
                    method: None,
                    pattern: "*".into(),
                    provider: "qwen".into(),
                },
            ],
        };
        assert_eq!(cfg.referenced_providers(), vec!["glm", "qwen"]);
    }

    #[test]
    fn manual_rule_with_method_resolves_to_a_method_restricted_rule() {
        let cfg = StrategyConfig::Manual {
            rules: vec![ManualRuleConfig {
                method: Some(Method::Get),
                pattern: "/users/*".into(),
                provider: "glm".into(),
            }],
        };
        let strategy = cfg.into_assignment_strategy(1, "fp");
        match strategy {
            AssignmentStrategy::Manual { rules } => {
                assert_eq!(rules[0].method, Some(Method::Get));
            }
            other => panic!("expected Manual, got {other:?}"),
        }
    }

    #[test]
    fn complexity_resolves_to_three_roles() {
        let cfg = StrategyConfig::Complexity {
            strongest: "deepseek".into(),
            fastest: "glm".into(),
            balanced: "qwen".into(),
        };
        let strategy = cfg.into_assignment_strategy(1, "fp");
        match strategy {
            AssignmentStrategy::Complexity { roles } => {
                assert_eq!(roles.strongest, "deepseek");
                assert_eq!(roles.fastest, "glm");
                assert_eq!(roles.balanced, "qwen");
            }
            other => panic!("expected Complexity, got {other:?}"),
        }
    }
}
