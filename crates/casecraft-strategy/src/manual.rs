// SPDX-License-Identifier: MIT OR Apache-2.0
//! Manual assignment: an ordered `pattern:provider` glob list, first match
//! wins, as an ordered priority list rather than an include/exclude pair.

use casecraft_contract::endpoint::Method;
use casecraft_error::CaseCraftError;
use globset::Glob;

/// One `method:pattern -> provider` rule in a
/// [`crate::AssignmentStrategy::Manual`] list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualRule {
    /// HTTP method the rule is restricted to, or `None` to match any method.
    pub method: Option<Method>,
    /// Glob pattern matched against the endpoint's path.
    pub pattern: String,
    /// Provider name assigned when this rule matches.
    pub provider: String,
}

impl ManualRule {
    /// Construct a rule that matches any HTTP method.
    #[must_use]
    pub fn new(pattern: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            method: None,
            pattern: pattern.into(),
            provider: provider.into(),
        }
    }

    /// Construct a rule restricted to a single HTTP method.
    #[must_use]
    pub fn with_method(method: Method, pattern: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            pattern: pattern.into(),
            provider: provider.into(),
        }
    }
}

/// Validate that `rules` ends in a wildcard fallback (a literal `*`
/// pattern), so every endpoint is guaranteed to match something.
pub fn require_wildcard_fallback(rules: &[ManualRule]) -> Result<(), CaseCraftError> {
    match rules.last() {
        Some(last) if last.pattern == "*" => Ok(()),
        _ => Err(CaseCraftError::Config {
            reason: "manual assignment strategy requires a trailing '*' wildcard fallback rule"
                .to_string(),
        }),
    }
}

/// Resolve the provider for `(method, path)` by trying each rule in order
/// and returning the first match's provider. A rule with `method: None`
/// matches any method; otherwise the method must match exactly.
///
/// # Errors
/// Returns a [`CaseCraftError::Config`] if nothing matches (callers should
/// have validated [`require_wildcard_fallback`] beforehand to make this
/// unreachable) or if a pattern fails to compile.
pub fn resolve(rules: &[ManualRule], method: Method, path: &str) -> Result<String, CaseCraftError> {
    for rule in rules {
        if rule.method.is_some_and(|m| m != method) {
            continue;
        }
        let glob = Glob::new(&rule.pattern)
            .map_err(|e| CaseCraftError::Config {
                reason: format!("invalid manual assignment glob '{}': {e}", rule.pattern),
            })?
            .compile_matcher();
        if glob.is_match(path) {
            return Ok(rule.provider.clone());
        }
    }
    Err(CaseCraftError::Config {
        reason: format!("no manual assignment rule matched {method} '{path}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_over_later_matching_rules() {
        let rules = vec![
            ManualRule::new("/admin/**", "glm"),
            ManualRule::new("*", "qwen"),
        ];
        assert_eq!(resolve(&rules, Method::Get, "/admin/users").unwrap(), "glm");
        assert_eq!(resolve(&rules, Method::Get, "/public/users").unwrap(), "qwen");
    }

    #[test]
    fn method_restricted_rules_route_differently_by_method() {
        let rules = vec![
            ManualRule::with_method(Method::Get, "/users/*", "glm"),
            ManualRule::with_method(Method::Post, "/users/*", "qwen"),
            ManualRule::new("*", "deepseek"),
        ];
        assert_eq!(resolve(&rules, Method::Get, "/users/1").unwrap(), "glm");
        assert_eq!(resolve(&rules, Method::Post, "/users/1").unwrap(), "qwen");
        assert_eq!(resolve(&rules, Method::Delete, "/users/1").unwrap(), "deepseek");
    }

    #[test]
    fn missing_wildcard_fallback_is_rejected() {
        let rules = vec![ManualRule::new("/admin/**", "glm")];
        assert!(require_wildcard_fallback(&rules).is_err());
    }

    #[test]
    fn trailing_wildcard_passes_validation() {
        let rules = vec![
            ManualRule::new("/admin/**", "glm"),
            ManualRule::new("*", "qwen"),
        ];
        assert!(require_wildcard_fallback(&rules).is_ok());
    }

    #[test]
    fn no_match_without_fallback_is_a_config_error() {
        let rules = vec![ManualRule::new("/admin/**", "glm")];
        let err = resolve(&rules, Method::Get, "/public/users").unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }
}
