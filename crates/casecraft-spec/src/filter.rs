// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path-glob, tag, and method filtering over a flat endpoint list.
//!
//! Include filters are intersections (an empty include list means "no
//! restriction"); exclude filters are removals applied after include.

use casecraft_contract::endpoint::{Endpoint, Method};
use casecraft_error::CaseCraftError;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// A set of include/exclude criteria applied to an endpoint list.
#[derive(Debug, Default, Clone)]
pub struct EndpointFilter {
    /// Glob patterns a path must match at least one of, when non-empty.
    pub include_paths: Vec<String>,
    /// Glob patterns that remove a path if any matches.
    pub exclude_paths: Vec<String>,
    /// Tags an endpoint must carry at least one of, when non-empty.
    pub include_tags: Vec<String>,
    /// Tags that remove an endpoint if any is carried.
    pub exclude_tags: Vec<String>,
    /// Methods an endpoint's method must be one of, when non-empty.
    pub include_methods: Vec<Method>,
    /// Methods that remove an endpoint if matched.
    pub exclude_methods: Vec<Method>,
}

impl EndpointFilter {
    /// Apply this filter to `endpoints`, preserving document order.
    pub fn apply(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>, CaseCraftError> {
        let include_paths = build_glob_set(&self.include_paths)?;
        let exclude_paths = build_glob_set(&self.exclude_paths)?;

        Ok(endpoints
            .into_iter()
            .filter(|ep| self.passes_method(ep.method))
            .filter(|ep| self.passes_tags(&ep.tags))
            .filter(|ep| passes_paths(&ep.path, &include_paths, &exclude_paths))
            .collect())
    }

    fn passes_method(&self, method: Method) -> bool {
        if !self.include_methods.is_empty() && !self.include_methods.contains(&method) {
            return false;
        }
        !self.exclude_methods.contains(&method)
    }

    fn passes_tags(&self, tags: &[String]) -> bool {
        if !self.include_tags.is_empty()
            && !tags.iter().any(|t| self.include_tags.contains(t))
        {
            return false;
        }
        !tags.iter().any(|t| self.exclude_tags.contains(t))
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>, CaseCraftError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for p in patterns {
        let glob = Glob::new(p).map_err(|e| CaseCraftError::Config {
            reason: format!("invalid path glob {p:?}: {e}"),
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|e| CaseCraftError::Config {
        reason: format!("failed to build path glob set: {e}"),
    })?;
    Ok(Some(set))
}

fn passes_paths(path: &str, include: &Option<GlobSet>, exclude: &Option<GlobSet>) -> bool {
    if let Some(set) = include
        && !set.is_match(path)
    {
        return false;
    }
    if let Some(set) = exclude
        && set.is_match(path)
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_contract::endpoint::AuthRequirement;
    use std::collections::BTreeMap;

    fn ep(method: Method, path: &str, tags: &[&str]) -> Endpoint {
        Endpoint {
            method,
            path: path.into(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            summary: None,
            description: None,
            parameters: vec![],
            request_body: None,
            responses: BTreeMap::new(),
            auth: AuthRequirement::default(),
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let endpoints = vec![ep(Method::Get, "/a", &[]), ep(Method::Post, "/b", &[])];
        let filter = EndpointFilter::default();
        assert_eq!(filter.apply(endpoints).unwrap().len(), 2);
    }

    #[test]
    fn include_path_glob_is_intersection() {
        let endpoints = vec![
            ep(Method::Get, "/users", &[]),
            ep(Method::Get, "/users/{id}", &[]),
            ep(Method::Get, "/pets", &[]),
        ];
        let filter = EndpointFilter {
            include_paths: vec!["/users*".into()],
            ..Default::default()
        };
        let result = filter.apply(endpoints).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|e| e.path.starts_with("/users")));
    }

    #[test]
    fn exclude_applied_after_include() {
        let endpoints = vec![
            ep(Method::Get, "/users", &[]),
            ep(Method::Get, "/users/{id}", &[]),
        ];
        let filter = EndpointFilter {
            include_paths: vec!["/users*".into()],
            exclude_paths: vec!["/users/{id}".into()],
            ..Default::default()
        };
        let result = filter.apply(endpoints).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "/users");
    }

    #[test]
    fn tag_and_method_filters() {
        let endpoints = vec![
            ep(Method::Get, "/a", &["public"]),
            ep(Method::Delete, "/b", &["admin"]),
            ep(Method::Get, "/c", &["admin"]),
        ];
        let filter = EndpointFilter {
            include_tags: vec!["admin".into()],
            exclude_methods: vec![Method::Delete],
            ..Default::default()
        };
        let result = filter.apply(endpoints).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "/c");
    }

    #[test]
    fn invalid_glob_is_config_error() {
        let filter = EndpointFilter {
            include_paths: vec!["[".into()],
            ..Default::default()
        };
        let err = filter.apply(vec![]).unwrap_err();
        assert!(matches!(err, CaseCraftError::Config { .. }));
    }

    #[test]
    fn document_order_is_preserved_through_filtering() {
        let endpoints = vec![
            ep(Method::Get, "/a", &[]),
            ep(Method::Get, "/b", &[]),
            ep(Method::Get, "/c", &[]),
        ];
        let filter = EndpointFilter::default();
        let result = filter.apply(endpoints).unwrap();
        assert_eq!(
            result.iter().map(|e| e.path.clone()).collect::<Vec<_>>(),
            vec!["/a", "/b", "/c"]
        );
    }
}
