// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derives a filesystem-safe path slug from an endpoint's method and path.

use casecraft_contract::endpoint::{Endpoint, Method};

/// Lowercase the method and flatten `path` into a single slug: path
/// separators become underscores, path-parameter braces are dropped.
///
/// `GET /users/{id}/orders` → `get_users_id_orders`.
#[must_use]
pub fn path_slug(method: Method, path: &str) -> String {
    let flattened: String = path
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    let trimmed = flattened.trim_matches('_');
    let method = method.as_str().to_ascii_lowercase();
    if trimmed.is_empty() {
        method
    } else {
        format!("{method}_{trimmed}")
    }
}

/// Convenience wrapper over [`path_slug`] for an [`Endpoint`].
#[must_use]
pub fn endpoint_slug(endpoint: &Endpoint) -> String {
    path_slug(endpoint.method, &endpoint.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_separators_and_drops_braces() {
        assert_eq!(path_slug(Method::Get, "/users/{id}/orders"), "get_users_id_orders");
    }

    #[test]
    fn root_path_has_no_trailing_underscore() {
        assert_eq!(path_slug(Method::Get, "/"), "get");
    }

    #[test]
    fn method_is_lowercased() {
        assert_eq!(path_slug(Method::Post, "/x"), "post_x");
    }
}
