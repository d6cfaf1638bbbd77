// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalized HTTP operation parsed from an OpenAPI or Swagger document.

use crate::schema::SchemaNode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP method of an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Parse a method name case-insensitively (as it appears in a spec document).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    /// The uppercase wire representation, e.g. `"GET"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a [`Parameter`] is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Path template segment, e.g. `{id}`.
    Path,
    /// Query string parameter.
    Query,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

/// A single declared parameter on an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    /// Parameter name as declared in the spec.
    pub name: String,
    /// Where the parameter is carried.
    pub location: ParamLocation,
    /// Declared schema for the parameter's value.
    pub schema: SchemaNode,
    /// Whether the parameter is required.
    pub required: bool,
}

/// Authentication scheme kind declared on an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthSchemeKind {
    /// Bearer token (e.g. JWT in `Authorization: Bearer ...`).
    Bearer,
    /// API key, typically in a header or query parameter.
    ApiKey,
    /// HTTP Basic authentication.
    Basic,
    /// No authentication required.
    None,
}

/// Declared authentication requirement for an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthRequirement {
    /// Whether authentication is required at all.
    pub required: bool,
    /// The scheme kind, when known.
    pub scheme: AuthSchemeKind,
}

impl Default for AuthRequirement {
    fn default() -> Self {
        Self {
            required: false,
            scheme: AuthSchemeKind::None,
        }
    }
}

/// A normalized HTTP operation parsed from an OpenAPI 3.0 or Swagger 2.0
/// document.
///
/// Created by the spec loader, read-only thereafter, destroyed at process
/// exit. Cosmetic fields (`summary`, `description`, tag ordering) do not
/// affect the endpoint's [`fingerprint`](crate::fingerprint::fingerprint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Endpoint {
    /// HTTP method.
    pub method: Method,
    /// Path template, e.g. `/users/{id}`.
    pub path: String,
    /// Tags in document order (order is cosmetic; set membership is semantic).
    pub tags: Vec<String>,
    /// Short summary, free text.
    pub summary: Option<String>,
    /// Longer description, free text.
    pub description: Option<String>,
    /// Declared parameters.
    pub parameters: Vec<Parameter>,
    /// Request body schema, if the operation accepts one.
    pub request_body: Option<SchemaNode>,
    /// Response schemas keyed by status code string (e.g. `"200"`, `"404"`).
    pub responses: BTreeMap<String, SchemaNode>,
    /// Declared authentication requirement.
    pub auth: AuthRequirement,
}

impl Endpoint {
    /// The `METHOD path` identity used as a state-file key and artifact
    /// filename seed.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Count of parameters at the given location.
    #[must_use]
    pub fn param_count(&self, location: ParamLocation) -> usize {
        self.parameters
            .iter()
            .filter(|p| p.location == location)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(Method::parse("get"), Some(Method::Get));
        assert_eq!(Method::parse("DELETE"), Some(Method::Delete));
        assert_eq!(Method::parse("Patch"), Some(Method::Patch));
        assert_eq!(Method::parse("trace"), None);
    }

    #[test]
    fn endpoint_key_format() {
        let ep = Endpoint {
            method: Method::Get,
            path: "/users/{id}".into(),
            tags: vec![],
            summary: None,
            description: None,
            parameters: vec![],
            request_body: None,
            responses: BTreeMap::new(),
            auth: AuthRequirement::default(),
        };
        assert_eq!(ep.key(), "GET /users/{id}");
    }

    #[test]
    fn param_count_filters_by_location() {
        let ep = Endpoint {
            method: Method::Get,
            path: "/x".into(),
            tags: vec![],
            summary: None,
            description: None,
            parameters: vec![
                Parameter {
                    name: "id".into(),
                    location: ParamLocation::Path,
                    schema: SchemaNode::String,
                    required: true,
                },
                Parameter {
                    name: "q".into(),
                    location: ParamLocation::Query,
                    schema: SchemaNode::String,
                    required: false,
                },
                Parameter {
                    name: "q2".into(),
                    location: ParamLocation::Query,
                    schema: SchemaNode::String,
                    required: false,
                },
            ],
            request_body: None,
            responses: BTreeMap::new(),
            auth: AuthRequirement::default(),
        };
        assert_eq!(ep.param_count(ParamLocation::Path), 1);
        assert_eq!(ep.param_count(ParamLocation::Query), 2);
        assert_eq!(ep.param_count(ParamLocation::Header), 0);
    }
}
