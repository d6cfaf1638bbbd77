// SPDX-License-Identifier: MIT OR Apache-2.0
//! Content-addressed fingerprinting of [`Endpoint`]s.
//!
//! Serializes a normalized projection of the endpoint to a
//! `serde_json::Value` (whose object maps are `BTreeMap`-backed and
//! therefore key-sorted), stringifies that, and SHA-256s the bytes.
//! Cosmetic fields never enter the projection.

use crate::endpoint::Endpoint;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A hex-encoded SHA-256 fingerprint of an endpoint's semantic content.
pub type Fingerprint = String;

/// Canonical projection of an [`Endpoint`] used as fingerprint input.
///
/// Only semantic fields are included: method, path, parameters (sorted by
/// name + location), request body schema, response schemas, and auth.
/// `summary`, `description`, and tag *order* are deliberately omitted —
/// tag *membership* is not, since adding or removing a tag changes what the
/// endpoint is grouped under downstream.
#[derive(Serialize)]
struct CanonicalEndpoint<'a> {
    method: &'a str,
    path: &'a str,
    tags: Vec<&'a str>,
    parameters: Vec<CanonicalParameter<'a>>,
    request_body: &'a Option<crate::schema::SchemaNode>,
    responses: &'a std::collections::BTreeMap<String, crate::schema::SchemaNode>,
    auth_required: bool,
    auth_scheme: &'a crate::endpoint::AuthSchemeKind,
}

#[derive(Serialize)]
struct CanonicalParameter<'a> {
    name: &'a str,
    location: &'a crate::endpoint::ParamLocation,
    schema: &'a crate::schema::SchemaNode,
    required: bool,
}

/// Compute the hex-encoded SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Produce a stable fingerprint for an [`Endpoint`].
///
/// Reordering `tags` or editing `summary`/`description` never changes the
/// result; any semantic change (method, path, a parameter's location or
/// schema, body/response shape, auth) always does.
///
/// # Panics
///
/// Panics only if the canonical projection cannot be serialized, which
/// would indicate a bug in [`SchemaNode`](crate::schema::SchemaNode)'s
/// `Serialize` impl rather than a caller error.
#[must_use]
pub fn fingerprint(endpoint: &Endpoint) -> Fingerprint {
    let mut tags: Vec<&str> = endpoint.tags.iter().map(String::as_str).collect();
    tags.sort_unstable();
    tags.dedup();

    let mut parameters: Vec<CanonicalParameter<'_>> = endpoint
        .parameters
        .iter()
        .map(|p| CanonicalParameter {
            name: &p.name,
            location: &p.location,
            schema: &p.schema,
            required: p.required,
        })
        .collect();
    parameters.sort_by(|a, b| (a.name, *a.location as i32).cmp(&(b.name, *b.location as i32)));

    let canonical = CanonicalEndpoint {
        method: endpoint.method.as_str(),
        path: &endpoint.path,
        tags,
        parameters,
        request_body: &endpoint.request_body,
        responses: &endpoint.responses,
        auth_required: endpoint.auth.required,
        auth_scheme: &endpoint.auth.scheme,
    };

    let value = serde_json::to_value(&canonical).expect("canonical endpoint always serializes");
    let json = serde_json::to_string(&value).expect("serde_json::Value always serializes");
    sha256_hex(json.as_bytes())
}
