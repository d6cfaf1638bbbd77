// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure rendering helpers: endpoint fields and schema trees into the plain
//! text a prompt embeds. Kept separate from [`crate::build`] so the
//! formatting choices are unit-testable in isolation.

use casecraft_contract::endpoint::{Endpoint, ParamLocation, Parameter};
use casecraft_contract::schema::SchemaNode;

/// Render a parameter list for one [`ParamLocation`] as a bullet list, or
/// `"(none)"` if the endpoint declares none at that location.
#[must_use]
pub fn render_parameters(endpoint: &Endpoint, location: ParamLocation) -> String {
    let matching: Vec<&Parameter> = endpoint
        .parameters
        .iter()
        .filter(|p| p.location == location)
        .collect();

    if matching.is_empty() {
        return "(none)".to_string();
    }

    matching
        .iter()
        .map(|p| {
            format!(
                "- {} ({}{}): {}",
                p.name,
                render_schema_kind(&p.schema),
                if p.required { ", required" } else { "" },
                render_schema_compact(&p.schema)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a schema as pretty JSON, or `"(none)"` for an absent body.
#[must_use]
pub fn render_schema(schema: Option<&SchemaNode>) -> String {
    match schema {
        None => "(none)".to_string(),
        Some(s) => serde_json::to_string_pretty(s).unwrap_or_else(|_| "(unrenderable)".into()),
    }
}

/// Render the endpoint's response schemas, one block per status code, in
/// ascending status-code order (the map is already a `BTreeMap`).
#[must_use]
pub fn render_responses(endpoint: &Endpoint) -> String {
    if endpoint.responses.is_empty() {
        return "(none declared)".to_string();
    }
    endpoint
        .responses
        .iter()
        .map(|(status, schema)| format!("{status}:\n{}", render_schema(Some(schema))))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_schema_kind(schema: &SchemaNode) -> &'static str {
    match schema {
        SchemaNode::String => "string",
        SchemaNode::Number => "number",
        SchemaNode::Integer => "integer",
        SchemaNode::Boolean => "boolean",
        SchemaNode::Null => "null",
        SchemaNode::Any => "any",
        SchemaNode::Array { .. } => "array",
        SchemaNode::Object { .. } => "object",
        SchemaNode::Ref { .. } => "ref",
    }
}

fn render_schema_compact(schema: &SchemaNode) -> String {
    serde_json::to_string(schema).unwrap_or_else(|_| "{}".into())
}
