// SPDX-License-Identifier: MIT OR Apache-2.0
//! Converts raw JSON-Schema-shaped [`Value`]s into [`SchemaNode`], resolving
//! local `$ref` pointers against the full document.
//!
//! A ref that reappears while it is still being resolved (a cycle) is left
//! as a [`SchemaNode::Ref`] rather than expanded further — see the module
//! docs on `casecraft_contract::schema` for why.

use casecraft_contract::schema::SchemaNode;
use casecraft_error::CaseCraftError;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Convert a raw schema value into a [`SchemaNode`], resolving any local
/// `$ref` pointers against `doc`.
pub fn convert(value: &Value, doc: &Value) -> Result<SchemaNode, CaseCraftError> {
    let mut visiting = HashSet::new();
    convert_inner(value, doc, &mut visiting)
}

fn convert_inner(
    value: &Value,
    doc: &Value,
    visiting: &mut HashSet<String>,
) -> Result<SchemaNode, CaseCraftError> {
    let Some(obj) = value.as_object() else {
        return Ok(SchemaNode::Any);
    };

    if let Some(Value::String(ptr)) = obj.get("$ref") {
        if !ptr.starts_with('#') {
            return Err(CaseCraftError::Spec {
                reason: format!("external $ref is not supported: {ptr}"),
                line: None,
            });
        }
        if visiting.contains(ptr) {
            return Ok(SchemaNode::Ref { id: ptr.clone() });
        }
        let resolved = resolve_pointer(doc, ptr)?;
        visiting.insert(ptr.clone());
        let node = convert_inner(resolved, doc, visiting)?;
        visiting.remove(ptr);
        return Ok(node);
    }

    if let Some(Value::Array(variants)) = obj.get("allOf") {
        return merge_all_of(variants, doc, visiting);
    }

    if let Some(Value::String(ty)) = obj.get("type") {
        return match ty.as_str() {
            "string" => Ok(SchemaNode::String),
            "number" => Ok(SchemaNode::Number),
            "integer" => Ok(SchemaNode::Integer),
            "boolean" => Ok(SchemaNode::Boolean),
            "null" => Ok(SchemaNode::Null),
            "array" => {
                let items = obj
                    .get("items")
                    .map(|v| convert_inner(v, doc, visiting))
                    .transpose()?
                    .unwrap_or(SchemaNode::Any);
                Ok(SchemaNode::Array {
                    items: Box::new(items),
                })
            }
            "object" => convert_object(obj, doc, visiting),
            _ => Ok(SchemaNode::Any),
        };
    }

    if obj.contains_key("properties") {
        return convert_object(obj, doc, visiting);
    }

    Ok(SchemaNode::Any)
}

fn convert_object(
    obj: &serde_json::Map<String, Value>,
    doc: &Value,
    visiting: &mut HashSet<String>,
) -> Result<SchemaNode, CaseCraftError> {
    let mut properties = BTreeMap::new();
    if let Some(Value::Object(props)) = obj.get("properties") {
        for (name, schema) in props {
            properties.insert(name.clone(), convert_inner(schema, doc, visiting)?);
        }
    }
    let required = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    Ok(SchemaNode::object(properties, required))
}

fn merge_all_of(
    variants: &[Value],
    doc: &Value,
    visiting: &mut HashSet<String>,
) -> Result<SchemaNode, CaseCraftError> {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();
    for variant in variants {
        match convert_inner(variant, doc, visiting)? {
            SchemaNode::Object {
                properties: p,
                required: r,
            } => {
                properties.extend(p);
                required.extend(r);
            }
            _ => continue,
        }
    }
    Ok(SchemaNode::object(properties, required))
}

/// Resolve a local JSON-pointer `$ref` (e.g. `#/components/schemas/User`)
/// against `doc`.
fn resolve_pointer<'a>(doc: &'a Value, ptr: &str) -> Result<&'a Value, CaseCraftError> {
    let path = ptr.trim_start_matches('#');
    doc.pointer(path).ok_or_else(|| CaseCraftError::Spec {
        reason: format!("unresolvable $ref: {ptr}"),
        line: None,
    })
}
