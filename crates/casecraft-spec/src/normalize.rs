// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalizes a Swagger 2.0 document into the OpenAPI 3.0 operation shape
//! that [`crate::endpoint_builder`] understands: `consumes`/`produces` and
//! `in: body` parameters collapse into a single `requestBody.content`
//! schema, and each response's bare `schema` moves under
//! `content.<media-type>.schema`.
//!
//! `$ref` strings are left untouched — Swagger's `#/definitions/...` and
//! OpenAPI's `#/components/schemas/...` both resolve the same way since
//! [`crate::schema_convert`] follows whatever pointer the document gives it
//! without assuming a dialect-specific root.

use serde_json::{Map, Value, json};

const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Rewrite a Swagger 2.0 document into OpenAPI-3-shaped paths in place,
/// returning the rewritten document.
#[must_use]
pub fn to_openapi3_shape(doc: &Value) -> Value {
    let mut out = doc.clone();
    let global_consumes = media_types(doc, "consumes");
    let global_produces = media_types(doc, "produces");

    let Some(paths) = out.get_mut("paths").and_then(Value::as_object_mut) else {
        return out;
    };

    for (_path, item) in paths.iter_mut() {
        let Some(item_obj) = item.as_object_mut() else {
            continue;
        };
        for method in [
            "get", "post", "put", "patch", "delete", "head", "options",
        ] {
            if let Some(op) = item_obj.get_mut(method) {
                normalize_operation(op, &global_consumes, &global_produces);
            }
        }
    }

    out
}

fn media_types(doc: &Value, key: &str) -> Vec<String> {
    doc.get(key)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).map(String::from).collect())
        .filter(|v: &Vec<String>| !v.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_MEDIA_TYPE.to_string()])
}

fn normalize_operation(op: &mut Value, global_consumes: &[String], global_produces: &[String]) {
    let Some(op_obj) = op.as_object_mut() else {
        return;
    };

    let consumes = media_types(op, "consumes");
    let consumes = if consumes == [DEFAULT_MEDIA_TYPE] {
        global_consumes.to_vec()
    } else {
        consumes
    };
    let produces = media_types(op, "produces");
    let produces = if produces == [DEFAULT_MEDIA_TYPE] {
        global_produces.to_vec()
    } else {
        produces
    };

    if let Some(Value::Array(params)) = op_obj.get("parameters") {
        let mut body_schema: Option<Value> = None;
        let mut body_required = false;
        let mut kept = Vec::new();
        for param in params {
            if param.get("in").and_then(Value::as_str) == Some("body") {
                body_schema = param.get("schema").cloned();
                body_required = param
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
            } else if param.get("in").and_then(Value::as_str) == Some("formData") {
                // formData collapses into the body content; out of scope for
                // typed generation, dropped rather than partially modeled.
                continue;
            } else {
                kept.push(param.clone());
            }
        }
        op_obj.insert("parameters".into(), Value::Array(kept));

        if let Some(schema) = body_schema {
            let mut content = Map::new();
            for media in &consumes {
                content.insert(media.clone(), json!({"schema": schema}));
            }
            op_obj.insert(
                "requestBody".into(),
                json!({"required": body_required, "content": content}),
            );
        }
    }

    if let Some(Value::Object(responses)) = op_obj.get_mut("responses") {
        for (_status, resp) in responses.iter_mut() {
            let Some(resp_obj) = resp.as_object_mut() else {
                continue;
            };
            if let Some(schema) = resp_obj.remove("schema") {
                let mut content = Map::new();
                for media in &produces {
                    content.insert(media.clone(), json!({"schema": schema.clone()}));
                }
                resp_obj.insert("content".into(), Value::Object(content));
            }
        }
    }
}
