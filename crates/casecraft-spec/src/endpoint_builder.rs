// SPDX-License-Identifier: MIT OR Apache-2.0
//! Walks an OpenAPI-3-shaped document's `paths` object into a flat,
//! document-order [`Vec<Endpoint>`].

use crate::schema_convert;
use casecraft_contract::endpoint::{
    AuthRequirement, AuthSchemeKind, Endpoint, Method, ParamLocation, Parameter,
};
use casecraft_contract::schema::SchemaNode;
use casecraft_error::CaseCraftError;
use serde_json::Value;
use std::collections::BTreeMap;

const METHODS: [(&str, Method); 7] = [
    ("get", Method::Get),
    ("post", Method::Post),
    ("put", Method::Put),
    ("patch", Method::Patch),
    ("delete", Method::Delete),
    ("head", Method::Head),
    ("options", Method::Options),
];

/// Build the flat endpoint list from an OpenAPI-3-shaped document, in the
/// order paths and methods appear in the source.
pub fn build(doc: &Value) -> Result<Vec<Endpoint>, CaseCraftError> {
    let paths = doc
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| CaseCraftError::Spec {
            reason: "document has no \"paths\" object".into(),
            line: None,
        })?;

    let mut endpoints = Vec::new();
    for (path, item) in paths {
        let Some(item_obj) = item.as_object() else {
            continue;
        };
        let shared_params = item_obj
            .get("parameters")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for (key, method) in METHODS {
            let Some(op) = item_obj.get(key) else {
                continue;
            };
            endpoints.push(build_endpoint(
                *method,
                path,
                op,
                &shared_params,
                doc,
            )?);
        }
    }
    Ok(endpoints)
}

fn build_endpoint(
    method: Method,
    path: &str,
    op: &Value,
    shared_params: &[Value],
    doc: &Value,
) -> Result<Endpoint, CaseCraftError> {
    let tags = op
        .get("tags")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default();
    let summary = op.get("summary").and_then(Value::as_str).map(String::from);
    let description = op
        .get("description")
        .and_then(Value::as_str)
        .map(String::from);

    let op_params = op
        .get("parameters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut parameters = Vec::new();
    for raw in shared_params.iter().chain(op_params.iter()) {
        if let Some(p) = build_parameter(raw, doc)? {
            parameters.push(p);
        }
    }

    let request_body = op
        .get("requestBody")
        .and_then(|rb| rb.get("content"))
        .and_then(pick_media_schema)
        .map(|schema| schema_convert::convert(schema, doc))
        .transpose()?;

    let responses = build_responses(op, doc)?;
    let auth = build_auth(op, doc);

    Ok(Endpoint {
        method,
        path: path.to_string(),
        tags,
        summary,
        description,
        parameters,
        request_body,
        responses,
        auth,
    })
}

fn build_parameter(raw: &Value, doc: &Value) -> Result<Option<Parameter>, CaseCraftError> {
    let Some(name) = raw.get("name").and_then(Value::as_str) else {
        return Ok(None);
    };
    let Some(location) = raw.get("in").and_then(Value::as_str).and_then(parse_location) else {
        return Ok(None);
    };
    let required = raw
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let schema = match raw.get("schema") {
        Some(s) => schema_convert::convert(s, doc)?,
        None => schema_convert::convert(raw, doc)?,
    };
    Ok(Some(Parameter {
        name: name.to_string(),
        location,
        schema,
        required,
    }))
}

fn parse_location(raw: &str) -> Option<ParamLocation> {
    match raw {
        "path" => Some(ParamLocation::Path),
        "query" => Some(ParamLocation::Query),
        "header" => Some(ParamLocation::Header),
        "cookie" => Some(ParamLocation::Cookie),
        _ => None,
    }
}

fn build_responses(
    op: &Value,
    doc: &Value,
) -> Result<BTreeMap<String, SchemaNode>, CaseCraftError> {
    let mut responses = BTreeMap::new();
    let Some(Value::Object(raw_responses)) = op.get("responses") else {
        return Ok(responses);
    };
    for (status, resp) in raw_responses {
        let schema = resp
            .get("content")
            .and_then(pick_media_schema)
            .map(|s| schema_convert::convert(s, doc))
            .transpose()?
            .unwrap_or(SchemaNode::Any);
        responses.insert(status.clone(), schema);
    }
    Ok(responses)
}

fn pick_media_schema(content: &Value) -> Option<&Value> {
    let obj = content.as_object()?;
    obj.get("application/json")
        .or_else(|| obj.values().next())
        .and_then(|mt| mt.get("schema"))
}

fn build_auth(op: &Value, doc: &Value) -> AuthRequirement {
    let security = op
        .get("security")
        .or_else(|| doc.get("security"))
        .and_then(Value::as_array);

    let Some(security) = security else {
        return AuthRequirement::default();
    };
    if security.is_empty() {
        return AuthRequirement::default();
    }

    let scheme_name = security
        .first()
        .and_then(Value::as_object)
        .and_then(|m| m.keys().next())
        .cloned();

    let scheme = scheme_name
        .and_then(|name| lookup_scheme_kind(doc, &name))
        .unwrap_or(AuthSchemeKind::None);

    AuthRequirement {
        required: true,
        scheme,
    }
}

fn lookup_scheme_kind(doc: &Value, name: &str) -> Option<AuthSchemeKind> {
    let scheme = doc
        .pointer(&format!("/components/securitySchemes/{name}"))
        .or_else(|| doc.pointer(&format!("/securityDefinitions/{name}")))?;

    let ty = scheme.get("type").and_then(Value::as_str)?;
    let http_scheme = scheme.get("scheme").and_then(Value::as_str);

    Some(match (ty, http_scheme) {
        ("http", Some("basic")) => AuthSchemeKind::Basic,
        ("http", _) => AuthSchemeKind::Bearer,
        ("apiKey", _) => AuthSchemeKind::ApiKey,
        ("basic", _) => AuthSchemeKind::Basic,
        _ => AuthSchemeKind::Bearer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_one_get() -> Value {
        json!({
            "openapi": "3.0.1",
            "paths": {
                "/users/{id}": {
                    "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}],
                    "get": {
                        "tags": ["users"],
                        "summary": "Get a user",
                        "parameters": [{"name": "verbose", "in": "query", "schema": {"type": "boolean"}}],
                        "responses": {
                            "200": {"content": {"application/json": {"schema": {"type": "object"}}}}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn builds_one_endpoint_with_shared_and_op_params() {
        let doc = doc_with_one_get();
        let endpoints = build(&doc).unwrap();
        assert_eq!(endpoints.len(), 1);
        let ep = &endpoints[0];
        assert_eq!(ep.method, Method::Get);
        assert_eq!(ep.path, "/users/{id}");
        assert_eq!(ep.parameters.len(), 2);
        assert!(ep.parameters.iter().any(|p| p.name == "id" && p.location == ParamLocation::Path));
        assert!(ep.parameters.iter().any(|p| p.name == "verbose" && p.location == ParamLocation::Query));
    }

    #[test]
    fn response_schema_picked_from_application_json() {
        let doc = doc_with_one_get();
        let endpoints = build(&doc).unwrap();
        assert!(endpoints[0].responses.contains_key("200"));
    }

    #[test]
    fn document_order_is_preserved_across_methods() {
        let doc = json!({
            "openapi": "3.0.1",
            "paths": {
                "/a": {"get": {"responses": {}}, "post": {"responses": {}}}
            }
        });
        let endpoints = build(&doc).unwrap();
        assert_eq!(endpoints[0].method, Method::Get);
        assert_eq!(endpoints[1].method, Method::Post);
    }

    #[test]
    fn document_order_is_preserved_across_distinct_paths() {
        let doc = json!({
            "openapi": "3.0.1",
            "paths": {
                "/zebra": {"get": {"responses": {}}},
                "/apple": {"get": {"responses": {}}},
                "/mango": {"get": {"responses": {}}}
            }
        });
        let endpoints = build(&doc).unwrap();
        let paths: Vec<&str> = endpoints.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/zebra", "/apple", "/mango"]);
    }

    #[test]
    fn missing_paths_is_fatal() {
        let err = build(&json!({"openapi": "3.0.1"})).unwrap_err();
        assert!(matches!(err, CaseCraftError::Spec { .. }));
    }

    #[test]
    fn auth_required_resolves_bearer_scheme() {
        let doc = json!({
            "openapi": "3.0.1",
            "components": {"securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}}},
            "paths": {
                "/secure": {
                    "get": {"security": [{"bearerAuth": []}], "responses": {}}
                }
            }
        });
        let endpoints = build(&doc).unwrap();
        assert!(endpoints[0].auth.required);
        assert_eq!(endpoints[0].auth.scheme, AuthSchemeKind::Bearer);
    }

    #[test]
    fn no_security_means_auth_not_required() {
        let doc = json!({"openapi": "3.0.1", "paths": {"/open": {"get": {"responses": {}}}}});
        let endpoints = build(&doc).unwrap();
        assert!(!endpoints[0].auth.required);
    }
}
