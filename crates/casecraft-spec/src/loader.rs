// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level entry point: load a spec from a URL or local path, detect its
//! dialect, normalize it, resolve refs, and produce the flat endpoint list.

use crate::{dialect, endpoint_builder, normalize};
use casecraft_contract::endpoint::Endpoint;
use casecraft_error::CaseCraftError;
use serde_json::Value;

/// Load and parse a spec document from `source`, which may be an
/// `http://`/`https://` URL or a local filesystem path.
///
/// Returns the endpoints in document order, with Swagger 2.0 documents
/// already normalized to the OpenAPI 3.0 operation shape and all local
/// `$ref`s resolved.
pub async fn load(source: &str) -> Result<Vec<Endpoint>, CaseCraftError> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source).await?
    } else {
        read_local(source)?
    };
    load_from_str(&text)
}

/// Parse and build endpoints from an already-fetched document string.
/// Tries JSON first, then YAML, matching how real-world specs are usually
/// plain JSON with the occasional YAML outlier.
pub fn load_from_str(text: &str) -> Result<Vec<Endpoint>, CaseCraftError> {
    let doc = parse_document(text)?;
    let dialect = dialect::detect(&doc).ok_or_else(|| CaseCraftError::Spec {
        reason: "document is neither a recognized OpenAPI 3.0 nor Swagger 2.0 spec".into(),
        line: None,
    })?;
    tracing::debug!(%dialect, "detected spec dialect");

    let normalized = match dialect {
        dialect::SpecDialect::OpenApi3 => doc,
        dialect::SpecDialect::Swagger2 => normalize::to_openapi3_shape(&doc),
    };

    endpoint_builder::build(&normalized)
}

fn parse_document(text: &str) -> Result<Value, CaseCraftError> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }
    serde_yaml_ng::from_str::<Value>(text).map_err(|e| CaseCraftError::Spec {
        reason: format!("document is neither valid JSON nor valid YAML: {e}"),
        line: None,
    })
}

fn read_local(path: &str) -> Result<String, CaseCraftError> {
    std::fs::read_to_string(path).map_err(|e| CaseCraftError::Spec {
        reason: format!("cannot read spec file {path:?}: {e}"),
        line: None,
    })
}

async fn fetch_url(url: &str) -> Result<String, CaseCraftError> {
    let resp = reqwest::get(url).await.map_err(|e| CaseCraftError::Spec {
        reason: format!("cannot fetch spec from {url:?}: {e}"),
        line: None,
    })?;
    resp.text().await.map_err(|e| CaseCraftError::Spec {
        reason: format!("cannot read response body from {url:?}: {e}"),
        line: None,
    })
}
