// SPDX-License-Identifier: MIT OR Apache-2.0
//! Detects whether a parsed spec document is OpenAPI 3.0 or Swagger 2.0.

use serde_json::Value;

/// Which spec dialect a document is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecDialect {
    /// OpenAPI 3.0.x, keyed by a top-level `"openapi"` field.
    OpenApi3,
    /// Swagger 2.0, keyed by a top-level `"swagger"` field.
    Swagger2,
}

impl SpecDialect {
    /// Human-readable label for error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenApi3 => "OpenAPI 3.0",
            Self::Swagger2 => "Swagger 2.0",
        }
    }
}

impl std::fmt::Display for SpecDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Detect the dialect of a parsed document.
///
/// Returns `None` when neither a `"openapi": "3.x"` nor a `"swagger": "2.0"`
/// field is present, or the version string is of a different major
/// version than what is supported.
#[must_use]
pub fn detect(doc: &Value) -> Option<SpecDialect> {
    let obj = doc.as_object()?;

    if let Some(v) = obj.get("openapi").and_then(Value::as_str)
        && v.starts_with("3.")
    {
        return Some(SpecDialect::OpenApi3);
    }
    if let Some(v) = obj.get("swagger").and_then(Value::as_str)
        && v == "2.0"
    {
        return Some(SpecDialect::Swagger2);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_openapi3() {
        let doc = json!({"openapi": "3.0.1", "paths": {}});
        assert_eq!(detect(&doc), Some(SpecDialect::OpenApi3));
    }

    #[test]
    fn detects_swagger2() {
        let doc = json!({"swagger": "2.0", "paths": {}});
        assert_eq!(detect(&doc), Some(SpecDialect::Swagger2));
    }

    #[test]
    fn rejects_unsupported_major_version() {
        let doc = json!({"openapi": "2.5.0"});
        assert_eq!(detect(&doc), None);
    }

    #[test]
    fn rejects_non_object() {
        assert_eq!(detect(&json!([1, 2, 3])), None);
        assert_eq!(detect(&json!(null)), None);
    }

    #[test]
    fn rejects_document_with_neither_key() {
        assert_eq!(detect(&json!({"paths": {}})), None);
    }
}
