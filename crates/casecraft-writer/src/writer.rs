// SPDX-License-Identifier: MIT OR Apache-2.0
//! Atomic artifact persistence: one JSON file per endpoint, fingerprint-gated
//! so an unchanged endpoint is never rewritten.
//!
//! Uses the same write-temp-then-rename discipline as
//! `casecraft_state::state_store::StateStore`.

use casecraft_contract::endpoint::Endpoint;
use casecraft_contract::test_case::TestCase;
use casecraft_error::CaseCraftError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::slug::endpoint_slug;

/// On-disk envelope: the fingerprint that produced `test_cases`, so a
/// future run can detect whether the endpoint changed without re-parsing
/// every generated case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    /// Content fingerprint of the endpoint these cases were generated from.
    pub fingerprint: String,
    /// The generated test cases, in generation order.
    pub test_cases: Vec<TestCase>,
}

/// Outcome of a single [`ArtifactWriter::write`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written (new, or overwriting a different fingerprint).
    Written(PathBuf),
    /// An existing file already matched `fingerprint`; nothing was written.
    Skipped(PathBuf),
}

/// Writes per-endpoint artifact files under a root directory, optionally
/// nested under the endpoint's first tag.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
    nest_by_tag: bool,
}

impl ArtifactWriter {
    /// Create a writer rooted at `root`. When `nest_by_tag` is set, files
    /// are placed under a subdirectory named after the endpoint's first tag.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, nest_by_tag: bool) -> Self {
        Self {
            root: root.into(),
            nest_by_tag,
        }
    }

    /// Compute the artifact path for `endpoint` without writing anything.
    #[must_use]
    pub fn artifact_path(&self, endpoint: &Endpoint) -> PathBuf {
        let filename = format!("{}.json", endpoint_slug(endpoint));
        match (self.nest_by_tag, endpoint.tags.first()) {
            (true, Some(tag)) => self.root.join(tag).join(filename),
            _ => self.root.join(filename),
        }
    }

    /// Persist `test_cases` for `endpoint`, gated by `fingerprint`.
    ///
    /// If a file already exists at the computed path with the same
    /// fingerprint, the write is skipped. Otherwise the file is written (or
    /// overwritten) atomically.
    ///
    /// # Errors
    /// Returns [`CaseCraftError::StateIo`] if the directory cannot be
    /// created, the temp file cannot be written, or the rename fails.
    pub fn write(
        &self,
        endpoint: &Endpoint,
        fingerprint: &str,
        test_cases: Vec<TestCase>,
    ) -> Result<WriteOutcome, CaseCraftError> {
        let path = self.artifact_path(endpoint);

        if let Some(existing) = Self::read_fingerprint(&path) {
            if existing == fingerprint {
                tracing::debug!(path = %path.display(), "artifact fingerprint unchanged, skipping write");
                return Ok(WriteOutcome::Skipped(path));
            }
        }

        let envelope = ArtifactFile {
            fingerprint: fingerprint.to_string(),
            test_cases,
        };
        let json = serde_json::to_string_pretty(&envelope).map_err(|e| CaseCraftError::StateIo {
            reason: format!("cannot serialize artifact: {e}"),
            source: None,
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        use std::io::Write;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| CaseCraftError::StateIo {
            reason: format!("cannot rename temp artifact file into place: {}", e.error),
            source: None,
        })?;

        Ok(WriteOutcome::Written(path))
    }

    fn read_fingerprint(path: &Path) -> Option<String> {
        let text = std::fs::read_to_string(path).ok()?;
        let parsed: ArtifactFile = serde_json::from_str(&text).ok()?;
        Some(parsed.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_contract::budget::{Priority, TestType};
    use casecraft_contract::endpoint::{AuthRequirement, Method};
    use casecraft_contract::test_case::TestCaseMetadata;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn endpoint() -> Endpoint {
        Endpoint {
            method: Method::Get,
            path: "/users/{id}".into(),
            tags: vec!["users".into()],
            summary: None,
            description: None,
            parameters: vec![],
            request_body: None,
            responses: BTreeMap::new(),
            auth: AuthRequirement::default(),
        }
    }

    fn case(name: &str) -> TestCase {
        TestCase {
            name: name.into(),
            description: "d".into(),
            priority: Priority::P0,
            method: Method::Get,
            path: "/users/{id}".into(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            body: None,
            expected_status: 200,
            expected_response_schema: None,
            test_type: TestType::Positive,
            tags: vec![],
            metadata: TestCaseMetadata {
                generated_at: Utc::now(),
                api_version: "1.0.0".into(),
                llm_model: "glm-4".into(),
                llm_provider: "glm".into(),
            },
        }
    }

    #[test]
    fn writes_new_file_under_tag_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path(), true);
        let outcome = writer.write(&endpoint(), "fp1", vec![case("ok")]).unwrap();
        match outcome {
            WriteOutcome::Written(path) => {
                assert!(path.starts_with(dir.path().join("users")));
                assert!(path.exists());
            }
            other => panic!("expected Written, got {other:?}"),
        }
    }

    #[test]
    fn same_fingerprint_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path(), false);
        writer.write(&endpoint(), "fp1", vec![case("ok")]).unwrap();
        let second = writer.write(&endpoint(), "fp1", vec![case("ok2")]).unwrap();
        assert!(matches!(second, WriteOutcome::Skipped(_)));

        // Content must remain from the first write, not the second.
        let path = writer.artifact_path(&endpoint());
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"ok\""));
        assert!(!text.contains("\"ok2\""));
    }

    #[test]
    fn different_fingerprint_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path(), false);
        writer.write(&endpoint(), "fp1", vec![case("ok")]).unwrap();
        let second = writer.write(&endpoint(), "fp2", vec![case("ok2")]).unwrap();
        assert!(matches!(second, WriteOutcome::Written(_)));

        let path = writer.artifact_path(&endpoint());
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"ok2\""));
    }

    #[test]
    fn artifact_path_flattens_path_into_filename() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path(), false);
        let path = writer.artifact_path(&endpoint());
        assert_eq!(path, dir.path().join("get_users_id.json"));
    }
}
