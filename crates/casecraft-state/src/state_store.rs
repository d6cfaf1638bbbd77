// SPDX-License-Identifier: MIT OR Apache-2.0
//! File-backed run state.
//!
//! Opens the state file at construction, holds it in memory, and rewrites
//! it atomically (write-temp + rename, so a crash mid-write never leaves a
//! truncated file) after every successful endpoint. Updates are serialized
//! by a single mutex; a missing or corrupt file starts an empty state with
//! a warning rather than failing the run.

use casecraft_contract::state::{EndpointState, StateFile};
use casecraft_error::CaseCraftError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The on-disk state file's default name, created alongside the spec being
/// processed unless overridden.
pub const DEFAULT_STATE_FILENAME: &str = ".casecraft_state.json";

/// A file-backed, mutex-serialized [`StateFile`].
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: Mutex<StateFile>,
}

impl StateStore {
    /// Open the state file at `path`, starting from an empty state if it is
    /// missing or fails to parse.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<StateFile>(&text) {
                Ok(sf) => sf,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "state file is corrupt, starting empty");
                    StateFile::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StateFile::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read state file, starting empty");
                StateFile::new()
            }
        };
        Self {
            path,
            state: Mutex::new(state),
        }
    }

    /// `true` if `endpoint_key` was successfully generated on a prior run
    /// against the current `fingerprint`.
    #[must_use]
    pub fn is_up_to_date(&self, endpoint_key: &str, fingerprint: &str) -> bool {
        self.state
            .lock()
            .expect("state mutex poisoned")
            .is_up_to_date(endpoint_key, fingerprint)
    }

    /// Record an endpoint's outcome, keyed by `endpoint_key`, and persist
    /// the updated state atomically.
    pub fn record(
        &self,
        endpoint_key: String,
        endpoint_state: EndpointState,
    ) -> Result<(), CaseCraftError> {
        let snapshot = {
            let mut guard = self.state.lock().expect("state mutex poisoned");
            guard.record(endpoint_key, endpoint_state);
            guard.clone()
        };
        self.write_atomic(&snapshot)
    }

    /// A snapshot of the current in-memory state, for diagnostics or
    /// reporting.
    #[must_use]
    pub fn snapshot(&self) -> StateFile {
        self.state.lock().expect("state mutex poisoned").clone()
    }

    fn write_atomic(&self, state: &StateFile) -> Result<(), CaseCraftError> {
        let json = serde_json::to_string_pretty(state).map_err(|e| CaseCraftError::StateIo {
            reason: format!("cannot serialize state: {e}"),
            source: None,
        })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        use std::io::Write;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| CaseCraftError::StateIo {
                reason: format!("cannot rename temp state file into place: {}", e.error),
                source: None,
            })?;
        Ok(())
    }
}
