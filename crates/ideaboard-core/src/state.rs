//! Persisted per-project state
//!
//! Stored as `{"projects": {<repo url>: {...}}}`. Output is pretty-printed
//! with sorted keys so the file diffs cleanly under version control.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::atomic_write::atomic_write;
use crate::error::{Result, SyncError};
use crate::status::StatusLabel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// ISO-8601 commit timestamp with offset.
    #[serde(default)]
    pub latest_date: Option<String>,
    #[serde(default)]
    pub latest_sha: Option<String>,
    pub name: String,
    pub repo: String,
    pub status: StatusLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub projects: BTreeMap<String, PersistedRecord>,

    /// Unknown top-level keys, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StateFile {
    /// Load state, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "state file not found, starting empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pretty, key-sorted JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        // serde_json::Map is a BTreeMap, so going through Value sorts every
        // object, including flattened extras.
        let value = serde_json::to_value(self)?;
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        atomic_write(path, content.as_bytes()).map_err(|e| SyncError::io(path, e))?;
        tracing::debug!(path = %path.display(), projects = self.projects.len(), "saved state");
        Ok(())
    }

    pub fn get(&self, repo: &str) -> Option<&PersistedRecord> {
        self.projects.get(repo)
    }

    pub fn previous_sha(&self, repo: &str) -> Option<&str> {
        self.get(repo).and_then(|r| r.latest_sha.as_deref())
    }

    /// Replace the record for `record.repo` wholesale.
    pub fn upsert(&mut self, record: PersistedRecord) {
        self.projects.insert(record.repo.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
