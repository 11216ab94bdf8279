//! Durable snapshot of the whole index.
//!
//! One JSON file under a hidden folder at the vault root, overwritten
//! atomically on each save. Loads are lenient: missing fields fall back
//! to empty defaults and a corrupt or incompatible file is treated as no
//! snapshot at all — the next rebuild repopulates everything.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::SearchEntry;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Hidden folder (under the vault root) holding engine state.
pub const STATE_DIR: &str = ".notelink";

const SNAPSHOT_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Complete, directly re-loadable copy of the index state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub search_index: Vec<SearchEntry>,
    #[serde(default)]
    pub file_stats: HashMap<String, i64>,
    #[serde(default)]
    pub forward: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub reverse: HashMap<String, Vec<String>>,
}

/// Path of the snapshot file for a vault root.
pub fn snapshot_path(vault_root: &Path) -> PathBuf {
    vault_root.join(STATE_DIR).join(SNAPSHOT_FILE)
}

/// Save a snapshot under the vault root, atomically.
///
/// Writes to a sibling temp file and renames over the target so readers
/// never observe a half-written snapshot.
pub fn save(vault_root: &Path, snapshot: &IndexSnapshot) -> Result<(), SnapshotError> {
    let path = snapshot_path(vault_root);
    let dir = path.parent().unwrap_or(vault_root);
    fs::create_dir_all(dir)
        .map_err(|e| SnapshotError::Write { path: dir.to_path_buf(), source: e })?;

    let json = serde_json::to_vec(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)
        .map_err(|e| SnapshotError::Write { path: tmp.clone(), source: e })?;
    fs::rename(&tmp, &path)
        .map_err(|e| SnapshotError::Write { path: path.clone(), source: e })?;

    tracing::debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Load the snapshot for a vault root, if a usable one exists.
///
/// Returns `Ok(None)` when the file is absent, unparseable, or carries a
/// different schema version; only a genuine read error is surfaced.
pub fn load(vault_root: &Path) -> Result<Option<IndexSnapshot>, SnapshotError> {
    let path = snapshot_path(vault_root);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SnapshotError::Read { path, source: e }),
    };

    let snapshot: IndexSnapshot = match serde_json::from_slice(&bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding corrupt snapshot");
            return Ok(None);
        }
    };

    if snapshot.version != SNAPSHOT_VERSION {
        tracing::warn!(
            found = snapshot.version,
            expected = SNAPSHOT_VERSION,
            "discarding snapshot with incompatible version"
        );
        return Ok(None);
    }

    Ok(Some(snapshot))
}
