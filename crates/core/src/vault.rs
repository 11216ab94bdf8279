//! Filesystem-backed document store.
//!
//! Maps a folder of markdown files onto the engine's `DocumentStore`
//! contract. Page identifiers are vault-relative paths with the `.md`
//! extension stripped and `/` separators; page names are file stems.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use std::{fs, io};

use thiserror::Error;
use walkdir::WalkDir;

use crate::engine::{DocumentMeta, DocumentStore, DocumentStoreError};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),
}

/// A markdown folder exposed as a document store.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    /// Folders to exclude from walking (relative to the vault root).
    excluded_folders: Vec<PathBuf>,
}

impl FsVault {
    /// Open a vault at the given root.
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Open a vault with folder exclusions (relative paths from the root).
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultError::MissingRoot(root.display().to_string()))?;

        Ok(Self { root, excluded_folders })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the document behind a page identifier.
    fn document_path(&self, page_id: &str) -> Option<PathBuf> {
        // Page ids are vault-relative; refuse anything trying to escape.
        if page_id.split('/').any(|c| c == ".." || c.is_empty()) {
            return None;
        }
        Some(self.root.join(format!("{page_id}.md")))
    }

    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        if matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv") {
            return true;
        }

        if let Ok(relative) = entry.path().strip_prefix(&self.root) {
            for excluded in &self.excluded_folders {
                if relative.starts_with(excluded) {
                    return true;
                }
            }
        }

        false
    }

    fn meta_for(&self, path: &Path) -> io::Result<DocumentMeta> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let page_id = page_id_from_path(relative);
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string();
        let modified = path.metadata()?.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        Ok(DocumentMeta {
            page_id,
            name,
            last_modified: epoch_millis(modified),
        })
    }
}

impl DocumentStore for FsVault {
    fn list(&self) -> Result<Vec<DocumentMeta>, DocumentStoreError> {
        let mut docs = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // A single unreadable directory should not abort the
                    // walk; the pages under it just go unindexed.
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            docs.push(self.meta_for(path).map_err(DocumentStoreError::List)?);
        }

        docs.sort_by(|a, b| a.page_id.cmp(&b.page_id));
        Ok(docs)
    }

    fn stat(&self, page_id: &str) -> Result<Option<DocumentMeta>, DocumentStoreError> {
        let path = match self.document_path(page_id) {
            Some(path) if path.is_file() => path,
            _ => return Ok(None),
        };

        match self.meta_for(&path) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DocumentStoreError::Read { page_id: page_id.to_string(), source: e }),
        }
    }

    fn read(&self, page_id: &str) -> Result<String, DocumentStoreError> {
        let path = self
            .document_path(page_id)
            .ok_or_else(|| DocumentStoreError::NotFound(page_id.to_string()))?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DocumentStoreError::NotFound(page_id.to_string()))
            }
            Err(e) => Err(DocumentStoreError::Read { page_id: page_id.to_string(), source: e }),
        }
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}

/// Vault-relative path → page identifier ("/" separators, no extension).
fn page_id_from_path(relative: &Path) -> String {
    let no_ext = relative.with_extension("");
    no_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_test_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("note1.md"), "# Note 1").unwrap();
        fs::write(root.join("note2.md"), "# Note 2").unwrap();

        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/note3.md"), "# Note 3").unwrap();

        fs::create_dir(root.join(".notelink")).unwrap();
        fs::write(root.join(".notelink/index.json"), "{}").unwrap();

        fs::write(root.join("readme.txt"), "Not markdown").unwrap();

        dir
    }

    #[test]
    fn test_list_finds_markdown_with_derived_ids() {
        let dir = create_test_vault();
        let vault = FsVault::open(dir.path()).unwrap();

        let docs = vault.list().unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.page_id.as_str()).collect();
        assert_eq!(ids, vec!["note1", "note2", "subdir/note3"]);
        assert_eq!(docs[2].name, "note3");
    }

    #[test]
    fn test_list_skips_hidden_and_non_markdown() {
        let dir = create_test_vault();
        let vault = FsVault::open(dir.path()).unwrap();

        let docs = vault.list().unwrap();
        assert!(docs.iter().all(|d| !d.page_id.contains(".notelink")));
        assert!(docs.iter().all(|d| !d.page_id.contains("readme")));
    }

    #[test]
    fn test_list_respects_exclusions() {
        let dir = create_test_vault();
        let vault =
            FsVault::with_exclusions(dir.path(), vec![PathBuf::from("subdir")]).unwrap();

        let docs = vault.list().unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.page_id.as_str()).collect();
        assert_eq!(ids, vec!["note1", "note2"]);
    }

    #[test]
    fn test_read_and_stat_resolve_page_ids() {
        let dir = create_test_vault();
        let vault = FsVault::open(dir.path()).unwrap();

        assert_eq!(vault.read("subdir/note3").unwrap(), "# Note 3");

        let meta = vault.stat("note1").unwrap().expect("note1 exists");
        assert_eq!(meta.page_id, "note1");
        assert!(meta.last_modified > 0);

        assert!(vault.stat("missing").unwrap().is_none());
        assert!(matches!(
            vault.read("missing"),
            Err(DocumentStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_rejects_path_escape() {
        let dir = create_test_vault();
        let vault = FsVault::open(dir.path()).unwrap();

        assert!(matches!(
            vault.read("../outside"),
            Err(DocumentStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_root() {
        let result = FsVault::open(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(VaultError::MissingRoot(_))));
    }
}
