//! Index engine: orchestrates parsing, graph bookkeeping, search, and
//! snapshot export/import over an abstract document store.
//!
//! The engine owns all index state and runs single-threaded; hosts that
//! want worker isolation put one engine behind their own request channel.
//! Document reads are the only external calls it makes.

use chrono::Utc;
use thiserror::Error;

use crate::graph::LinkGraph;
use crate::parse::parse_note;
use crate::rank;
use crate::snapshot::{IndexSnapshot, SNAPSHOT_VERSION};
use crate::store::{IndexStore, SearchEntry};

/// Failure reading from a document store.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("failed to read document {page_id}: {source}")]
    Read {
        page_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate documents: {0}")]
    List(#[source] std::io::Error),
}

/// A document as seen during enumeration.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    /// Stable name-derived identifier.
    pub page_id: String,
    /// Display name.
    pub name: String,
    /// Modification time, epoch milliseconds.
    pub last_modified: i64,
}

/// Abstract note folder supplied by the host.
///
/// The engine only ever reads through this trait; writing, renaming and
/// deleting documents stays with the host.
pub trait DocumentStore {
    /// Enumerate all documents with their modification timestamps.
    fn list(&self) -> Result<Vec<DocumentMeta>, DocumentStoreError>;

    /// Resolve a page identifier to its document metadata, if it exists.
    fn stat(&self, page_id: &str) -> Result<Option<DocumentMeta>, DocumentStoreError>;

    /// Read a document's full text content.
    fn read(&self, page_id: &str) -> Result<String, DocumentStoreError>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("document store error: {0}")]
    Store(#[from] DocumentStoreError),
}

/// Statistics from a full rebuild.
#[derive(Debug, Clone, Default)]
pub struct RebuildStats {
    /// Documents seen during the walk.
    pub pages_scanned: usize,
    /// Documents left untouched because their timestamp matched.
    pub pages_skipped: usize,
    /// Pages dropped because they vanished or became unreadable.
    pub pages_removed: usize,
    /// Block entries indexed (excludes skipped pages).
    pub blocks_indexed: usize,
    /// Rebuild duration in milliseconds.
    pub duration_ms: u64,
}

/// Outcome of a single-file update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The page was (re-)indexed.
    Indexed,
    /// The page could not be read and was removed instead.
    Removed,
}

/// The index engine. One instance per vault; all state lives here.
#[derive(Debug, Default)]
pub struct IndexEngine {
    store: IndexStore,
    graph: LinkGraph,
}

impl IndexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-folder rebuild with skip-if-unchanged.
    ///
    /// Unchanged pages (same timestamp as last indexed) are left alone —
    /// the dominant path for large vaults. Pages tracked in file stats
    /// but absent from the walk are treated as deleted. Individual read
    /// failures degrade to removal of that page, never to a rebuild
    /// failure.
    pub fn rebuild(&mut self, docs: &dyn DocumentStore) -> Result<RebuildStats, EngineError> {
        let start = std::time::Instant::now();
        let mut stats = RebuildStats::default();

        let listed = docs.list()?;
        stats.pages_scanned = listed.len();

        let mut seen: Vec<String> = Vec::with_capacity(listed.len());
        for meta in &listed {
            seen.push(meta.page_id.clone());

            if self.store.last_indexed(&meta.page_id) == Some(meta.last_modified) {
                stats.pages_skipped += 1;
                tracing::debug!(page = %meta.page_id, "unchanged, skipping");
                continue;
            }

            match docs.read(&meta.page_id) {
                Ok(content) => {
                    stats.blocks_indexed += self.index_page(meta, &content);
                }
                Err(e) => {
                    tracing::warn!(page = %meta.page_id, error = %e, "read failed, dropping page");
                    self.remove_file(&meta.page_id);
                    stats.pages_removed += 1;
                }
            }
        }

        for stale in self.store.tracked_pages() {
            if !seen.contains(&stale) {
                tracing::debug!(page = %stale, "no longer on disk, removing");
                self.remove_file(&stale);
                stats.pages_removed += 1;
            }
        }

        self.resolve_phantoms();

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            scanned = stats.pages_scanned,
            skipped = stats.pages_skipped,
            removed = stats.pages_removed,
            blocks = stats.blocks_indexed,
            ms = stats.duration_ms,
            "rebuild complete"
        );
        Ok(stats)
    }

    /// Re-index exactly one page.
    ///
    /// A page that vanished or cannot be read is removed from the index
    /// instead of failing the caller.
    pub fn update_file(
        &mut self,
        page_id: &str,
        docs: &dyn DocumentStore,
    ) -> Result<UpdateOutcome, EngineError> {
        let meta = match docs.stat(page_id)? {
            Some(meta) => meta,
            None => {
                tracing::warn!(page = %page_id, "document gone, removing from index");
                self.remove_file(page_id);
                self.resolve_phantoms();
                return Ok(UpdateOutcome::Removed);
            }
        };

        match docs.read(page_id) {
            Ok(content) => {
                self.index_page(&meta, &content);
                self.resolve_phantoms();
                Ok(UpdateOutcome::Indexed)
            }
            Err(e) => {
                tracing::warn!(page = %page_id, error = %e, "read failed, removing from index");
                self.remove_file(page_id);
                self.resolve_phantoms();
                Ok(UpdateOutcome::Removed)
            }
        }
    }

    /// Purge one page: its entries, its outgoing edges, its file stats.
    ///
    /// Referencing pages keep their edges; the next rebuild or update of
    /// a referencing page materializes a phantom if needed.
    pub fn remove_file(&mut self, page_id: &str) {
        self.store.remove_page(page_id);
        self.graph.remove_page(page_id);
    }

    /// Ranked search over the current in-memory state.
    pub fn search(&self, query: &str) -> Vec<SearchEntry> {
        rank::search(self.store.entries(), query)
    }

    /// Pages linking to `target`.
    pub fn backlinks(&self, target: &str) -> Vec<String> {
        self.graph.backlinks(target)
    }

    /// Pages whose content must be rewritten when `old_page_id` is
    /// renamed. The renamed page itself is excluded.
    pub fn rename_affected(&self, old_page_id: &str) -> Vec<String> {
        self.graph
            .backlinks(old_page_id)
            .into_iter()
            .filter(|p| p != old_page_id)
            .collect()
    }

    /// Export the complete index state.
    pub fn export(&self) -> IndexSnapshot {
        let (search_index, file_stats) = self.store.to_parts();
        let (forward, reverse) = self.graph.to_parts();
        IndexSnapshot {
            version: SNAPSHOT_VERSION,
            search_index,
            file_stats,
            forward,
            reverse,
        }
    }

    /// Replace the complete index state with a snapshot. No merging.
    pub fn import(&mut self, snapshot: IndexSnapshot) {
        self.store.replace_all(snapshot.search_index, snapshot.file_stats);
        self.graph.replace_all(snapshot.forward, snapshot.reverse);
    }

    /// Parse and index one page, replacing its previous entries and
    /// edges. Returns the number of blocks indexed.
    fn index_page(&mut self, meta: &DocumentMeta, content: &str) -> usize {
        let parsed = parse_note(content, &meta.name, &meta.page_id, meta.last_modified);
        let block_count = parsed.blocks.len();

        self.store.replace_page(
            SearchEntry::page(&meta.page_id, &meta.name, meta.last_modified),
            parsed.blocks,
        );
        self.graph.update_page(&meta.page_id, &parsed.links);
        self.store.set_last_indexed(&meta.page_id, meta.last_modified);

        block_count
    }

    /// Reconcile phantoms with the current graph: create one per dangling
    /// target without a page, drop any that lost their last referrer.
    fn resolve_phantoms(&mut self) {
        let now = Utc::now().timestamp_millis();
        for target in self.graph.all_targets() {
            if !self.store.has_page(&target) {
                self.store.add_phantom(&target, now);
            }
        }

        let graph = &self.graph;
        self.store.retain_phantoms(|target| graph.is_referenced(target));
    }
}
