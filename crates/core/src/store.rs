//! In-memory search index: entries for pages, blocks, and phantoms,
//! plus per-page modification stats for incremental rebuilds.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of a search entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// One note document.
    Page,
    /// A sub-unit of a page (roughly, a line or list item).
    Block,
    /// Placeholder for a link target with no corresponding page yet.
    Phantom,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Block => "block",
            Self::Phantom => "phantom",
        }
    }
}

/// A searchable unit in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub kind: EntryKind,
    /// Unique within the store. Page id for pages, block tag or
    /// position-derived id for blocks, link target for phantoms.
    pub id: String,
    /// Display string: page name, block text, or link target name.
    pub title: String,
    /// Owning page identifier (the page itself, for page entries).
    pub page_id: String,
    /// Display name of the owning page.
    pub page_name: String,
    /// Untrimmed block text (blocks only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    /// Epoch milliseconds; phantoms use index-build time.
    pub last_modified: i64,
}

impl SearchEntry {
    /// Build the page entry for an indexed document.
    pub fn page(page_id: &str, page_name: &str, last_modified: i64) -> Self {
        Self {
            kind: EntryKind::Page,
            id: page_id.to_string(),
            title: page_name.to_string(),
            page_id: page_id.to_string(),
            page_name: page_name.to_string(),
            full_content: None,
            last_modified,
        }
    }

    /// Build a phantom entry for a dangling link target.
    pub fn phantom(target: &str, created_at: i64) -> Self {
        Self {
            kind: EntryKind::Phantom,
            id: target.to_string(),
            title: target.to_string(),
            page_id: target.to_string(),
            page_name: target.to_string(),
            full_content: None,
            last_modified: created_at,
        }
    }
}

/// The in-memory collection of search entries plus per-page stats.
///
/// Entries keep insertion order; the ranker relies on that order as the
/// final tie-breaker. Per page there is at most one `Page` entry and any
/// number of `Block` entries; per dangling target at most one `Phantom`.
#[derive(Debug, Default)]
pub struct IndexStore {
    entries: Vec<SearchEntry>,
    file_stats: HashMap<String, i64>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn file_stats(&self) -> &HashMap<String, i64> {
        &self.file_stats
    }

    /// Timestamp of the last successfully indexed version of a page.
    pub fn last_indexed(&self, page_id: &str) -> Option<i64> {
        self.file_stats.get(page_id).copied()
    }

    pub fn set_last_indexed(&mut self, page_id: &str, last_modified: i64) {
        self.file_stats.insert(page_id.to_string(), last_modified);
    }

    /// Page ids currently tracked in file stats.
    pub fn tracked_pages(&self) -> Vec<String> {
        self.file_stats.keys().cloned().collect()
    }

    pub fn has_page(&self, page_id: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == EntryKind::Page && e.page_id == page_id)
    }

    pub fn has_phantom(&self, target: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == EntryKind::Phantom && e.id == target)
    }

    /// Replace all entries for a page in one step.
    ///
    /// Drops the page's old page/block entries, drops any phantom with the
    /// same id (a real page always wins), then inserts the page entry
    /// followed by its blocks.
    pub fn replace_page(&mut self, page: SearchEntry, blocks: Vec<SearchEntry>) {
        let page_id = page.page_id.clone();
        self.entries.retain(|e| match e.kind {
            EntryKind::Page | EntryKind::Block => e.page_id != page_id,
            EntryKind::Phantom => e.id != page_id,
        });
        self.entries.push(page);
        self.entries.extend(blocks);
    }

    /// Purge all page/block entries and stats for a page.
    ///
    /// Phantoms for the id are left alone; whether one should exist is
    /// decided by the next phantom-resolution pass.
    pub fn remove_page(&mut self, page_id: &str) {
        self.entries.retain(|e| match e.kind {
            EntryKind::Page | EntryKind::Block => e.page_id != page_id,
            EntryKind::Phantom => true,
        });
        self.file_stats.remove(page_id);
    }

    /// Insert a phantom for a dangling target if none exists yet.
    pub fn add_phantom(&mut self, target: &str, created_at: i64) {
        if self.has_page(target) || self.has_phantom(target) {
            return;
        }
        self.entries.push(SearchEntry::phantom(target, created_at));
    }

    /// Drop phantoms not accepted by the predicate.
    pub fn retain_phantoms(&mut self, keep: impl Fn(&str) -> bool) {
        self.entries
            .retain(|e| e.kind != EntryKind::Phantom || keep(&e.id));
    }

    /// Replace the whole store contents (snapshot import).
    pub fn replace_all(&mut self, entries: Vec<SearchEntry>, file_stats: HashMap<String, i64>) {
        self.entries = entries;
        self.file_stats = file_stats;
    }

    /// Clone out the store contents (snapshot export).
    pub fn to_parts(&self) -> (Vec<SearchEntry>, HashMap<String, i64>) {
        (self.entries.clone(), self.file_stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, page_id: &str, title: &str) -> SearchEntry {
        SearchEntry {
            kind: EntryKind::Block,
            id: id.to_string(),
            title: title.to_string(),
            page_id: page_id.to_string(),
            page_name: page_id.to_string(),
            full_content: Some(title.to_string()),
            last_modified: 1,
        }
    }

    #[test]
    fn test_replace_page_drops_old_entries() {
        let mut store = IndexStore::new();
        store.replace_page(
            SearchEntry::page("alpha", "Alpha", 1),
            vec![block("alpha#0", "alpha", "first"), block("alpha#1", "alpha", "second")],
        );
        store.replace_page(
            SearchEntry::page("alpha", "Alpha", 2),
            vec![block("alpha#0", "alpha", "rewritten")],
        );

        assert_eq!(store.entries().len(), 2);
        let pages: Vec<_> = store
            .entries()
            .iter()
            .filter(|e| e.kind == EntryKind::Page)
            .collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].last_modified, 2);
    }

    #[test]
    fn test_replace_page_evicts_phantom() {
        let mut store = IndexStore::new();
        store.add_phantom("beta", 10);
        assert!(store.has_phantom("beta"));

        store.replace_page(SearchEntry::page("beta", "Beta", 20), Vec::new());

        assert!(!store.has_phantom("beta"));
        assert!(store.has_page("beta"));
    }

    #[test]
    fn test_add_phantom_is_idempotent_and_yields_to_pages() {
        let mut store = IndexStore::new();
        store.add_phantom("gamma", 1);
        store.add_phantom("gamma", 2);
        assert_eq!(store.entries().len(), 1);

        store.replace_page(SearchEntry::page("delta", "Delta", 1), Vec::new());
        store.add_phantom("delta", 5);
        assert!(!store.has_phantom("delta"));
    }

    #[test]
    fn test_remove_page_purges_entries_and_stats() {
        let mut store = IndexStore::new();
        store.replace_page(
            SearchEntry::page("alpha", "Alpha", 1),
            vec![block("alpha#0", "alpha", "text")],
        );
        store.set_last_indexed("alpha", 1);

        store.remove_page("alpha");

        assert!(store.entries().is_empty());
        assert!(store.last_indexed("alpha").is_none());
    }

    #[test]
    fn test_serde_uses_camel_case_tags() {
        let entry = SearchEntry::page("alpha", "Alpha", 42);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"pageId\":\"alpha\""));
        assert!(json.contains("\"kind\":\"page\""));
        // fullContent is omitted when absent
        assert!(!json.contains("fullContent"));
    }
}
