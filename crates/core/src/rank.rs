//! Query ranking over index entries.
//!
//! Cheap on purpose: no tokenization, no stemming. This runs against the
//! full in-memory index on every keystroke, so each entry costs a handful
//! of substring checks at most.

use crate::store::SearchEntry;

/// Maximum number of results returned by a search.
pub const MAX_RESULTS: usize = 50;

/// Score tiers, highest first; the first matching tier wins.
const SCORE_EXACT: u32 = 100;
const SCORE_PREFIX: u32 = 75;
const SCORE_WORD_START: u32 = 60;
const SCORE_CONTAINS: u32 = 50;
const SCORE_SUBSEQUENCE: u32 = 25;

/// Rank entries against a query and return the top matches.
///
/// The empty query is a "recent items" view: everything, newest first.
/// Ties fall back to the entries' insertion order (the sort is stable).
pub fn search(entries: &[SearchEntry], query: &str) -> Vec<SearchEntry> {
    if query.is_empty() {
        let mut results: Vec<SearchEntry> = entries.to_vec();
        results.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        results.truncate(MAX_RESULTS);
        return results;
    }

    let query = query.to_lowercase();
    let mut scored: Vec<(u32, &SearchEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let score = match_score(&entry.title, &query);
            (score > 0).then_some((score, entry))
        })
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| {
        sb.cmp(sa).then_with(|| b.last_modified.cmp(&a.last_modified))
    });
    scored.truncate(MAX_RESULTS);

    scored.into_iter().map(|(_, e)| e.clone()).collect()
}

/// Score a title against an already-lowercased query. 0 means no match.
fn match_score(title: &str, query: &str) -> u32 {
    let title = title.to_lowercase();

    if title == *query {
        SCORE_EXACT
    } else if title.starts_with(query) {
        SCORE_PREFIX
    } else if title.contains(&format!(" {}", query)) {
        SCORE_WORD_START
    } else if title.contains(query) {
        SCORE_CONTAINS
    } else if is_subsequence(&title, query) {
        SCORE_SUBSEQUENCE
    } else {
        0
    }
}

/// Every char of `query`, in order, appears somewhere in `title`.
fn is_subsequence(title: &str, query: &str) -> bool {
    let mut chars = title.chars();
    query.chars().all(|q| chars.any(|t| t == q))
}
