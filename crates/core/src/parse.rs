//! Note content parsing: blocks and wiki link extraction.
//!
//! The parser is deliberately line-oriented. Every non-empty, non-heading
//! line becomes one block entry; `[[target]]` and `[[target|alias]]`
//! references are collected from every line. Malformed content never
//! fails — unclassifiable lines are simply skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::store::{EntryKind, SearchEntry};

/// Parsed form of one note document.
#[derive(Debug, Clone, Default)]
pub struct ParsedNote {
    /// Block entries, in document order.
    pub blocks: Vec<SearchEntry>,
    /// Link targets as written, duplicates included, document order.
    pub links: Vec<String>,
}

// Matches [[target]] or [[target|alias]]; only the target is extracted.
static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]*)?\]\]").unwrap());

// Explicit block tag at end of line: whitespace, caret, short token.
static BLOCK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\^([A-Za-z0-9-]+)\s*$").unwrap());

// Leading list markers: bullets (-, *, +) or "1." / "1)" numbering.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+").unwrap());

/// Parse note content into block entries and outgoing link targets.
pub fn parse_note(
    content: &str,
    page_name: &str,
    page_id: &str,
    last_modified: i64,
) -> ParsedNote {
    let mut parsed = ParsedNote::default();
    let mut seen_tags: HashSet<String> = HashSet::new();

    for (line_idx, line) in content.lines().enumerate() {
        for cap in WIKILINK_RE.captures_iter(line) {
            if let Some(target) = cap.get(1) {
                let target = target.as_str().trim();
                if !target.is_empty() {
                    parsed.links.push(target.to_string());
                }
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let body = LIST_MARKER_RE.replace(trimmed, "");

        // Explicit ^tag wins over the position-derived id and is stripped
        // from the stored title. A tag repeated further down the page
        // falls back to the position id so block ids stay unique.
        let (id, title) = match BLOCK_TAG_RE.captures(&body) {
            Some(cap) => {
                let tag = cap.get(1).map(|m| m.as_str()).unwrap_or("");
                let title = BLOCK_TAG_RE.replace(&body, "").trim_end().to_string();
                if seen_tags.insert(tag.to_string()) {
                    (tag.to_string(), title)
                } else {
                    (format!("{}#{}", page_id, line_idx), title)
                }
            }
            None => (format!("{}#{}", page_id, line_idx), body.trim_end().to_string()),
        };

        if title.is_empty() {
            continue;
        }

        parsed.blocks.push(SearchEntry {
            kind: EntryKind::Block,
            id,
            title,
            page_id: page_id.to_string(),
            page_name: page_name.to_string(),
            full_content: Some(line.to_string()),
            last_modified,
        });
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParsedNote {
        parse_note(content, "Test", "test", 100)
    }

    #[test]
    fn test_blocks_skip_empty_and_heading_lines() {
        let parsed = parse("# Heading\n\nFirst line\n\n## Sub\nSecond line\n");

        let titles: Vec<_> = parsed.blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["First line", "Second line"]);
    }

    #[test]
    fn test_list_markers_are_stripped() {
        let parsed = parse("- bullet item\n* star item\n+ plus item\n3. numbered\n12) also numbered\n");

        let titles: Vec<_> = parsed.blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["bullet item", "star item", "plus item", "numbered", "also numbered"]
        );
    }

    #[test]
    fn test_explicit_block_tag_becomes_id() {
        let parsed = parse("stable fact ^fact-1\nplain line\n");

        assert_eq!(parsed.blocks[0].id, "fact-1");
        assert_eq!(parsed.blocks[0].title, "stable fact");
        // No tag: position-derived id.
        assert_eq!(parsed.blocks[1].id, "test#1");
        assert_eq!(parsed.blocks[1].title, "plain line");
    }

    #[test]
    fn test_repeated_block_tag_falls_back_to_position_id() {
        let parsed = parse("first fact ^x\nsecond fact ^x\nthird fact ^x\n");

        assert_eq!(parsed.blocks[0].id, "x");
        assert_eq!(parsed.blocks[1].id, "test#1");
        assert_eq!(parsed.blocks[2].id, "test#2");
        // The tag is still stripped from every repeat.
        assert_eq!(parsed.blocks[1].title, "second fact");

        let mut ids: Vec<_> = parsed.blocks.iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_full_content_keeps_raw_line() {
        let parsed = parse("- raw item ^b1\n");
        assert_eq!(parsed.blocks[0].full_content.as_deref(), Some("- raw item ^b1"));
    }

    #[test]
    fn test_wikilinks_extracted_without_alias() {
        let parsed = parse("See [[Beta]] and [[Gamma|the gamma page]].\n");
        assert_eq!(parsed.links, vec!["Beta", "Gamma"]);
    }

    #[test]
    fn test_multiple_links_per_line_and_in_headings() {
        let parsed = parse("# About [[Alpha]]\n[[Beta]] then [[Gamma]] then [[Beta]]\n");
        assert_eq!(parsed.links, vec!["Alpha", "Beta", "Gamma", "Beta"]);
        // Heading contributed a link but no block.
        assert_eq!(parsed.blocks.len(), 1);
    }

    #[test]
    fn test_empty_document_parses_to_nothing() {
        let parsed = parse("");
        assert!(parsed.blocks.is_empty());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_malformed_brackets_never_fail() {
        let parsed = parse("[[unclosed and ]] stray [[]] brackets\n");
        // "unclosed and " is taken as a target by the lenient regex; the
        // empty [[]] is dropped.
        assert!(parsed.links.iter().all(|l| !l.is_empty()));
        assert_eq!(parsed.blocks.len(), 1);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let content = "- item [[X]] ^id1\ntext line\n";
        let a = parse(content);
        let b = parse(content);
        assert_eq!(a.links, b.links);
        assert_eq!(a.blocks, b.blocks);
    }
}
