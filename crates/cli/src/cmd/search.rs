//! Search command implementation.

use notelink_core::{ResolvedConfig, SearchEntry};
use serde::Serialize;

use super::open_engine;
use super::output::truncate;
use crate::SearchArgs;

/// Search result for JSON output.
#[derive(Debug, Serialize)]
struct SearchResultOutput<'a> {
    kind: &'a str,
    id: &'a str,
    title: &'a str,
    page: &'a str,
}

impl<'a> From<&'a SearchEntry> for SearchResultOutput<'a> {
    fn from(entry: &'a SearchEntry) -> Self {
        Self {
            kind: entry.kind.as_str(),
            id: &entry.id,
            title: &entry.title,
            page: &entry.page_name,
        }
    }
}

pub fn run(rc: &ResolvedConfig, args: SearchArgs) {
    let ctx = open_engine(rc);

    let query = args.query.as_deref().unwrap_or("");
    let results = ctx.engine.search(query);

    if args.json {
        print_json(&results);
    } else {
        print_table(&results);
    }
}

fn print_json(results: &[SearchEntry]) {
    let output: Vec<SearchResultOutput> =
        results.iter().map(SearchResultOutput::from).collect();
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

fn print_table(results: &[SearchEntry]) {
    if results.is_empty() {
        println!("(no results found)");
        return;
    }

    let title_width = results
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 50);
    let page_width = results
        .iter()
        .map(|r| r.page_name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    println!(
        "{:<7}  {:<title_width$}  {:<page_width$}",
        "KIND", "TITLE", "PAGE",
    );
    println!("{:-<7}  {:-<title_width$}  {:-<page_width$}", "", "", "");

    for result in results {
        println!(
            "{:<7}  {:<title_width$}  {:<page_width$}",
            result.kind.as_str(),
            truncate(&result.title, title_width),
            truncate(&result.page_name, page_width),
        );
    }

    println!();
    println!("-- {} results --", results.len());
}
