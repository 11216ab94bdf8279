//! Backlinks and rename-impact commands.

use notelink_core::ResolvedConfig;

use super::open_engine;
use crate::TargetArgs;

pub fn run_backlinks(rc: &ResolvedConfig, args: TargetArgs) {
    let ctx = open_engine(rc);
    let pages = ctx.engine.backlinks(&args.page);
    print_pages(&pages, args.json, &format!("no pages link to '{}'", args.page));
}

pub fn run_affected(rc: &ResolvedConfig, args: TargetArgs) {
    let ctx = open_engine(rc);
    let pages = ctx.engine.rename_affected(&args.page);
    print_pages(
        &pages,
        args.json,
        &format!("renaming '{}' affects no other pages", args.page),
    );
}

fn print_pages(pages: &[String], json: bool, empty_msg: &str) {
    if json {
        println!("{}", serde_json::to_string_pretty(pages).unwrap_or_default());
        return;
    }

    if pages.is_empty() {
        println!("({})", empty_msg);
        return;
    }
    for page in pages {
        println!("{}", page);
    }
}
