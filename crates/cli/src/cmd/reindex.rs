//! Reindex command implementation.

use notelink_core::ResolvedConfig;

use super::open_engine;

pub fn run(rc: &ResolvedConfig) {
    let ctx = open_engine(rc);
    let stats = &ctx.stats;

    println!("Indexing complete for {}", ctx.vault_root.display());
    println!("  Pages scanned:  {}", stats.pages_scanned);
    println!("  Pages skipped:  {}", stats.pages_skipped);
    if stats.pages_removed > 0 {
        println!("  Pages removed:  {}", stats.pages_removed);
    }
    println!("  Blocks indexed: {}", stats.blocks_indexed);
    println!("  Duration:       {}ms", stats.duration_ms);
}
