//! Single-page removal command.

use notelink_core::ResolvedConfig;

use super::{open_engine_cached, save_state};
use crate::PageArgs;

pub fn run(rc: &ResolvedConfig, args: PageArgs) {
    let (vault, mut engine) = open_engine_cached(rc);

    engine.remove_file(&args.page);
    save_state(&vault, &engine);

    println!("Removed {} from index", args.page);
}
