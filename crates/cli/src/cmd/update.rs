//! Single-page update command.

use notelink_core::{ResolvedConfig, UpdateOutcome};

use super::{open_engine_cached, save_state};
use crate::PageArgs;

pub fn run(rc: &ResolvedConfig, args: PageArgs) {
    let (vault, mut engine) = open_engine_cached(rc);

    match engine.update_file(&args.page, &vault) {
        Ok(UpdateOutcome::Indexed) => println!("Updated {}", args.page),
        Ok(UpdateOutcome::Removed) => {
            println!("{} is unreadable, removed from index", args.page)
        }
        Err(e) => {
            eprintln!("Error updating {}: {}", args.page, e);
            std::process::exit(1);
        }
    }

    save_state(&vault, &engine);
}
