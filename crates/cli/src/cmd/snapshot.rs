//! Snapshot export/import commands.

use std::fs;
use std::path::Path;

use notelink_core::{IndexSnapshot, ResolvedConfig};

use super::{open_engine, save_state};
use crate::{ExportArgs, ImportArgs};

pub fn run_export(rc: &ResolvedConfig, args: ExportArgs) {
    let ctx = open_engine(rc);
    let snap = ctx.engine.export();

    let json = match serde_json::to_string_pretty(&snap) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing snapshot: {}", e);
            std::process::exit(1);
        }
    };

    if args.output == Path::new("-") {
        println!("{}", json);
        return;
    }

    if let Err(e) = fs::write(&args.output, json) {
        eprintln!("Error writing {}: {}", args.output.display(), e);
        std::process::exit(1);
    }
    println!("Snapshot written to {}", args.output.display());
}

pub fn run_import(rc: &ResolvedConfig, args: ImportArgs) {
    let bytes = match fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    let snap: IndexSnapshot = match serde_json::from_slice(&bytes) {
        Ok(snap) => snap,
        Err(e) => {
            eprintln!("Error parsing snapshot {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    let mut ctx = open_engine(rc);
    ctx.engine.import(snap);
    save_state(&ctx.vault, &ctx.engine);

    println!("Snapshot imported into {}", ctx.vault_root.display());
}
