mod cmd;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use notelink_core::ConfigLoader;

#[derive(Debug, Parser)]
#[command(name = "nlk", version, about = "Incremental note index: search, backlinks, rename impact")]
struct Cli {
    /// Path to notelink.toml (defaults to ./notelink.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Vault root, overriding the config file
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rebuild the index (incremental: unchanged notes are skipped)
    Reindex,

    /// Re-index a single page without a full rebuild
    Update(PageArgs),

    /// Drop a single page from the index
    Remove(PageArgs),

    /// Search the index
    Search(SearchArgs),

    /// List pages linking to a target
    Backlinks(TargetArgs),

    /// List pages whose content must change when a page is renamed
    Affected(TargetArgs),

    /// Write the index snapshot to a file
    Export(ExportArgs),

    /// Replace the index with a previously exported snapshot
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page identifier (vault-relative path without extension)
    pub page: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query string; omit for a recent-items view
    pub query: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Page identifier (vault-relative path without extension)
    pub page: String,

    /// Emit JSON instead of plain lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file ("-" for stdout)
    #[arg(long, default_value = "-")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Snapshot file to load
    pub input: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let rc = match ConfigLoader::load(cli.config.as_deref(), cli.vault.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&rc.logging.level);

    match cli.command {
        Commands::Reindex => cmd::reindex::run(&rc),
        Commands::Update(args) => cmd::update::run(&rc, args),
        Commands::Remove(args) => cmd::remove::run(&rc, args),
        Commands::Search(args) => cmd::search::run(&rc, args),
        Commands::Backlinks(args) => cmd::links::run_backlinks(&rc, args),
        Commands::Affected(args) => cmd::links::run_affected(&rc, args),
        Commands::Export(args) => cmd::snapshot::run_export(&rc, args),
        Commands::Import(args) => cmd::snapshot::run_import(&rc, args),
    }
}
