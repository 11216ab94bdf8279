//! Subcommand implementations.

pub mod links;
pub mod output;
pub mod reindex;
pub mod remove;
pub mod search;
pub mod snapshot;
pub mod update;

use std::path::PathBuf;

use notelink_core::{
    snapshot as core_snapshot, FsVault, IndexEngine, RebuildStats, ResolvedConfig,
};

/// Everything a subcommand needs to talk to the engine.
pub struct Context {
    pub vault_root: PathBuf,
    pub vault: FsVault,
    pub engine: IndexEngine,
    /// Stats from the startup rebuild.
    pub stats: RebuildStats,
}

/// Open the vault and load the persisted engine state, without rebuilding.
///
/// Single-page commands (update/remove) start here so they stay
/// incremental instead of paying for a full rebuild.
pub fn open_engine_cached(rc: &ResolvedConfig) -> (FsVault, IndexEngine) {
    let vault =
        match FsVault::with_exclusions(&rc.vault_root, rc.excluded_folders.clone()) {
            Ok(vault) => vault,
            Err(e) => {
                eprintln!("Error opening vault: {}", e);
                std::process::exit(1);
            }
        };

    let mut engine = IndexEngine::new();
    match core_snapshot::load(vault.root()) {
        Ok(Some(snapshot)) => engine.import(snapshot),
        Ok(None) => tracing::debug!("no usable snapshot, starting empty"),
        Err(e) => tracing::warn!(error = %e, "could not load index snapshot"),
    }

    (vault, engine)
}

/// Open the vault and bring the engine fully up to date.
///
/// Startup order per the engine's persistence contract: load the stored
/// snapshot first (so the rebuild's skip check has prior file stats),
/// rebuild incrementally, then save the refreshed snapshot.
pub fn open_engine(rc: &ResolvedConfig) -> Context {
    let (vault, mut engine) = open_engine_cached(rc);

    let stats = match engine.rebuild(&vault) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error rebuilding index: {}", e);
            std::process::exit(1);
        }
    };

    save_state(&vault, &engine);

    let vault_root = vault.root().to_path_buf();
    Context { vault_root, vault, engine, stats }
}

/// Persist the engine state next to the vault, best effort.
///
/// A failed save leaves the in-memory index intact; the next run retries.
pub fn save_state(vault: &FsVault, engine: &IndexEngine) {
    if let Err(e) = core_snapshot::save(vault.root(), &engine.export()) {
        tracing::warn!(error = %e, "could not save index snapshot, will retry next run");
    }
}
