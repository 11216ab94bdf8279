//! notelink-core: an incremental index over a folder of notes.
//!
//! The engine parses every note into searchable page and block entries,
//! maintains a forward/reverse link graph for backlink and rename
//! queries, answers ranked searches, and persists its whole state as a
//! versioned snapshot so sessions do not start from scratch.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use notelink_core::{FsVault, IndexEngine};
//!
//! let vault = FsVault::open(Path::new("./notes")).unwrap();
//! let mut engine = IndexEngine::new();
//! engine.rebuild(&vault).unwrap();
//!
//! for entry in engine.search("meeting") {
//!     println!("{} ({})", entry.title, entry.page_name);
//! }
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod engine;
pub mod graph;
pub mod parse;
pub mod rank;
pub mod snapshot;
pub mod store;
pub mod vault;

pub use config::{ConfigError, ConfigLoader, ResolvedConfig};
pub use engine::{
    DocumentMeta, DocumentStore, DocumentStoreError, EngineError, IndexEngine,
    RebuildStats, UpdateOutcome,
};
pub use graph::LinkGraph;
pub use parse::{parse_note, ParsedNote};
pub use rank::MAX_RESULTS;
pub use snapshot::{IndexSnapshot, SnapshotError, SNAPSHOT_VERSION, STATE_DIR};
pub use store::{EntryKind, IndexStore, SearchEntry};
pub use vault::{FsVault, VaultError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
