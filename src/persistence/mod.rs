//! Persistence gateway: where snapshots are saved and loaded.
//!
//! The session core only talks to the `PersistenceGateway` trait. Two
//! implementations ship with the crate:
//!
//! - `JsonFileStore`: one JSON file per save, plus downloaded artifacts
//! - `MemoryStore`: in-process store with failure injection

mod file_store;
mod memory;

pub use file_store::{FileStoreConfig, JsonFileStore};
pub use memory::MemoryStore;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::Result;
use crate::snapshot::GameSnapshot;

/// A snapshot kept in the save history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedGame {
    /// When the save happened.
    pub saved_at: DateTime<Utc>,
    /// The saved game.
    pub snapshot: GameSnapshot,
}

/// Storage collaborator for snapshots.
///
/// ## Implementation Notes
///
/// - `save`: Durable best effort; the newest save becomes `load_last`
/// - `download`: Writes a standalone artifact and returns where it went
/// - `load_last`: `Ok(None)` when nothing was ever saved
/// - `load_from_file`: `GameError::Parse` on malformed contents
/// - `history`: Most recent first
pub trait PersistenceGateway {
    /// Persist a snapshot as the newest save.
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Write a snapshot as a standalone file artifact.
    fn download(&mut self, snapshot: &GameSnapshot) -> Result<PathBuf>;

    /// The most recent save, if any.
    fn load_last(&self) -> Result<Option<GameSnapshot>>;

    /// Read a snapshot from a user-chosen file.
    fn load_from_file(&self, path: &Path) -> Result<GameSnapshot>;

    /// Saved games, most recent first.
    fn history(&self) -> Result<Vec<SavedGame>>;
}
