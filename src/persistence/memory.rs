//! In-process persistence.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rustc_hash::FxHashMap;

use super::{PersistenceGateway, SavedGame};
use crate::core::{GameError, Result};
use crate::snapshot::GameSnapshot;

/// Keeps saves and downloads in memory.
///
/// Files for `load_from_file` are registered up front with `with_file`.
/// `fail_writes` and `fail_loads` make the matching operations fail with
/// `GameError::Persistence`, for exercising error paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saves: Vec<SavedGame>,
    downloads: Vec<GameSnapshot>,
    files: FxHashMap<PathBuf, String>,
    fail_writes: bool,
    fail_loads: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file contents readable through `load_from_file`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Start with an existing save.
    #[must_use]
    pub fn with_save(mut self, snapshot: GameSnapshot) -> Self {
        self.saves.push(SavedGame {
            saved_at: Utc::now(),
            snapshot,
        });
        self
    }

    /// Make `save` and `download` fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make `load_last` and `history` fail.
    pub fn set_fail_loads(&mut self, fail: bool) {
        self.fail_loads = fail;
    }

    /// Every save, oldest first.
    #[must_use]
    pub fn saves(&self) -> &[SavedGame] {
        &self.saves
    }

    /// Every downloaded snapshot, oldest first.
    #[must_use]
    pub fn downloads(&self) -> &[GameSnapshot] {
        &self.downloads
    }
}

impl PersistenceGateway for MemoryStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        if self.fail_writes {
            return Err(GameError::persistence("storage unavailable"));
        }
        self.saves.push(SavedGame {
            saved_at: Utc::now(),
            snapshot: snapshot.clone(),
        });
        Ok(())
    }

    fn download(&mut self, snapshot: &GameSnapshot) -> Result<PathBuf> {
        if self.fail_writes {
            return Err(GameError::persistence("storage unavailable"));
        }
        self.downloads.push(snapshot.clone());
        Ok(PathBuf::from(format!("download-{}.json", self.downloads.len())))
    }

    fn load_last(&self) -> Result<Option<GameSnapshot>> {
        if self.fail_loads {
            return Err(GameError::persistence("storage unavailable"));
        }
        Ok(self.saves.last().map(|saved| saved.snapshot.clone()))
    }

    fn load_from_file(&self, path: &Path) -> Result<GameSnapshot> {
        let contents = self
            .files
            .get(path)
            .ok_or_else(|| GameError::persistence(format!("no such file: {}", path.display())))?;
        GameSnapshot::from_json(contents)
    }

    fn history(&self) -> Result<Vec<SavedGame>> {
        if self.fail_loads {
            return Err(GameError::persistence("storage unavailable"));
        }
        Ok(self.saves.iter().rev().cloned().collect())
    }
}
