//! JSON file persistence.
//!
//! Directory structure:
//! ```text
//! root/
//! ├── saves/
//! │   ├── game-1700000000000.json
//! │   └── game-1700000054321.json
//! └── downloads/
//!     └── bingo-20231114-221320.json
//! ```
//!
//! The save with the highest timestamp is the last game. Files hold the
//! plain snapshot JSON, so any of them can be loaded with `load_from_file`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{PersistenceGateway, SavedGame};
use crate::core::{GameError, Result};
use crate::snapshot::GameSnapshot;

const SAVE_PREFIX: &str = "game-";
const SAVE_SUFFIX: &str = ".json";

/// Where and how much the file store keeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStoreConfig {
    /// Base directory.
    pub root: PathBuf,

    /// Saves kept; older ones are pruned after each save.
    pub history_limit: usize,

    /// Download directory. `None` uses `<root>/downloads`.
    pub downloads_dir: Option<PathBuf>,
}

impl FileStoreConfig {
    /// Create a configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            history_limit: 50,
            downloads_dir: None,
        }
    }

    /// Root under the platform data directory.
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GameError::persistence("could not determine data directory"))?;
        Ok(Self::new(data_dir.join("rust-bingo")))
    }

    /// Keep at most `limit` saves.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "History must keep at least 1 save");
        self.history_limit = limit;
        self
    }

    /// Write downloads somewhere other than `<root>/downloads`.
    #[must_use]
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = Some(dir.into());
        self
    }

    /// Directory holding saves.
    #[must_use]
    pub fn saves_dir(&self) -> PathBuf {
        self.root.join("saves")
    }

    /// Directory receiving downloads.
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.downloads_dir
            .clone()
            .unwrap_or_else(|| self.root.join("downloads"))
    }
}

/// File-backed `PersistenceGateway`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    config: FileStoreConfig,
}

impl JsonFileStore {
    /// Create a store, making its directories if needed.
    pub fn new(config: FileStoreConfig) -> Result<Self> {
        fs::create_dir_all(config.saves_dir())?;
        Ok(Self { config })
    }

    /// Store configuration.
    #[must_use]
    pub fn config(&self) -> &FileStoreConfig {
        &self.config
    }

    /// Save files with their timestamps, newest first.
    fn save_files(&self) -> Result<Vec<(i64, PathBuf)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.config.saves_dir())? {
            let path = entry?.path();
            if let Some(millis) = save_millis(&path) {
                files.push((millis, path));
            }
        }
        files.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(files)
    }

    /// First free save path at or after `millis`.
    fn next_save_path(&self, mut millis: i64) -> PathBuf {
        loop {
            let path = self
                .config
                .saves_dir()
                .join(format!("{SAVE_PREFIX}{millis:013}{SAVE_SUFFIX}"));
            if !path.exists() {
                return path;
            }
            millis += 1;
        }
    }

    fn prune(&self) -> Result<()> {
        for (_, path) in self.save_files()?.into_iter().skip(self.config.history_limit) {
            debug!(path = %path.display(), "pruning old save");
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Write through a temporary file so readers never see a partial snapshot.
fn write_json(path: &Path, snapshot: &GameSnapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<GameSnapshot> {
    let contents = fs::read_to_string(path)?;
    GameSnapshot::from_json(&contents)
}

fn save_millis(path: &Path) -> Option<i64> {
    path.file_name()?
        .to_str()?
        .strip_prefix(SAVE_PREFIX)?
        .strip_suffix(SAVE_SUFFIX)?
        .parse()
        .ok()
}

impl PersistenceGateway for JsonFileStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        fs::create_dir_all(self.config.saves_dir())?;
        let path = self.next_save_path(Utc::now().timestamp_millis());
        write_json(&path, snapshot)?;
        info!(path = %path.display(), "game saved");

        if let Err(err) = self.prune() {
            warn!(error = %err, "could not prune save history");
        }
        Ok(())
    }

    fn download(&mut self, snapshot: &GameSnapshot) -> Result<PathBuf> {
        let dir = self.config.downloads_dir();
        fs::create_dir_all(&dir)?;

        let stamp = Utc::now().format("%Y%m%d-%H%M%S%3f");
        let path = dir.join(format!("bingo-{stamp}.json"));
        write_json(&path, snapshot)?;
        info!(path = %path.display(), "game downloaded");
        Ok(path)
    }

    fn load_last(&self) -> Result<Option<GameSnapshot>> {
        match self.save_files()?.first() {
            Some((_, path)) => read_json(path).map(Some),
            None => Ok(None),
        }
    }

    fn load_from_file(&self, path: &Path) -> Result<GameSnapshot> {
        read_json(path)
    }

    fn history(&self) -> Result<Vec<SavedGame>> {
        let mut games = Vec::new();
        for (millis, path) in self.save_files()? {
            let Some(saved_at) = DateTime::from_timestamp_millis(millis) else {
                continue;
            };
            match read_json(&path) {
                Ok(snapshot) => games.push(SavedGame { saved_at, snapshot }),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable save"),
            }
        }
        Ok(games)
    }
}
