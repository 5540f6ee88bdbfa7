//! Session orchestrator: wires the session to its collaborators.
//!
//! `SessionController` owns the `GameSession`, the persistence gateway and
//! an optional sync gateway. It implements the application handlers:
//! startup restore, manual and automatic saves, downloads, file and history
//! loads, cancelling edits and applying remote snapshots.
//!
//! Persistence calls are synchronous and borrow the controller mutably, so
//! the session cannot change between capturing a snapshot and recording
//! that it was saved.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::game::GameSession;
use super::prompt::ConfirmPrompt;
use crate::core::Result;
use crate::persistence::{PersistenceGateway, SavedGame};
use crate::snapshot::GameSnapshot;
use crate::sync::{Presence, SyncGateway};

/// Top-level owner of one session and its collaborators.
///
/// ## Example
///
/// ```
/// use rust_bingo::core::GameConfig;
/// use rust_bingo::persistence::MemoryStore;
/// use rust_bingo::pool::PropositionPool;
/// use rust_bingo::session::{GameSession, SessionController};
///
/// let pool = PropositionPool::from_texts(["A", "B", "C", "D", "E", "F"]);
/// let session = GameSession::new(GameConfig::new().with_seed(7), pool);
/// let mut controller = SessionController::start(session, MemoryStore::new());
///
/// controller.edit(|s| s.add_player()).unwrap();
///
/// // Auto-save ran after the edit
/// assert!(!controller.session().flags().is_changed);
/// assert_eq!(controller.persistence().saves().len(), 1);
/// ```
pub struct SessionController<P: PersistenceGateway> {
    session: GameSession,
    persistence: P,
    sync: Option<Box<dyn SyncGateway>>,
}

impl<P: PersistenceGateway> SessionController<P> {
    /// Wrap a session without touching storage.
    pub fn new(session: GameSession, persistence: P) -> Self {
        Self {
            session,
            persistence,
            sync: None,
        }
    }

    /// Wrap a session and restore the last saved game.
    pub fn start(session: GameSession, persistence: P) -> Self {
        let mut controller = Self::new(session, persistence);
        controller.handle_load_last_game();
        controller
    }

    /// Attach a sync gateway for publishing saves and receiving pushes.
    #[must_use]
    pub fn with_sync(mut self, sync: impl SyncGateway + 'static) -> Self {
        self.sync = Some(Box::new(sync));
        self
    }

    /// The active session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The persistence gateway.
    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Mutable access to the persistence gateway.
    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Presence reported by the sync gateway, if one is attached.
    #[must_use]
    pub fn presence(&self) -> Option<Presence> {
        self.sync.as_ref().map(|sync| sync.presence())
    }

    /// Run one session operation, then auto-save if it changed anything.
    ///
    /// Auto-save only runs when enabled in the config and the operation
    /// left unsaved changes behind.
    pub fn edit<T>(&mut self, op: impl FnOnce(&mut GameSession) -> T) -> T {
        let revision = self.session.revision();
        let out = op(&mut self.session);

        if self.session.config().auto_save
            && self.session.revision() != revision
            && self.session.flags().has_unsaved_changes
        {
            self.handle_auto_save();
        }
        out
    }

    fn save_current(&mut self) -> Result<()> {
        let snapshot = self.session.to_snapshot();
        self.persistence.save(&snapshot)?;
        self.session.mark_saved();

        if let Some(sync) = self.sync.as_mut() {
            if let Err(err) = sync.publish(&snapshot) {
                warn!(error = %err, "could not publish saved game");
            }
        }
        Ok(())
    }

    /// Save without involving the user. Failures are logged only.
    ///
    /// Returns whether the save succeeded.
    pub fn handle_auto_save(&mut self) -> bool {
        match self.save_current() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "auto-save failed");
                false
            }
        }
    }

    /// Save at the user's request. Failures are returned for display.
    pub fn handle_save_game(&mut self) -> Result<()> {
        self.save_current()?;
        info!("game saved by user");
        Ok(())
    }

    /// Write the current game as a file artifact. Flags are untouched.
    pub fn handle_download_game(&mut self) -> Result<PathBuf> {
        let snapshot = self.session.to_snapshot();
        self.persistence.download(&snapshot)
    }

    /// Import a game from a file and mark it as loaded.
    ///
    /// A malformed file aborts the load with nothing applied.
    pub fn handle_load_game(&mut self, path: &Path) -> Result<()> {
        let snapshot = self.persistence.load_from_file(path)?;
        self.session.load_game_state(&snapshot, true, true)
    }

    /// Load a game picked from the save history and mark it as loaded.
    pub fn handle_load_game_from_history(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.session.load_game_state(snapshot, true, true)
    }

    /// Saved games, most recent first.
    pub fn saved_games(&self) -> Result<Vec<SavedGame>> {
        self.persistence.history()
    }

    /// Restore the last save silently, or start fresh grids.
    ///
    /// Never fails: a missing, unreadable or rejected save falls back to
    /// `generate_new_grids`, and a failure there is logged.
    pub fn handle_load_last_game(&mut self) {
        let loaded = match self.persistence.load_last() {
            Ok(Some(snapshot)) => self.session.load_game_state(&snapshot, false, false),
            Ok(None) => {
                info!("no saved game, generating new grids");
                return self.fresh_grids();
            }
            Err(err) => Err(err),
        };

        if let Err(err) = loaded {
            warn!(error = %err, "could not load last game, generating new grids");
            self.fresh_grids();
        }
    }

    fn fresh_grids(&mut self) {
        if let Err(err) = self.session.generate_new_grids() {
            warn!(error = %err, "startup restore incomplete");
        }
    }

    /// Discard edits and return to the last save, if the user agrees.
    ///
    /// Returns whether the session was reverted.
    pub fn handle_cancel_changes(&mut self, prompt: &mut impl ConfirmPrompt) -> bool {
        if !self.session.confirm_unsaved_changes(prompt) {
            return false;
        }
        self.handle_load_last_game();
        true
    }

    /// Apply a snapshot pushed by another session.
    pub fn handle_remote_snapshot(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.session.load_game_state(snapshot, false, true)?;
        info!("remote snapshot applied");
        Ok(())
    }

    /// Apply every pending remote snapshot, in arrival order.
    ///
    /// Returns how many were applied. Rejected snapshots are logged.
    pub fn poll_sync(&mut self) -> usize {
        let mut applied = 0;
        while let Some(snapshot) = self.sync.as_mut().and_then(|sync| sync.poll()) {
            match self.handle_remote_snapshot(&snapshot) {
                Ok(()) => applied += 1,
                Err(err) => warn!(error = %err, "rejected remote snapshot"),
            }
        }
        applied
    }
}
