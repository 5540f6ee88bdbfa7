//! Explicit session state machine.
//!
//! ## States
//!
//! | State         | changed | loaded | unsaved |
//! |---------------|---------|--------|---------|
//! | `Clean`       | false   | false  | false   |
//! | `Dirty`       | true    | false  | true    |
//! | `LoadedClean` | false   | true   | false   |
//! | `LoadedDirty` | true    | true   | true    |
//!
//! The three flags always move together: `is_changed` and
//! `has_unsaved_changes` are the same bit, `is_loaded_game` the other.
//!
//! ## Transitions
//!
//! - edit: `Clean -> Dirty`, `LoadedClean -> LoadedDirty`, dirty states stay
//! - load: chosen by the caller's `(mark_as_loaded, mark_as_changed)`
//! - save: any state `-> Clean`

use serde::{Deserialize, Serialize};

/// Where the active game stands relative to its last save or load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Fresh session, silent restore, or just saved.
    #[default]
    Clean,
    /// Edited during normal play.
    Dirty,
    /// Explicitly loaded, nothing to save yet.
    LoadedClean,
    /// Explicitly loaded and needing a save.
    LoadedDirty,
}

impl SessionState {
    /// State after a mutating action.
    #[must_use]
    pub const fn after_edit(self) -> Self {
        match self {
            Self::Clean | Self::Dirty => Self::Dirty,
            Self::LoadedClean | Self::LoadedDirty => Self::LoadedDirty,
        }
    }

    /// State after an external snapshot is applied.
    #[must_use]
    pub const fn after_load(mark_as_loaded: bool, mark_as_changed: bool) -> Self {
        match (mark_as_loaded, mark_as_changed) {
            (false, false) => Self::Clean,
            (false, true) => Self::Dirty,
            (true, false) => Self::LoadedClean,
            (true, true) => Self::LoadedDirty,
        }
    }

    /// State after a successful save.
    #[must_use]
    pub const fn after_save(self) -> Self {
        Self::Clean
    }

    /// In-memory state differs from the last confirmed baseline.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Dirty | Self::LoadedDirty)
    }

    /// Active game came from an explicit load.
    #[must_use]
    pub const fn is_loaded_game(self) -> bool {
        matches!(self, Self::LoadedClean | Self::LoadedDirty)
    }

    /// Edits exist the user has not been offered to discard.
    #[must_use]
    pub const fn has_unsaved_changes(self) -> bool {
        self.is_changed()
    }

    /// The flag triple, for save/discard UI gating.
    #[must_use]
    pub const fn flags(self) -> SessionFlags {
        SessionFlags {
            is_changed: self.is_changed(),
            is_loaded_game: self.is_loaded_game(),
            has_unsaved_changes: self.has_unsaved_changes(),
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::LoadedClean => "loaded-clean",
            Self::LoadedDirty => "loaded-dirty",
        };
        f.write_str(name)
    }
}

/// Read-only view of the session flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFlags {
    pub is_changed: bool,
    pub is_loaded_game: bool,
    pub has_unsaved_changes: bool,
}

impl SessionFlags {
    /// All flags cleared.
    #[must_use]
    pub const fn clean() -> Self {
        Self {
            is_changed: false,
            is_loaded_game: false,
            has_unsaved_changes: false,
        }
    }
}
