//! # rust-bingo
//!
//! Session engine for multiplayer bingo-style grids: a shared pool of
//! propositions is drawn into one fixed-size grid per player, and players
//! validate cells as events happen.
//!
//! ## Design Principles
//!
//! 1. **One Entry Point for Snapshots**: File imports, history picks,
//!    startup restore and remote pushes all go through
//!    `GameSession::load_game_state`. The last snapshot applied wins.
//!
//! 2. **Explicit Session State**: The save/discard flags are derived from a
//!    four-state `SessionState`, so they always move together.
//!
//! 3. **Collaborators at the Edges**: Storage and networking sit behind the
//!    `PersistenceGateway` and `SyncGateway` traits.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG
//! - `pool`: Proposition pool
//! - `grid`: Grid type and generator
//! - `players`: Player registry and validations
//! - `snapshot`: Serializable game state
//! - `session`: State machine, session context, controller
//! - `persistence`: Save/load gateway and stores
//! - `sync`: Remote snapshot gateway and in-process hub

pub mod core;
pub mod pool;
pub mod grid;
pub mod players;
pub mod snapshot;
pub mod session;
pub mod persistence;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, GameRng, Result, ITEMS_PER_GRID, MAX_PLAYERS, MIN_PLAYERS};

pub use crate::pool::{Proposition, PropositionId, PropositionPool, DEFAULT_PROPOSITIONS};

pub use crate::grid::{Grid, GridGenerator};

pub use crate::players::{PlayerId, PlayerRegistry, PlayerState, ValidationMarker};

pub use crate::snapshot::{GameSnapshot, PlayerSnapshot, StaleReference};

pub use crate::session::{
    Cell, ConfirmPrompt, GameSession, SessionController, SessionFlags, SessionState,
};

pub use crate::persistence::{
    FileStoreConfig, JsonFileStore, MemoryStore, PersistenceGateway, SavedGame,
};

pub use crate::sync::{LocalSyncHub, Presence, SyncGateway, SyncLink};
