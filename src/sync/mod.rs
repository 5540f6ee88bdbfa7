//! Sync gateway: snapshots pushed between sessions.
//!
//! Remote snapshots arrive out of band. The session core drains them with
//! `SyncGateway::poll` and applies each through `load_game_state`, so every
//! snapshot source goes through the same entry point. There is no merge:
//! the last snapshot applied wins.

mod hub;

pub use hub::{LocalSyncHub, SyncLink};

use crate::core::Result;
use crate::snapshot::GameSnapshot;

/// How many other sessions are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Presence {
    pub online_peers: usize,
}

impl Presence {
    /// Check if any other session is connected.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online_peers > 0
    }
}

/// Network collaborator delivering snapshots from other sessions.
pub trait SyncGateway {
    /// Send a snapshot to every other session.
    fn publish(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Next pending remote snapshot, without blocking.
    fn poll(&mut self) -> Option<GameSnapshot>;

    /// Current presence indicator.
    fn presence(&self) -> Presence;
}
