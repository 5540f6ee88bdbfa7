//! Player registry: the bounded collection of players in a session.
//!
//! The maximum is a hard limit. The minimum is advisory: removing players
//! below it is a valid action, surfaced only as a hint.

use im::Vector;
use tracing::debug;

use super::player::{PlayerId, PlayerState, ValidationMarker};
use crate::core::{GameError, Result};
use crate::grid::Grid;

/// Ordered, bounded collection of players.
///
/// ## Example
///
/// ```
/// use rust_bingo::players::PlayerRegistry;
/// use rust_bingo::grid::Grid;
///
/// let mut registry = PlayerRegistry::new(0, 2);
/// let alice = registry.add_with(|| Ok(Grid::new())).unwrap();
/// registry.rename(alice, "Alice");
///
/// assert_eq!(registry.get(alice).unwrap().name, "Alice");
/// ```
#[derive(Clone, Debug)]
pub struct PlayerRegistry {
    players: Vector<PlayerState>,
    next_id: u64,
    min_players: usize,
    max_players: usize,
}

impl PlayerRegistry {
    /// Create an empty registry with the given bounds.
    #[must_use]
    pub fn new(min_players: usize, max_players: usize) -> Self {
        Self {
            players: Vector::new(),
            next_id: 0,
            min_players,
            max_players,
        }
    }

    /// Replace every player, keeping the bounds.
    ///
    /// Id allocation resumes above the highest id present. A loaded set
    /// larger than the maximum is kept as-is; only new additions are refused.
    pub fn replace_all(&mut self, players: impl IntoIterator<Item = PlayerState>) {
        self.players = players.into_iter().collect();
        self.next_id = self.players.iter().map(|p| p.id.raw()).max().unwrap_or(0);
    }

    /// Add a player whose grid is produced by `draw`.
    ///
    /// Capacity is checked before drawing. If `draw` fails, no player is
    /// added and no id is consumed.
    pub fn add_with<F>(&mut self, draw: F) -> Result<PlayerId>
    where
        F: FnOnce() -> Result<Grid>,
    {
        if self.is_full() {
            return Err(GameError::CapacityExceeded {
                max: self.max_players,
            });
        }

        let grid = draw()?;
        self.next_id += 1;
        let id = PlayerId::new(self.next_id);
        self.players.push_back(PlayerState::new(id, grid));
        debug!(%id, players = self.players.len(), "player added");
        Ok(id)
    }

    /// Remove a player. Returns `None` if the id was absent.
    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerState> {
        let pos = self.position(id)?;
        let removed = self.players.remove(pos);
        debug!(%id, players = self.players.len(), "player removed");
        Some(removed)
    }

    /// Rename a player. Returns false if the id was absent.
    pub fn rename(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(player) => {
                player.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Mark a cell for a player.
    ///
    /// Returns `Ok(false)` if the player is absent.
    pub fn validate(
        &mut self,
        id: PlayerId,
        index: usize,
        marker: ValidationMarker,
    ) -> Result<bool> {
        match self.get_mut(id) {
            Some(player) => player.validate(index, marker).map(|()| true),
            None => Ok(false),
        }
    }

    /// Unmark a cell. Returns false if nothing was removed.
    pub fn remove_validation(&mut self, id: PlayerId, index: usize) -> bool {
        self.get_mut(id)
            .is_some_and(|player| player.remove_validation(index))
    }

    /// Assign one grid per player, in registry order.
    ///
    /// Every player's validations are cleared.
    pub fn assign_grids(&mut self, grids: Vec<Grid>) {
        debug_assert_eq!(grids.len(), self.players.len());
        for (player, grid) in self.players.iter_mut().zip(grids) {
            player.assign_grid(grid);
        }
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        let pos = self.position(id)?;
        self.players.get_mut(pos)
    }

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Iterate over players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter()
    }

    /// Get the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if there are no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check if another player would exceed the maximum.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// UI hint: fewer players than the advisory minimum.
    #[must_use]
    pub fn is_below_minimum(&self) -> bool {
        self.players.len() < self.min_players
    }

    /// Maximum player count.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Advisory minimum player count.
    #[must_use]
    pub fn min_players(&self) -> usize {
        self.min_players
    }
}
