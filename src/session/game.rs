//! The session context: one active game and its state.
//!
//! `GameSession` owns the proposition pool, the player registry, the RNG and
//! the session state. Every mutation goes through it, so the state machine
//! sees every edit. Structural errors leave everything untouched.

use tracing::{debug, info, warn};

use super::prompt::ConfirmPrompt;
use super::state::{SessionFlags, SessionState};
use crate::core::{GameConfig, GameError, GameRng, Result};
use crate::grid::GridGenerator;
use crate::players::{PlayerId, PlayerRegistry, PlayerState, ValidationMarker};
use crate::pool::{Proposition, PropositionId, PropositionPool};
use crate::snapshot::{GameSnapshot, StaleReference};

/// What a grid cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell<'a> {
    /// The referenced proposition is in the pool.
    Proposition(&'a Proposition),
    /// The proposition was removed after the grid was drawn.
    Unknown(PropositionId),
}

/// A single active game session.
///
/// ## Example
///
/// ```
/// use rust_bingo::core::GameConfig;
/// use rust_bingo::pool::PropositionPool;
/// use rust_bingo::session::GameSession;
///
/// let pool = PropositionPool::from_texts(["A", "B", "C", "D", "E", "F"]);
/// let mut session = GameSession::new(GameConfig::new().with_seed(1), pool);
///
/// let player = session.add_player().unwrap();
/// session.validate_item(player, 0).unwrap();
///
/// assert!(session.flags().has_unsaved_changes);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    pool: PropositionPool,
    players: PlayerRegistry,
    generator: GridGenerator,
    rng: GameRng,
    state: SessionState,
    revision: u64,
}

impl GameSession {
    /// Create a clean session with no players.
    #[must_use]
    pub fn new(config: GameConfig, pool: PropositionPool) -> Self {
        let rng = GameRng::from_seed_option(config.seed);
        debug!(seed = rng.seed(), "session created");
        Self {
            players: PlayerRegistry::new(config.min_players, config.max_players),
            generator: GridGenerator::new(config.items_per_grid),
            pool,
            rng,
            state: SessionState::Clean,
            revision: 0,
            config,
        }
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Proposition pool.
    #[must_use]
    pub fn pool(&self) -> &PropositionPool {
        &self.pool
    }

    /// Player registry.
    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current session flags.
    #[must_use]
    pub fn flags(&self) -> SessionFlags {
        self.state.flags()
    }

    /// Counter bumped by every mutation and load.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn transition(&mut self, next: SessionState, cause: &'static str) {
        if next != self.state {
            debug!(from = %self.state, to = %next, cause, "session transition");
        }
        self.state = next;
        self.revision += 1;
    }

    fn touch(&mut self, cause: &'static str) {
        self.transition(self.state.after_edit(), cause);
    }

    // === Proposition Pool ===

    /// Append a proposition to the pool.
    pub fn add_proposition(&mut self, text: impl Into<String>) -> PropositionId {
        let id = self.pool.add(text);
        self.touch("add_proposition");
        id
    }

    /// Remove a proposition. Grids that reference it are left as they are.
    ///
    /// Absent ids are a no-op and leave the state untouched.
    pub fn remove_proposition(&mut self, id: PropositionId) -> Option<Proposition> {
        let removed = self.pool.remove(id)?;
        self.touch("remove_proposition");
        Some(removed)
    }

    // === Grid Generator ===

    /// Redraw every player's grid, clearing all validations.
    ///
    /// Fails with `InsufficientPool` when the pool cannot fill one grid;
    /// existing grids are then untouched. With no players there is nothing
    /// to regenerate and the state is left as it is.
    pub fn generate_new_grids(&mut self) -> Result<()> {
        let grids = self
            .generator
            .draw_many(self.players.len(), &self.pool, &mut self.rng)?;

        if grids.is_empty() {
            return Ok(());
        }
        self.players.assign_grids(grids);
        self.touch("generate_new_grids");
        Ok(())
    }

    // === Player Registry ===

    /// Add an unnamed player with a freshly drawn grid.
    pub fn add_player(&mut self) -> Result<PlayerId> {
        let generator = self.generator;
        let pool = &self.pool;
        let rng = &mut self.rng;
        let id = self.players.add_with(|| generator.draw(pool, rng))?;
        self.touch("add_player");
        Ok(id)
    }

    /// Remove a player. Absent ids are a no-op.
    ///
    /// The advisory minimum is not enforced here.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<PlayerState> {
        let removed = self.players.remove(id)?;
        self.touch("remove_player");
        Some(removed)
    }

    /// Replace a player's name. Returns false if the player is absent.
    pub fn update_player_name(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let renamed = self.players.rename(id, name);
        if renamed {
            self.touch("update_player_name");
        }
        renamed
    }

    /// Mark a cell as validated now, overwriting any previous marker.
    ///
    /// Returns `Ok(false)` if the player is absent.
    pub fn validate_item(&mut self, player: PlayerId, index: usize) -> Result<bool> {
        self.validate_item_with(player, index, ValidationMarker::now())
    }

    /// Mark a cell with an explicit marker.
    pub fn validate_item_with(
        &mut self,
        player: PlayerId,
        index: usize,
        marker: ValidationMarker,
    ) -> Result<bool> {
        if index >= self.config.items_per_grid {
            return Err(GameError::InvalidCell {
                index,
                grid_size: self.config.items_per_grid,
            });
        }

        let validated = self.players.validate(player, index, marker)?;
        if validated {
            self.touch("validate_item");
        }
        Ok(validated)
    }

    /// Unmark a cell. Returns false if nothing was marked.
    pub fn remove_validation(&mut self, player: PlayerId, index: usize) -> bool {
        let removed = self.players.remove_validation(player, index);
        if removed {
            self.touch("remove_validation");
        }
        removed
    }

    // === Snapshots ===

    /// Capture the complete game state.
    #[must_use]
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.players.iter(), &self.pool)
    }

    /// Apply an external snapshot, replacing players and pool wholesale.
    ///
    /// This is the single entry point for file imports, history selection,
    /// startup restore and remote pushes. The last snapshot applied wins.
    /// A snapshot failing its structural check is rejected before anything
    /// is replaced.
    pub fn load_game_state(
        &mut self,
        snapshot: &GameSnapshot,
        mark_as_loaded: bool,
        mark_as_changed: bool,
    ) -> Result<()> {
        snapshot.check()?;

        let stale = snapshot.stale_references();
        if !stale.is_empty() {
            warn!(count = stale.len(), "snapshot grids reference missing propositions");
        }

        self.pool = snapshot.to_pool();
        self.players.replace_all(snapshot.to_players());
        self.transition(
            SessionState::after_load(mark_as_loaded, mark_as_changed),
            "load_game_state",
        );

        info!(
            players = self.players.len(),
            propositions = self.pool.len(),
            mark_as_loaded,
            mark_as_changed,
            "game state loaded"
        );
        Ok(())
    }

    /// Record a successful save: every flag is cleared.
    pub fn mark_saved(&mut self) {
        let next = self.state.after_save();
        if next != self.state {
            debug!(from = %self.state, to = %next, "session saved");
        }
        self.state = next;
    }

    /// Gate a discarding action behind the user's confirmation.
    ///
    /// Returns true without prompting when there is nothing unsaved.
    pub fn confirm_unsaved_changes(&self, prompt: &mut impl ConfirmPrompt) -> bool {
        if !self.state.has_unsaved_changes() {
            return true;
        }
        prompt.confirm_discard()
    }

    // === Rendering ===

    /// What a player's cell shows, or `None` if there is no such cell.
    #[must_use]
    pub fn cell(&self, player: PlayerId, index: usize) -> Option<Cell<'_>> {
        let id = self.players.get(player)?.cell(index)?;
        Some(
            self.pool
                .get(id)
                .map_or(Cell::Unknown(id), Cell::Proposition),
        )
    }

    /// Grid cells whose proposition is no longer in the pool.
    #[must_use]
    pub fn stale_references(&self) -> Vec<StaleReference> {
        self.players
            .iter()
            .flat_map(|player| {
                player
                    .grid
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| !self.pool.contains(**id))
                    .map(|(index, id)| StaleReference {
                        player: player.id,
                        index,
                        proposition: *id,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
