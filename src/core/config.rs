//! Game configuration.
//!
//! The session engine never hardcodes grid size or player bounds. Callers
//! provide a `GameConfig` at session start; `GameConfig::default()` carries
//! the standard values:
//!
//! - `items_per_grid`: 6
//! - `min_players`: 0 (advisory only)
//! - `max_players`: 100

use serde::{Deserialize, Serialize};

/// Number of propositions in every player grid.
pub const ITEMS_PER_GRID: usize = 6;

/// Advisory lower bound on players. Never enforced.
pub const MIN_PLAYERS: usize = 0;

/// Hard upper bound on players.
pub const MAX_PLAYERS: usize = 100;

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use rust_bingo::core::GameConfig;
///
/// let config = GameConfig::new()
///     .with_items_per_grid(4)
///     .with_player_bounds(1, 8)
///     .with_seed(42);
///
/// assert_eq!(config.items_per_grid, 4);
/// assert_eq!(config.max_players, 8);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Propositions drawn into each grid.
    pub items_per_grid: usize,

    /// Advisory minimum player count (UI hint).
    pub min_players: usize,

    /// Maximum player count; `add_player` fails beyond it.
    pub max_players: usize,

    /// Seed for grid draws. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Save automatically after every edit routed through the controller.
    pub auto_save: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            items_per_grid: ITEMS_PER_GRID,
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            seed: None,
            auto_save: true,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the standard values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size.
    #[must_use]
    pub fn with_items_per_grid(mut self, items: usize) -> Self {
        assert!(items > 0, "Grid must hold at least 1 item");
        self.items_per_grid = items;
        self
    }

    /// Set the advisory minimum and the hard maximum player count.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        assert!(min <= max, "Minimum players cannot exceed maximum");
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Use a fixed seed so grid draws are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable auto-save after edits.
    #[must_use]
    pub fn with_auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }
}
