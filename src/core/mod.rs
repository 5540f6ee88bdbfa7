//! Core engine types: configuration, errors, RNG.
//!
//! These are shared by every component. Games configure grid size and
//! player bounds via `GameConfig` rather than modifying the components.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, ITEMS_PER_GRID, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{GameError, Result};
pub use rng::GameRng;
