//! Player registry: per-player grids and validations.
//!
//! ## Key Types
//!
//! - `PlayerId`: Stable player identifier
//! - `PlayerState`: Name, grid and validation map
//! - `ValidationMarker`: What a validated cell records
//! - `PlayerRegistry`: Bounded player collection

pub mod player;
pub mod registry;

pub use player::{PlayerId, PlayerState, ValidationMarker};
pub use registry::PlayerRegistry;
