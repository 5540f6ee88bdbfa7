//! Grids and the generator that fills them.
//!
//! A `Grid` is a fixed-size ordered list of proposition references owned by
//! one player. The `GridGenerator` fills grids by drawing distinct
//! propositions from the pool without replacement.

mod generator;

pub use generator::GridGenerator;

use smallvec::SmallVec;

use crate::core::ITEMS_PER_GRID;
use crate::pool::PropositionId;

/// Ordered proposition references for one player.
///
/// SmallVec keeps standard-size grids inline without heap allocation.
pub type Grid = SmallVec<[PropositionId; ITEMS_PER_GRID]>;
