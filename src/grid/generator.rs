//! Grid generation: random content, deterministic shape.

use tracing::debug;

use super::Grid;
use crate::core::{GameError, GameRng, Result};
use crate::pool::PropositionPool;

/// Draws grids of a fixed size from a proposition pool.
///
/// Each grid holds `items_per_grid` distinct propositions in draw order.
/// Draws are independent per grid: two grids may share propositions.
///
/// ## Example
///
/// ```
/// use rust_bingo::core::GameRng;
/// use rust_bingo::grid::GridGenerator;
/// use rust_bingo::pool::PropositionPool;
///
/// let pool = PropositionPool::from_texts(["A", "B", "C", "D", "E", "F", "G"]);
/// let generator = GridGenerator::new(6);
/// let mut rng = GameRng::new(42);
///
/// let grid = generator.draw(&pool, &mut rng).unwrap();
/// assert_eq!(grid.len(), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGenerator {
    items_per_grid: usize,
}

impl GridGenerator {
    /// Create a generator for grids of `items_per_grid` cells.
    #[must_use]
    pub const fn new(items_per_grid: usize) -> Self {
        Self { items_per_grid }
    }

    /// Cells per generated grid.
    #[must_use]
    pub const fn items_per_grid(&self) -> usize {
        self.items_per_grid
    }

    /// Check that the pool can fill a grid without repeats.
    pub fn ensure_pool(&self, pool: &PropositionPool) -> Result<()> {
        if pool.len() < self.items_per_grid {
            return Err(GameError::InsufficientPool {
                available: pool.len(),
                required: self.items_per_grid,
            });
        }
        Ok(())
    }

    /// Draw one grid.
    ///
    /// Fails with `InsufficientPool` rather than producing a short or
    /// repeating grid.
    pub fn draw(&self, pool: &PropositionPool, rng: &mut GameRng) -> Result<Grid> {
        self.ensure_pool(pool)?;

        let indices = rng
            .sample_indices(pool.len(), self.items_per_grid)
            .ok_or(GameError::InsufficientPool {
                available: pool.len(),
                required: self.items_per_grid,
            })?;

        let grid: Grid = indices
            .into_iter()
            .filter_map(|i| pool.get_index(i).map(|p| p.id))
            .collect();

        debug!(cells = grid.len(), pool = pool.len(), "grid drawn");
        Ok(grid)
    }

    /// Draw `count` independent grids.
    ///
    /// All-or-nothing: on error no grid is returned.
    pub fn draw_many(
        &self,
        count: usize,
        pool: &PropositionPool,
        rng: &mut GameRng,
    ) -> Result<Vec<Grid>> {
        self.ensure_pool(pool)?;
        (0..count).map(|_| self.draw(pool, rng)).collect()
    }
}
