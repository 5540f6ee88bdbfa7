//! Player records: identity, name, grid and validations.

use chrono::{DateTime, Utc};
use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};
use crate::grid::Grid;
use crate::pool::PropositionId;

/// Unique identifier for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Records that a grid cell was validated.
///
/// New validations carry a UTC timestamp in milliseconds. Snapshots written
/// by other clients may store a plain flag or text instead; all three are
/// accepted on load and written back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationMarker {
    Flag(bool),
    Timestamp(i64),
    Text(String),
}

impl ValidationMarker {
    /// Marker stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::Timestamp(Utc::now().timestamp_millis())
    }

    /// When the cell was validated, if the marker records it.
    #[must_use]
    pub fn validated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(millis) => DateTime::from_timestamp_millis(*millis),
            Self::Flag(_) | Self::Text(_) => None,
        }
    }
}

/// A player, their grid and the cells they have validated.
///
/// Validation keys are always indices into `grid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// Identity of this player.
    pub id: PlayerId,

    /// Display name. Not unique across players.
    pub name: String,

    /// Proposition references, in draw order.
    pub grid: Grid,

    validated_items: OrdMap<usize, ValidationMarker>,
}

impl PlayerState {
    /// Create an unnamed player with no validations.
    #[must_use]
    pub fn new(id: PlayerId, grid: Grid) -> Self {
        Self {
            id,
            name: String::new(),
            grid,
            validated_items: OrdMap::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Rebuild validations from a serialized pair list.
    ///
    /// Later pairs overwrite earlier ones for the same index.
    #[must_use]
    pub fn with_validations(
        mut self,
        pairs: impl IntoIterator<Item = (usize, ValidationMarker)>,
    ) -> Self {
        self.validated_items = pairs.into_iter().collect();
        self
    }

    /// Validated cells, ordered by index.
    #[must_use]
    pub fn validated_items(&self) -> &OrdMap<usize, ValidationMarker> {
        &self.validated_items
    }

    /// Check if a cell is validated.
    #[must_use]
    pub fn is_validated(&self, index: usize) -> bool {
        self.validated_items.contains_key(&index)
    }

    /// Number of validated cells.
    #[must_use]
    pub fn validation_count(&self) -> usize {
        self.validated_items.len()
    }

    /// True when every cell of a non-empty grid is validated.
    #[must_use]
    pub fn has_bingo(&self) -> bool {
        !self.grid.is_empty() && (0..self.grid.len()).all(|i| self.is_validated(i))
    }

    /// Proposition in a cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<PropositionId> {
        self.grid.get(index).copied()
    }

    /// Mark a cell, overwriting any previous marker.
    pub fn validate(&mut self, index: usize, marker: ValidationMarker) -> Result<()> {
        if index >= self.grid.len() {
            return Err(GameError::InvalidCell {
                index,
                grid_size: self.grid.len(),
            });
        }
        self.validated_items.insert(index, marker);
        Ok(())
    }

    /// Unmark a cell. Returns false if it was not marked.
    pub fn remove_validation(&mut self, index: usize) -> bool {
        self.validated_items.remove(&index).is_some()
    }

    /// Replace the grid, dropping every validation.
    pub fn assign_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.validated_items = OrdMap::new();
    }
}
