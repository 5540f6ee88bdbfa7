//! Propositions - the text items players mark off.
//!
//! A `Proposition` is immutable once created; its identity is the id.
//! Grids hold `PropositionId`s, never the propositions themselves.

use serde::{Deserialize, Serialize};

/// Unique identifier for a proposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropositionId(pub u64);

impl PropositionId {
    /// Create a new proposition ID.
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

impl std::fmt::Display for PropositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Proposition({})", self.0)
    }
}

/// A single text item that can appear in player grids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proposition {
    /// Identity of this proposition.
    pub id: PropositionId,

    /// Display text.
    pub text: String,
}

impl Proposition {
    /// Create a new proposition.
    pub fn new(id: PropositionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
