//! Proposition pool: the ordered set grids are drawn from.
//!
//! Removing a proposition never edits grids that already reference it.
//! Those references become stale and are rendered as unknown items.

use im::Vector;
use tracing::debug;

use super::proposition::{Proposition, PropositionId};

/// Propositions a new game starts with when nothing was saved yet.
pub const DEFAULT_PROPOSITIONS: [&str; 12] = [
    "Someone is late",
    "Coffee gets spilled",
    "A meeting runs over",
    "Someone says \"you're on mute\"",
    "The wifi drops",
    "A phone rings",
    "Someone forgets their badge",
    "Cake in the kitchen",
    "A printer jams",
    "Fire drill",
    "Someone replies all",
    "A deadline moves",
];

/// Ordered pool of propositions.
///
/// Backed by a persistent `im::Vector`, so capturing the pool for a
/// snapshot is O(1).
///
/// ## Example
///
/// ```
/// use rust_bingo::pool::PropositionPool;
///
/// let mut pool = PropositionPool::from_texts(["Rain", "Late train"]);
/// let id = pool.add("Coffee spill");
///
/// assert_eq!(pool.len(), 3);
/// assert_eq!(pool.get(id).unwrap().text, "Coffee spill");
///
/// pool.remove(id);
/// assert!(!pool.contains(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropositionPool {
    items: Vector<Proposition>,
    next_id: u64,
}

impl PropositionPool {
    /// Create a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool from texts, assigning ids in order from 1.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::new();
        for text in texts {
            pool.add(text);
        }
        pool
    }

    /// Pool seeded with `DEFAULT_PROPOSITIONS`.
    #[must_use]
    pub fn default_set() -> Self {
        Self::from_texts(DEFAULT_PROPOSITIONS)
    }

    /// Rebuild a pool from existing propositions, keeping their ids.
    ///
    /// Id allocation resumes above the highest id present.
    pub fn from_propositions(items: impl IntoIterator<Item = Proposition>) -> Self {
        let items: Vector<Proposition> = items.into_iter().collect();
        let next_id = items.iter().map(|p| p.id.raw()).max().unwrap_or(0);
        Self { items, next_id }
    }

    /// Append a proposition with a freshly allocated id.
    pub fn add(&mut self, text: impl Into<String>) -> PropositionId {
        self.next_id += 1;
        let id = PropositionId::new(self.next_id);
        self.items.push_back(Proposition::new(id, text));
        debug!(%id, "proposition added");
        id
    }

    /// Remove a proposition by id.
    ///
    /// Returns the removed proposition, or `None` if the id was absent.
    pub fn remove(&mut self, id: PropositionId) -> Option<Proposition> {
        let pos = self.items.iter().position(|p| p.id == id)?;
        let removed = self.items.remove(pos);
        debug!(%id, "proposition removed");
        Some(removed)
    }

    /// Get a proposition by id.
    #[must_use]
    pub fn get(&self, id: PropositionId) -> Option<&Proposition> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Get a proposition by position in the pool.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Proposition> {
        self.items.get(index)
    }

    /// Check if a proposition id is in the pool.
    #[must_use]
    pub fn contains(&self, id: PropositionId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of propositions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over propositions in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposition> {
        self.items.iter()
    }
}
