//! Proposition pool: the shared set of items grids are drawn from.
//!
//! ## Key Types
//!
//! - `PropositionId`: Identifier referenced by grid cells
//! - `Proposition`: Immutable text item
//! - `PropositionPool`: Ordered pool with id allocation

pub mod proposition;
pub mod registry;

pub use proposition::{Proposition, PropositionId};
pub use registry::{PropositionPool, DEFAULT_PROPOSITIONS};
