//! Session state machine and orchestration.
//!
//! ## Key Types
//!
//! - `SessionState`: Explicit Clean / Dirty / LoadedClean / LoadedDirty state
//! - `SessionFlags`: The `(is_changed, is_loaded_game, has_unsaved_changes)` view
//! - `GameSession`: Session context owning pool, players and state
//! - `SessionController`: Application handlers over persistence and sync
//! - `ConfirmPrompt`: User confirmation before discarding edits
//!
//! ## Snapshot Sources
//!
//! | Source           | `mark_as_loaded` | `mark_as_changed` |
//! |------------------|------------------|-------------------|
//! | Startup restore  | false            | false             |
//! | File import      | true             | true              |
//! | History pick     | true             | true              |
//! | Remote push      | false            | true              |

mod controller;
mod game;
mod prompt;
mod state;

pub use controller::SessionController;
pub use game::{Cell, GameSession};
pub use prompt::ConfirmPrompt;
pub use state::{SessionFlags, SessionState};
