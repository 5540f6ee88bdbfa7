//! Error types for session operations.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GameError>;

/// Every failure a session operation can report.
///
/// `InsufficientPool`, `CapacityExceeded` and `InvalidCell` are caller
/// contract violations: the call is rejected and state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The pool is too small to fill a grid without repeats.
    #[error("Proposition pool has {available} items, {required} needed to fill a grid")]
    InsufficientPool { available: usize, required: usize },

    /// A player was added beyond the configured maximum.
    #[error("Player limit of {max} reached")]
    CapacityExceeded { max: usize },

    /// A validation targeted a cell outside the grid.
    #[error("Cell index {index} is outside a grid of {grid_size} items")]
    InvalidCell { index: usize, grid_size: usize },

    /// A loaded snapshot was malformed.
    #[error("Malformed snapshot: {0}")]
    Parse(String),

    /// Save, download or load I/O failed.
    #[error("Persistence failure: {message}")]
    Persistence { message: String },
}

impl GameError {
    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Check if this error is a rejected caller contract rather than I/O.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPool { .. } | Self::CapacityExceeded { .. } | Self::InvalidCell { .. }
        )
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::InsufficientPool {
            available: 3,
            required: 6,
        };
        assert_eq!(
            err.to_string(),
            "Proposition pool has 3 items, 6 needed to fill a grid"
        );

        let err = GameError::InvalidCell {
            index: 6,
            grid_size: 6,
        };
        assert_eq!(err.to_string(), "Cell index 6 is outside a grid of 6 items");
    }

    #[test]
    fn test_structural() {
        assert!(GameError::CapacityExceeded { max: 100 }.is_structural());
        assert!(!GameError::parse("bad").is_structural());
        assert!(!GameError::persistence("disk full").is_structural());
    }

    #[test]
    fn test_from_serde_json() {
        let err: GameError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, GameError::Parse(_)));
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GameError = io.into();
        assert_eq!(err, GameError::persistence("denied"));
    }
}
