//! Errors reported by the engine
//!
//! All of them describe a caller contract violation: bad parameters, an illegal move, or asking
//! for a move where none exists.

use crate::impartial::variant::VariantKind;

/// Engine error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Initialization parameters violate their bounds
    #[error("invalid parameters: {0}")]
    InvalidParameter(String),

    /// Move is not one of the legal moves of the position
    #[error("move {movement} is not legal in position {position}")]
    InvalidMove {
        /// Position the move was applied to
        position: String,
        /// Rejected move
        movement: String,
    },

    /// Position has no legal moves to select from
    #[error("position is terminal, there is no move to select")]
    EmptyMoveSet,

    /// Session has not been initialized yet
    #[error("session has not been initialized")]
    NotStarted,

    /// Move or position belongs to a different game than the one in play
    #[error("expected {expected} but got {found}")]
    VariantMismatch {
        /// Variant of the game in play
        expected: VariantKind,
        /// Variant of the rejected value
        found: VariantKind,
    },
}

impl Error {
    /// Construct [`Error::InvalidMove`] from anything printable
    pub fn invalid_move(position: &impl std::fmt::Display, movement: &impl std::fmt::Display) -> Self {
        Self::InvalidMove {
            position: position.to_string(),
            movement: movement.to_string(),
        }
    }
}

/// Result with engine [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
