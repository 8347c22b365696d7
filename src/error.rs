//! Error types for the snake engine.

use derive_more::{Display, Error};

use crate::game::SnakeConfig;

/// Errors raised by the engine when a caller breaks a contract.
///
/// Ignored input (unknown key codes, reversing directions) is not an error;
/// see [`crate::input::Admission`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Board dimensions must both be positive.
    #[display("Invalid board dimensions {width}x{height}")]
    InvalidBoard { width: usize, height: usize },

    /// The initial snake does not fit on the board.
    #[display("Invalid snake configuration {config:?} on {width}x{height} board: {reason}")]
    InvalidConfiguration {
        config: SnakeConfig,
        width: usize,
        height: usize,
        reason: &'static str,
    },

    /// A `move` action carried something other than a cardinal direction.
    #[display("Unknown direction {direction:?} in {action:?} action")]
    UnknownDirection { action: String, direction: String },

    /// An action kind outside `start`, `move` and `reset`.
    #[display("Unknown action {action:?}")]
    UnknownAction { action: String },
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, GameError>;
