//! Snake Engine - rules engine for a grid-based snake game
//!
//! This library provides:
//! - Core game logic (game module): board, snake, food, move legality and
//!   the state machine that advances one move at a time
//! - Input buffering (input module): key codes to queued directions
//! - Session scheduling (session module): a fixed-cadence ticker driving the
//!   state machine from the input queue
//!
//! Rendering and key-event plumbing belong to the host.

pub mod error;
pub mod game;
pub mod input;
pub mod session;

pub use error::GameError;
pub use game::{Action, Direction, GameConfig, GameEngine, GameState, GameStatus, SnakeConfig};
pub use input::{Admission, DirectionQueue};
pub use session::{Session, TickOutcome};
