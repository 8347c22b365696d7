//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or
//! rendering dependencies.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod food;
pub mod rules;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, RawAction};
pub use board::Board;
pub use config::{GameConfig, SnakeConfig};
pub use engine::{GameEngine, StepInfo};
pub use rules::CollisionType;
pub use state::{Cell, CellId, CellIds, GameState, GameStatus, Position, Snake};
