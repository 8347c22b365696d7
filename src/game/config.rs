use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::state::{CellIds, Snake};
use crate::error::GameError;

/// Placement of the snake at the start of a session.
///
/// The snake lies horizontally with its tail at `(x, y)` and its head
/// `length - 1` cells to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub x: i32,
    pub y: i32,
    pub length: usize,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            length: 5,
        }
    }
}

impl SnakeConfig {
    pub fn new(x: i32, y: i32, length: usize) -> Self {
        Self { x, y, length }
    }
}

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub board_width: usize,
    /// Height of the game grid
    pub board_height: usize,
    /// Milliseconds between scheduler ticks
    pub tick_interval_ms: u64,
    /// Default snake placement used when `start` is called without one
    pub snake: SnakeConfig,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 20,
            board_height: 20,
            tick_interval_ms: 100,
            snake: SnakeConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_snake(mut self, snake: SnakeConfig) -> Self {
        self.snake = snake;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Board described by this configuration.
    pub fn board(&self) -> Result<Board, GameError> {
        Board::new(self.board_width, self.board_height)
    }

    /// Checks board dimensions, tick period and the default snake placement.
    pub fn validate(&self) -> Result<(), GameError> {
        let board = self.board()?;
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfiguration {
                config: self.snake,
                width: self.board_width,
                height: self.board_height,
                reason: "tick interval must be positive",
            });
        }
        Snake::create_horizontal(&board, self.snake, &mut CellIds::default()).map(|_| ())
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text).context("Failed to parse game config")?;
        config.validate().context("Game config is invalid")?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config from {:?}", path))?;
        Self::from_toml_str(&text).with_context(|| format!("Failed to load {:?}", path))
    }
}
