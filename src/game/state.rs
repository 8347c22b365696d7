use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::board::Board;
use super::config::SnakeConfig;
use crate::error::GameError;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Opaque identity token giving renderers a stable key for a cell.
///
/// Never compared by game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u64);

impl CellId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues fresh, never repeating [`CellId`]s.
#[derive(Debug, Clone, Default)]
pub struct CellIds {
    next: u64,
}

impl CellIds {
    pub fn fresh(&mut self) -> CellId {
        let id = CellId(self.next);
        self.next += 1;
        id
    }
}

/// One segment of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub id: CellId,
}

impl Cell {
    pub fn new(position: Position, id: CellId) -> Self {
        Self {
            x: position.x,
            y: position.y,
            id,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Same identity, different coordinates
    fn relocated(&self, position: Position) -> Self {
        Self::new(position, self.id)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snake {
    /// Segments, with head at index 0
    cells: Vec<Cell>,
}

impl Snake {
    /// Lay a snake out horizontally with its tail at `(x, y)` and its head
    /// at `(x + length - 1, y)`.
    pub fn create_horizontal(
        board: &Board,
        config: SnakeConfig,
        ids: &mut CellIds,
    ) -> Result<Self, GameError> {
        let SnakeConfig { x, y, length } = config;
        let reject = |reason| GameError::InvalidConfiguration {
            config,
            width: board.width(),
            height: board.height(),
            reason,
        };

        if length < 1 {
            return Err(reject("length must be at least 1"));
        }
        if x < 0 {
            return Err(reject("x must not be negative"));
        }
        if y < 0 || y as usize >= board.height() {
            return Err(reject("y is outside the board"));
        }
        if (x as usize)
            .checked_add(length)
            .is_none_or(|end| end > board.width())
        {
            return Err(reject("snake extends past the right edge"));
        }

        let cells = (0..length as i32)
            .rev()
            .map(|offset| Cell::new(Position::new(x + offset, y), ids.fresh()))
            .collect();

        Ok(Self { cells })
    }

    /// Build a snake from head-first positions, issuing fresh ids.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Position>,
        ids: &mut CellIds,
    ) -> Self {
        Self {
            cells: positions
                .into_iter()
                .map(|position| Cell::new(position, ids.fresh()))
                .collect(),
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Option<&Cell> {
        self.cells.first()
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Option<&Cell> {
        self.cells.last()
    }

    /// All segments, head first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        self.cells.get(1..).unwrap_or_default()
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().iter().any(|cell| cell.position() == pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.cells.iter().any(|cell| cell.position() == pos)
    }

    /// New snake one segment longer: `head` in front, every old segment kept.
    pub fn grown(&self, head: Cell) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len() + 1);
        cells.push(head);
        cells.extend_from_slice(&self.cells);
        Self { cells }
    }

    /// New snake of the same length with the head at `head`. Segment `i`
    /// takes the coordinates of segment `i - 1` and keeps its own id; the old
    /// tail coordinates are dropped.
    pub fn shifted(&self, head: Position) -> Self {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match i {
                0 => cell.relocated(head),
                _ => cell.relocated(self.cells[i - 1].position()),
            })
            .collect();
        Self { cells }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Empty only before the first start
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

impl GameStatus {
    /// `Won` and `Lost` end the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Snapshot handed to the renderer. Every transition produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, status: GameStatus) -> Self {
        Self {
            snake,
            food,
            status,
        }
    }

    /// State before any session has started: no snake, no food.
    pub fn not_started() -> Self {
        Self::default()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
