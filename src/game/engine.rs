use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use super::{
    action::{Action, Direction, RawAction},
    board::Board,
    config::{GameConfig, SnakeConfig},
    food,
    rules::{self, CollisionType},
    state::{Cell, CellIds, GameState, GameStatus, Snake},
};
use crate::error::Result;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// The game state machine.
///
/// Transitions never touch the input state; each accepted action yields a
/// fresh [`GameState`]. The engine only owns the board, the random source
/// for food placement and the cell id counter.
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    default_snake: SnakeConfig,
    rng: StdRng,
    ids: CellIds,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            board: config.board()?,
            default_snake: config.snake,
            rng,
            ids: CellIds::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Build the opening state of a session.
    #[instrument(skip(self))]
    pub fn start(&mut self, snake: Option<SnakeConfig>) -> Result<GameState> {
        let config = snake.unwrap_or(self.default_snake);
        let snake = Snake::create_horizontal(&self.board, config, &mut self.ids)?;
        let food = food::place(&mut self.rng, &snake, &self.board);

        info!(
            width = self.board.width(),
            height = self.board.height(),
            length = snake.len(),
            ?food,
            "Game started"
        );
        Ok(GameState::new(snake, food, GameStatus::Running))
    }

    /// Advance the state machine by one action.
    pub fn apply(&mut self, state: &GameState, action: Action) -> Result<GameState> {
        match action {
            Action::Start(snake) | Action::Reset(snake) => self.start(snake),
            Action::Move(direction) => Ok(self.step(state, direction).0),
        }
    }

    /// Decode an untyped action and apply it.
    pub fn apply_raw(&mut self, state: &GameState, raw: RawAction) -> Result<GameState> {
        let action = Action::try_from(raw)?;
        self.apply(state, action)
    }

    /// Execute one move of the game
    pub fn step(&mut self, state: &GameState, direction: Direction) -> (GameState, StepInfo) {
        if !state.is_running() {
            return (state.clone(), StepInfo::default());
        }
        let Some(head) = state.snake.head() else {
            return (state.clone(), StepInfo::default());
        };

        let new_head = head.position().moved_in_direction(direction);

        if let Some(collision_type) = rules::check_move(new_head, &state.snake, &self.board) {
            info!(?direction, ?new_head, ?collision_type, "Game lost");
            let lost = GameState::new(state.snake.clone(), state.food, GameStatus::Lost);
            return (
                lost,
                StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            );
        }

        if state.food == Some(new_head) {
            let snake = state.snake.grown(Cell::new(new_head, self.ids.fresh()));
            let won = snake.len() == self.board.area();
            let (food, status) = if won {
                (None, GameStatus::Won)
            } else {
                (
                    food::place(&mut self.rng, &snake, &self.board),
                    GameStatus::Running,
                )
            };

            debug!(length = snake.len(), ?food, "Food eaten");
            if won {
                info!(length = snake.len(), "Game won");
            }
            return (
                GameState::new(snake, food, status),
                StepInfo {
                    ate_food: true,
                    collision_type: None,
                },
            );
        }

        let snake = state.snake.shifted(new_head);
        (
            GameState::new(snake, state.food, GameStatus::Running),
            StepInfo::default(),
        )
    }
}
