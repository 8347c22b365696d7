//! Session lifecycle: the tick scheduler that drains the input queue into the
//! game state machine at a fixed cadence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::game::{Direction, GameConfig, GameEngine, GameState, GameStatus, SnakeConfig};
use crate::input::{Admission, DirectionQueue};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No direction pending
    Idle,
    /// A move was applied
    Moved {
        direction: Direction,
        status: GameStatus,
    },
    /// The session was cancelled or the game is not running
    Halted,
}

struct Core {
    engine: GameEngine,
    state: GameState,
    queue: DirectionQueue,
    /// Bumped on every stop; a ticker only acts for its own generation.
    generation: u64,
}

struct Shared {
    core: Mutex<Core>,
    states: watch::Sender<GameState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self, generation: u64) -> TickOutcome {
        let mut guard = self.lock();
        let core = &mut *guard;
        if core.generation != generation || !core.state.is_running() {
            return TickOutcome::Halted;
        }

        let Some(direction) = core.queue.next_for_tick() else {
            return TickOutcome::Idle;
        };

        let (state, _) = core.engine.step(&core.state, direction);
        let status = state.status;
        debug!(?direction, ?status, length = state.snake.len(), "Tick");

        if status.is_terminal() {
            core.queue.close();
            info!(?status, length = state.snake.len(), "Session finished");
        }
        core.state = state.clone();
        self.states.send_replace(state);

        TickOutcome::Moved { direction, status }
    }
}

/// One play-through from `start` to a terminal status or the next `start`.
///
/// Owns the game state, the input queue and at most one ticker task. The
/// queue and the state sit behind a single lock, so key presses and ticks
/// never interleave mid-operation.
pub struct Session {
    shared: Arc<Shared>,
    tick_interval: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl Session {
    /// Create an idle session; nothing ticks until [`Session::start`].
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let engine = GameEngine::new(&config)?;

        let mut queue = DirectionQueue::new();
        queue.close();

        let (states, _) = watch::channel(GameState::not_started());
        let core = Core {
            engine,
            state: GameState::not_started(),
            queue,
            generation: 0,
        };

        Ok(Self {
            shared: Arc::new(Shared {
                core: Mutex::new(core),
                states,
            }),
            tick_interval: config.tick_interval(),
            ticker: None,
        })
    }

    /// Begin a new session, cancelling any previous ticker first.
    ///
    /// On error the session is left stopped and the previous state is kept.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&mut self, snake: Option<SnakeConfig>) -> Result<GameState> {
        self.stop();

        let (state, generation) = {
            let mut core = self.shared.lock();
            let state = core.engine.start(snake)?;
            core.queue.reopen();
            core.state = state.clone();
            self.shared.states.send_replace(state.clone());
            (state, core.generation)
        };

        let shared = Arc::clone(&self.shared);
        let period = self.tick_interval;
        let first_tick = Instant::now() + period;
        self.ticker = Some(tokio::spawn(async move {
            run_ticker(shared, generation, first_tick, period).await;
        }));

        info!(period_ms = period.as_millis() as u64, "Session started");
        Ok(state)
    }

    /// Same as [`Session::start`].
    pub fn reset(&mut self, snake: Option<SnakeConfig>) -> Result<GameState> {
        self.start(snake)
    }

    /// Cancel the ticker and close the queue. Safe to call repeatedly; no
    /// tick runs after this returns.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        {
            let mut core = self.shared.lock();
            core.generation += 1;
            core.queue.close();
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            info!("Session stopped");
        }
    }

    /// Feed a raw key code from the keyboard collaborator.
    pub fn press_key(&self, code: u32) -> Admission {
        self.shared.lock().queue.press_key(code)
    }

    pub fn push_direction(&self, direction: Direction) -> Admission {
        self.shared.lock().queue.push(direction)
    }

    /// Run one tick immediately, outside the timer.
    pub fn tick_now(&self) -> TickOutcome {
        let generation = self.shared.lock().generation;
        self.shared.tick(generation)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> GameState {
        self.shared.lock().state.clone()
    }

    /// Receiver that sees every committed state.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.shared.states.subscribe()
    }

    /// True while a ticker task is alive
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticker(shared: Arc<Shared>, generation: u64, first_tick: Instant, period: Duration) {
    let mut timer = interval_at(first_tick, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        timer.tick().await;
        match shared.tick(generation) {
            TickOutcome::Idle => {}
            TickOutcome::Moved { status, .. } if !status.is_terminal() => {}
            TickOutcome::Moved { .. } | TickOutcome::Halted => break,
        }
    }
}
