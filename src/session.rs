//! The tick-driven round state machine
//!
//! [`GameSession`] owns the game state, the leaderboard and the round
//! stats, and advances them one `tick()` at a time. It has no notion of
//! wall-clock time: the human mode drives it from a timer, tests drive it
//! by hand.

use log::{error, info};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::input::apply_steer;
use crate::leaderboard::Leaderboard;
use crate::metrics::RoundStats;

/// Where the round loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No round in progress (before the first start, or after game over)
    Stopped,
    /// Ticks move the snake
    Running,
    /// Round frozen; ticks do nothing until resumed
    Paused,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing moved
    Idle,
    /// The snake moved one cell
    Advanced { ate_food: bool },
    /// This tick ended the round; the score has been recorded
    GameOver { score: u32 },
}

/// One player's game session: rounds, steering, scores
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    run_state: RunState,
    pending_steer: Option<Direction>,
    leaderboard: Leaderboard,
    stats: RoundStats,
    player_name: String,
}

impl GameSession {
    pub fn new(config: GameConfig, leaderboard: Leaderboard, player_name: String) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            run_state: RunState::Stopped,
            pending_steer: None,
            leaderboard,
            stats: RoundStats::new(),
            player_name,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn stats(&self) -> &RoundStats {
        &self.stats
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Begin a fresh round from any state
    ///
    /// Starting while a round is running simply abandons it; there is only
    /// one tick source, so no stale round can keep moving.
    pub fn start(&mut self) {
        self.state = self.engine.reset();
        self.pending_steer = None;
        self.run_state = RunState::Running;
        self.stats.on_round_start();
        info!("round started for {:?}", self.player_name);
    }

    /// Freeze a running round
    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
        }
    }

    /// Continue a paused round
    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
        }
    }

    /// Request a turn; takes effect on the next tick
    ///
    /// Requests are filtered against the latest accepted direction, and
    /// only the last accepted request before the tick fires is committed.
    pub fn steer(&mut self, requested: Direction) {
        let current = self.pending_steer.unwrap_or(self.state.snake.direction);
        self.pending_steer = Some(apply_steer(current, requested));
    }

    /// Advance the round by one tick, if it is running
    ///
    /// Within a tick, movement strictly precedes the collision check, which
    /// strictly precedes leaderboard recording. A failed leaderboard write
    /// is logged and swallowed.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::Idle;
        }

        self.stats.update();

        let action = match self.pending_steer.take() {
            Some(direction) => Action::Steer(direction),
            None => Action::Continue,
        };
        let outcome = self.engine.step(&mut self.state, action);

        if let Some(cause) = outcome.game_over {
            let score = self.state.score;
            self.run_state = RunState::Stopped;
            info!("round over ({:?}), score {}", cause, score);

            if let Err(err) = self.leaderboard.record(&self.player_name, score) {
                error!("failed to persist leaderboard: {:#}", err);
            }
            self.stats.on_round_over(score);

            return TickOutcome::GameOver { score };
        }

        TickOutcome::Advanced {
            ate_food: outcome.ate_food,
        }
    }
}
