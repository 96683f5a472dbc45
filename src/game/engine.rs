use rand::rngs::ThreadRng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::FoodPlacer,
    state::{GameOver, GameState, Position, Snake},
};

/// What one tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// The snake ate food this tick (and grew by one cell)
    pub ate_food: bool,
    /// Set when this tick ended the round
    pub game_over: Option<GameOver>,
}

/// Collision check, evaluated once per tick after the snake has moved
pub fn check_collision(state: &GameState) -> Option<GameOver> {
    let head = state.snake.head();
    if !state.is_in_bounds(head) {
        return Some(GameOver::Wall);
    }
    if state.snake.bites_itself_at(head) {
        return Some(GameOver::SelfCollision);
    }
    None
}

/// True iff the head is out of bounds or on a non-head body cell
pub fn is_game_over(state: &GameState) -> bool {
    check_collision(state).is_some()
}

/// Applies movement, feeding and collision rules to a [`GameState`]
pub struct GameEngine {
    config: GameConfig,
    placer: FoodPlacer,
    rng: ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        let placer = FoodPlacer::new(
            config.grid_cols(),
            config.grid_rows(),
            config.border_bias,
            config.edge_inset,
        );
        Self {
            config,
            placer,
            rng: rand::thread_rng(),
        }
    }

    /// Fresh round: a two-cell snake centred on the grid heading right,
    /// score zero, food freshly placed
    pub fn reset(&mut self) -> GameState {
        let cols = self.config.grid_cols();
        let rows = self.config.grid_rows();
        let center = Position::new(cols / 2, rows / 2);
        let snake = Snake::new(center, Direction::Right, self.config.initial_snake_length);

        match self.placer.place(&mut self.rng, &snake) {
            Some(food) => GameState::new(snake, food, cols, rows),
            None => {
                // A grid whose inset rectangle cannot hold a single food
                // cell is unplayable; the round is born finished.
                let mut state = GameState::new(snake, Position::new(-1, -1), cols, rows);
                state.is_alive = false;
                state
            }
        }
    }

    /// Advance the game by one tick
    ///
    /// Commits the steering (reversals rejected), moves the snake one cell,
    /// handles feeding, then checks for collisions. Does nothing once the
    /// round is over.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepOutcome {
        if !state.is_alive {
            return StepOutcome {
                ate_food: false,
                game_over: None,
            };
        }

        if let Action::Steer(requested) = action {
            if !state.snake.direction.is_opposite(requested) {
                state.snake.direction = requested;
            }
        }

        let new_head = state.snake.head().step(state.snake.direction);
        let ate_food = new_head == state.food;
        state.snake.advance(ate_food);

        if let Some(cause) = check_collision(state) {
            state.is_alive = false;
            return StepOutcome {
                ate_food: false,
                game_over: Some(cause),
            };
        }

        if ate_food {
            state.score += 1;
            match self.placer.place(&mut self.rng, &state.snake) {
                Some(food) => state.food = food,
                None => {
                    // Nowhere left to put food; the board is beaten.
                    state.is_alive = false;
                    return StepOutcome {
                        ate_food: true,
                        game_over: Some(GameOver::GridFull),
                    };
                }
            }
        }

        StepOutcome {
            ate_food,
            game_over: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_round() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Position::new(30, 20));
        assert_eq!(state.snake.body[1], Position::new(29, 20));
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_three_ticks_right() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        state.food = Position::new(1, 1); // keep food out of the path

        for _ in 0..3 {
            let outcome = engine.step(&mut state, Action::Continue);
            assert!(!outcome.ate_food);
            assert!(outcome.game_over.is_none());
        }

        assert_eq!(state.snake.head(), Position::new(33, 20));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_eating_grows_and_rescores() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.food = state.snake.head().step(state.snake.direction);
        let length_before = state.snake.len();

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.ate_food);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), length_before + 1);
        assert!(!state.snake.occupies(state.food));

        // Only the eating tick grows the snake
        state.food = Position::new(1, 1);
        engine.step(&mut state, Action::Continue);
        assert_eq!(state.snake.len(), length_before + 1);
    }

    #[test]
    fn test_wall_ends_round() {
        let mut engine = GameEngine::new(GameConfig::small());
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 2);
        let mut state = GameState::new(snake, Position::new(5, 5), 10, 10);

        let outcome = engine.step(&mut state, Action::Continue);

        assert_eq!(outcome.game_over, Some(GameOver::Wall));
        assert!(!state.is_alive);
        assert!(is_game_over(&state));
    }

    #[test]
    fn test_self_collision_ends_round() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Length 5 heading right; a tight right-down-left-up box bites the
        // cell the head started on. (Length 4 would merely chase its own
        // vacating tail, which is legal.)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        engine.step(&mut state, Action::Continue);
        engine.step(&mut state, Action::Steer(Direction::Down));
        engine.step(&mut state, Action::Steer(Direction::Left));
        let outcome = engine.step(&mut state, Action::Steer(Direction::Up));

        assert_eq!(outcome.game_over, Some(GameOver::SelfCollision));
        assert!(!state.is_alive);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.food = Position::new(1, 1);
        assert_eq!(state.snake.direction, Direction::Right);

        engine.step(&mut state, Action::Steer(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_finished_round_stays_put() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.is_alive = false;
        let snapshot = state.clone();

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.game_over.is_none());
        assert!(!outcome.ate_food);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_moving_into_vacated_tail_cell_is_legal() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Length 4 in a 2x2 box: the head re-enters the tail cell exactly
        // as the tail leaves it.
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);
        state.snake.body = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
        ];
        state.snake.direction = Direction::Down;

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.game_over.is_none());
        assert_eq!(state.snake.head(), Position::new(5, 6));
    }
}
