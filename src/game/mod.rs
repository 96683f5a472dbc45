//! Core game logic
//!
//! Everything that decides what happens on the play field lives here, free
//! of any I/O or rendering dependency: movement, feeding, collision rules
//! and food placement.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{check_collision, is_game_over, GameEngine, StepOutcome};
pub use food::FoodPlacer;
pub use state::{GameOver, GameState, Position, Snake};
