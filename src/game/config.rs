use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// The play field is addressed in cells, but sized in pixels the way the
/// render surface is: grid dimensions are derived from the canvas size and
/// the cell size rather than stored directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Side length of one square cell in pixels
    pub cell_size: u32,
    /// Snake length at round start
    pub initial_snake_length: usize,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Probability that a food candidate is drawn near a side column
    pub border_bias: f64,
    /// Margin in cells kept clear around the perimeter for food placement
    pub edge_inset: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 400,
            cell_size: 10,
            initial_snake_length: 2,
            tick_interval_ms: 40,
            border_bias: 0.7,
            edge_inset: 1,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a custom canvas
    pub fn new(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            cell_size,
            ..Default::default()
        }
    }

    /// Number of cell columns on the play field
    pub fn grid_cols(&self) -> i32 {
        (self.canvas_width / self.cell_size) as i32
    }

    /// Number of cell rows on the play field
    pub fn grid_rows(&self) -> i32 {
        (self.canvas_height / self.cell_size) as i32
    }

    /// A small grid for tests
    pub fn small() -> Self {
        Self::new(100, 100, 10)
    }
}
