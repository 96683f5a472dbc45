use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{Position, Snake};

/// Rejected samples tolerated before falling back to scanning for free
/// cells. The grid stays far from full in normal play, so the cap only
/// matters on pathologically crowded boards.
const MAX_SAMPLE_ATTEMPTS: u32 = 1_000;

/// Chooses food cells, biased towards the side columns of the play field
///
/// Candidates are drawn from the inset rectangle one `edge_inset` in from
/// every wall, so food never sits flush against the perimeter. With
/// probability `border_bias` a candidate comes from the leftmost or
/// rightmost inset column ("border mode"), otherwise it is uniform over the
/// whole inset rectangle.
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    grid_cols: i32,
    grid_rows: i32,
    border_bias: f64,
    edge_inset: i32,
}

impl FoodPlacer {
    pub fn new(grid_cols: i32, grid_rows: i32, border_bias: f64, edge_inset: i32) -> Self {
        Self {
            grid_cols,
            grid_rows,
            border_bias,
            edge_inset,
        }
    }

    /// Pick a food cell not occupied by `snake`
    ///
    /// Rejection-samples from the biased candidate distribution; past
    /// `MAX_SAMPLE_ATTEMPTS` it picks uniformly among the remaining free
    /// inset cells instead. `None` only when no inset cell is free.
    pub fn place<R: Rng>(&self, rng: &mut R, snake: &Snake) -> Option<Position> {
        // The inset rectangle is empty on degenerate grids
        if self.grid_cols <= 2 * self.edge_inset || self.grid_rows <= 2 * self.edge_inset {
            return None;
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let candidate = self.sample_candidate(rng);
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
        self.scan_free_cell(rng, snake)
    }

    fn sample_candidate<R: Rng>(&self, rng: &mut R) -> Position {
        let inset = self.edge_inset;
        let y = rng.gen_range(inset..self.grid_rows - inset);
        if rng.gen_bool(self.border_bias) {
            // Border mode: one of the two inset side columns
            let x = if rng.gen_bool(0.5) {
                inset
            } else {
                self.grid_cols - inset - 1
            };
            Position::new(x, y)
        } else {
            let x = rng.gen_range(inset..self.grid_cols - inset);
            Position::new(x, y)
        }
    }

    fn scan_free_cell<R: Rng>(&self, rng: &mut R, snake: &Snake) -> Option<Position> {
        let inset = self.edge_inset;
        let mut free = Vec::new();
        for y in inset..self.grid_rows - inset {
            for x in inset..self.grid_cols - inset {
                let pos = Position::new(x, y);
                if !snake.occupies(pos) {
                    free.push(pos);
                }
            }
        }
        free.choose(rng).copied()
    }
}
