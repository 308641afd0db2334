//! Reward earned by a single move.
//!
//! The reward is the capture count plus a positional bonus, signed by the
//! side that made the move (Black negative, White positive). Rewards are never
//! re-expressed relative to the side that started the search, so they
//! alternate in sign from ply to ply.

use reversi::{Coord, Player};

pub const CORNER_BONUS: f64 = 1000.0;
pub const EDGE_BONUS: f64 = 100.0;

/// Positional bonus for landing on `coord`: corners first, then any edge cell
pub fn position_bonus(size: usize, coord: Coord) -> f64 {
    let last = size - 1;
    let row_edge = coord.row == 0 || coord.row == last;
    let col_edge = coord.col == 0 || coord.col == last;

    match (row_edge, col_edge) {
        (true, true) => CORNER_BONUS,
        (true, false) | (false, true) => EDGE_BONUS,
        (false, false) => 0.0,
    }
}

/// Reward for `mover` playing `coord` and capturing `captured` pieces
pub fn move_reward(size: usize, coord: Coord, captured: usize, mover: Player) -> f64 {
    (captured as f64 + position_bonus(size, coord)) * f64::from(mover.sign())
}
