//! Core types and game logic for Reversi (Othello)
//!
//! The [`Board`] owns the grid and the side to move and answers every rules
//! question: legal moves, capture sets, placement, passing and termination.
//! It knows nothing about strategy; see the `reversi-engines` crate for the
//! lookahead opponent.

mod board;
mod error;

pub use board::{Board, LegalMoves, DEFAULT_SIZE};
pub use error::{GameError, Result};

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    /// Plays `X` and always moves first
    Black,
    /// Plays `O`
    White,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(&self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Convert player to cell representation
    pub fn to_cell(&self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Signed encoding of the player: -1 for Black, +1 for White
    pub fn sign(&self) -> i32 {
        match self {
            Player::Black => -1,
            Player::White => 1,
        }
    }

    /// Character used for this player's pieces in text boards
    pub fn symbol(&self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Owner of the piece on this cell, if any
    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }
}

/// Board coordinate. Ordering is row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Final piece counts and the winner, `None` on a draw
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tally {
    pub black: usize,
    pub white: usize,
    pub winner: Option<Player>,
}

impl Tally {
    pub fn new(black: usize, white: usize) -> Self {
        let winner = if black > white {
            Some(Player::Black)
        } else if white > black {
            Some(Player::White)
        } else {
            None
        };
        Self {
            black,
            white,
            winner,
        }
    }

    /// Piece count of the given player
    pub fn count(&self, player: Player) -> usize {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }
}
