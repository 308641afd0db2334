//! Error types for the rules engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinate ({row}, {col}) is outside the {size}x{size} board")]
    InvalidCoordinate { row: i64, col: i64, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("move at ({row}, {col}) captures nothing")]
    IllegalMove { row: usize, col: usize },

    #[error("board size {size} is not supported (must be even and at least 4)")]
    InvalidBoardSize { size: usize },

    #[error("board text has {cells} cells, expected a square board of even side at least 4")]
    InvalidBoardLength { cells: usize },

    #[error("invalid character '{character}' at cell {position}")]
    InvalidCellCharacter { character: char, position: usize },
}

/// Convenience type alias for Results using the rules engine's error type
pub type Result<T> = std::result::Result<T, GameError>;
