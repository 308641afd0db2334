//! Error types for the lookahead engine and match session

use reversi::GameError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("lookahead depth {depth} is outside the supported range {min}..={max}")]
    InvalidDepthConfig { depth: u8, min: u8, max: u8 },

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Convenience type alias for Results using the engine's error type
pub type Result<T> = std::result::Result<T, EngineError>;
