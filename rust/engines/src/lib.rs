//! Reversi Opponent
//!
//! This crate contains the computer player for the `reversi` rules engine and
//! the match loop that pits it against a human:
//! - `lookahead`: scores each legal move by an expected-value tree, 3 to 5 plies deep
//! - `tree`: the tree itself, fanned out over the rayon pool
//! - `heuristic`: capture count plus corner/edge bonus, signed by the mover
//! - `session`: turn-by-turn match with automatic passing and input retry
//!
//! This is not a minimax engine: there is no pruning, no transposition table
//! and no claim of optimal play.

pub mod config;
pub mod error;
pub mod heuristic;
pub mod lookahead;
pub mod session;
pub mod tree;

pub use config::{LookaheadConfig, DEFAULT_DEPTH, MAX_DEPTH, MIN_DEPTH};
pub use error::{EngineError, Result};
pub use lookahead::{choose_computer_move, LookaheadEvaluator, MoveScore};
pub use session::{MoveInput, Session, TurnOutcome};
