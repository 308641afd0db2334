//! Lookahead opponent.
//!
//! Every legal move of the side to move is scored by expanding an
//! expected-value tree below the position it leads to (see [`crate::tree`]).
//! The highest value wins; ties are broken uniformly at random.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use reversi::{Board, Coord};
use tracing::{debug, trace};

use crate::config::LookaheadConfig;
use crate::heuristic::move_reward;
use crate::tree::EvalNode;
use crate::Result;

/// Value of one candidate move at the root
#[derive(Debug, Clone, PartialEq)]
pub struct MoveScore {
    pub coord: Coord,
    pub captures: Vec<Coord>,
    pub value: f64,
}

#[derive(Debug)]
pub struct LookaheadEvaluator {
    config: LookaheadConfig,
    rng: StdRng,
}

impl LookaheadEvaluator {
    /// Create an evaluator; fails on a depth outside the supported range
    pub fn new(config: LookaheadConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Evaluator whose tie-breaking is reproducible
    pub fn with_seed(config: LookaheadConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: LookaheadConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &LookaheadConfig {
        &self.config
    }

    /// Score every legal move of the side to move, in row-major order.
    /// Empty when the side to move has to pass.
    pub fn score_moves(&self, board: &Board) -> Result<Vec<MoveScore>> {
        let candidates: Vec<(Coord, Vec<Coord>)> = board.legal_moves().into_iter().collect();
        let LookaheadConfig { depth, parallel } = self.config;
        let mover = board.side_to_move();

        let score = |(coord, captures): (Coord, Vec<Coord>)| -> Result<MoveScore> {
            let reward = move_reward(board.size(), coord, captures.len(), mover);
            let next = board.after_move(coord, &captures)?;
            let node = EvalNode::expand(next, 1.0, reward, depth, parallel)?;
            trace!(%coord, nodes = node.node_count(), "expanded candidate");

            Ok(MoveScore {
                coord,
                captures,
                value: node.value(),
            })
        };

        let scores: Vec<MoveScore> = if parallel {
            candidates.into_par_iter().map(score).collect::<Result<_>>()?
        } else {
            candidates.into_iter().map(score).collect::<Result<_>>()?
        };

        for scored in &scores {
            debug!(coord = %scored.coord, value = scored.value, "scored move");
        }

        Ok(scores)
    }

    /// Pick the move for the side to move, or `None` when it must pass
    pub fn choose_move(&mut self, board: &Board) -> Result<Option<Coord>> {
        let scores = self.score_moves(board)?;
        let best_value = scores
            .iter()
            .map(|scored| scored.value)
            .fold(f64::NEG_INFINITY, f64::max);

        let best: Vec<Coord> = scores
            .iter()
            .filter(|scored| scored.value == best_value)
            .map(|scored| scored.coord)
            .collect();

        let choice = best.choose(&mut self.rng).copied();
        if let Some(coord) = choice {
            debug!(
                player = ?board.side_to_move(),
                %coord,
                value = best_value,
                tied = best.len(),
                "chose move"
            );
        }

        Ok(choice)
    }
}

/// One-shot helper: choose a move for the side to move with a fresh evaluator
pub fn choose_computer_move(board: &Board, depth: u8) -> Result<Option<Coord>> {
    LookaheadEvaluator::new(LookaheadConfig::new(depth)?)?.choose_move(board)
}
