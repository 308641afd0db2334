//! Expected-value move tree.
//!
//! Each node is a hypothetical position reached by one move from its parent.
//! Siblings share the probability mass uniformly and the value of a node is
//! its own reward plus the probability-weighted value of its children:
//!
//! `V = r + Σ child.V * child.p`
//!
//! Deeper generations are folded in by the recursion alone.

use std::collections::BTreeMap;

use rayon::prelude::*;
use reversi::{Board, Coord, Result};

use crate::heuristic::move_reward;

#[derive(Debug, Clone)]
pub struct EvalNode {
    pub board: Board,
    /// Probability of reaching this node from its parent
    pub probability: f64,
    /// Reward of the move that led here
    pub reward: f64,
    pub children: BTreeMap<Coord, EvalNode>,
}

impl EvalNode {
    pub fn leaf(board: Board, probability: f64, reward: f64) -> Self {
        Self {
            board,
            probability,
            reward,
            children: BTreeMap::new(),
        }
    }

    /// Build the subtree below `board`, `depth` plies deep.
    ///
    /// A node stays a leaf when the depth budget is spent or its side to move
    /// has no legal move. With `parallel` set, every node fans its children
    /// out on the rayon pool; each child works on its own copy of the board
    /// and the node is assembled only once all of them are built.
    pub fn expand(
        board: Board,
        probability: f64,
        reward: f64,
        depth: u8,
        parallel: bool,
    ) -> Result<Self> {
        let children = if depth == 0 {
            BTreeMap::new()
        } else {
            expand_children(&board, depth - 1, parallel)?
        };

        Ok(Self {
            board,
            probability,
            reward,
            children,
        })
    }

    /// Aggregate value of this node
    pub fn value(&self) -> f64 {
        self.reward
            + self
                .children
                .values()
                .map(|child| child.value() * child.probability)
                .sum::<f64>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(EvalNode::node_count).sum::<usize>()
    }
}

fn expand_children(board: &Board, depth: u8, parallel: bool) -> Result<BTreeMap<Coord, EvalNode>> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Ok(BTreeMap::new());
    }

    let probability = 1.0 / moves.len() as f64;
    let mover = board.side_to_move();
    let size = board.size();

    let child = |(coord, captures): (Coord, Vec<Coord>)| -> Result<(Coord, EvalNode)> {
        let reward = move_reward(size, coord, captures.len(), mover);
        let next = board.after_move(coord, &captures)?;
        let node = EvalNode::expand(next, probability, reward, depth, parallel)?;
        Ok((coord, node))
    };

    if parallel {
        moves.into_par_iter().map(child).collect()
    } else {
        moves.into_iter().map(child).collect()
    }
}
