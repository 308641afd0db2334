//! Human-versus-computer match, one turn at a time.
//!
//! The session owns the board and the evaluator. A side without a legal move
//! passes automatically; the match ends after two passes in a row or when the
//! board is full. The human's coordinates come from a [`MoveInput`], which is
//! asked again whenever a coordinate is rejected.

use reversi::{Board, Coord, GameError, Player, Tally};
use tracing::{info, warn};

use crate::lookahead::LookaheadEvaluator;
use crate::Result;

/// Source of the human player's moves
pub trait MoveInput {
    /// Next `(row, col)` typed by the player, or `None` once input has ended
    fn read_move(&mut self, board: &Board) -> Option<(i64, i64)>;

    /// The last coordinate was rejected; another one will be requested
    fn reject(&mut self, _error: &GameError) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Played {
        player: Player,
        coord: Coord,
        captured: usize,
    },
    /// The side to move had no legal move; only the turn changed hands
    Passed(Player),
    GameOver,
    /// The human's input ended before a move was made
    Quit,
}

pub struct Session {
    board: Board,
    evaluator: LookaheadEvaluator,
    computer: Player,
    consecutive_passes: u8,
}

impl Session {
    /// New match where the computer plays White
    pub fn new(board: Board, evaluator: LookaheadEvaluator) -> Self {
        Self {
            board,
            evaluator,
            computer: Player::White,
            consecutive_passes: 0,
        }
    }

    pub fn with_computer(self, computer: Player) -> Self {
        Self { computer, ..self }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn computer(&self) -> Player {
        self.computer
    }

    pub fn human(&self) -> Player {
        self.computer.opponent()
    }

    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 2 || self.board.is_full()
    }

    /// Play a single turn for whichever side is to move
    pub fn play_turn(&mut self, input: &mut impl MoveInput) -> Result<TurnOutcome> {
        if self.is_over() {
            return Ok(TurnOutcome::GameOver);
        }

        let player = self.board.side_to_move();
        if self.board.legal_moves().is_empty() {
            return Ok(self.pass(player));
        }

        let coord = if player == self.computer {
            match self.evaluator.choose_move(&self.board)? {
                Some(coord) => coord,
                None => return Ok(self.pass(player)),
            }
        } else {
            match self.read_human_move(input) {
                Some(coord) => coord,
                None => return Ok(TurnOutcome::Quit),
            }
        };

        let captured = self.board.advance_turn(Some(coord))?;
        self.consecutive_passes = 0;
        info!(%player, %coord, captured, "move played");

        Ok(TurnOutcome::Played {
            player,
            coord,
            captured,
        })
    }

    /// Play until the match ends or the human quits, reporting every turn to
    /// `observer`. Returns the tally of the final position.
    pub fn run(
        &mut self,
        input: &mut impl MoveInput,
        mut observer: impl FnMut(&Board, &TurnOutcome),
    ) -> Result<Tally> {
        loop {
            let outcome = self.play_turn(input)?;
            observer(&self.board, &outcome);
            if matches!(outcome, TurnOutcome::GameOver | TurnOutcome::Quit) {
                break;
            }
        }

        let tally = self.board.tally();
        info!(black = tally.black, white = tally.white, winner = ?tally.winner, "match finished");
        Ok(tally)
    }

    fn pass(&mut self, player: Player) -> TurnOutcome {
        info!(%player, "no legal move, passing");
        self.board.pass_turn();
        self.consecutive_passes += 1;
        TurnOutcome::Passed(player)
    }

    fn read_human_move(&self, input: &mut impl MoveInput) -> Option<Coord> {
        loop {
            let (row, col) = input.read_move(&self.board)?;
            let checked = self
                .board
                .coord(row, col)
                .and_then(|coord| self.board.validate_move(coord).map(|_| coord));

            match checked {
                Ok(coord) => return Some(coord),
                Err(error) => {
                    warn!(%error, "rejected move");
                    input.reject(&error);
                }
            }
        }
    }
}
