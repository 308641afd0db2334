use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};
use tracing::trace;

use crate::{Cell, Coord, GameError, Player, Result, Tally};

/// Side length of the classic board
pub const DEFAULT_SIZE: usize = 8;

/// Legal moves for the side to move, each mapped to the pieces it would capture.
/// Iterates in row-major order.
pub type LegalMoves = BTreeMap<Coord, Vec<Coord>>;

/// Capture walk order: E, S, W, N, SE, NW, SW, NE
const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// A Reversi position: the grid plus the side to move.
///
/// Boards are plain values. Hypothetical futures are explored on clones, never
/// on a board still referenced elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    side_to_move: Player,
    size: usize,
}

impl Board {
    /// Create a new 8x8 board with the initial Othello setup
    /// - (3,3) and (4,4) are White
    /// - (3,4) and (4,3) are Black
    ///
    /// Black moves first.
    pub fn new() -> Self {
        Self::opening(DEFAULT_SIZE)
    }

    /// Create an opening position on a `size` x `size` board.
    /// The size must be even and at least 4.
    pub fn with_size(size: usize) -> Result<Self> {
        if !is_supported_size(size) {
            return Err(GameError::InvalidBoardSize { size });
        }
        Ok(Self::opening(size))
    }

    fn opening(size: usize) -> Self {
        let mut cells = Array2::from_elem((size, size), Cell::Empty);
        let mid = size / 2;

        cells[(mid - 1, mid - 1)] = Cell::White;
        cells[(mid - 1, mid)] = Cell::Black;
        cells[(mid, mid - 1)] = Cell::Black;
        cells[(mid, mid)] = Cell::White;

        Board {
            cells,
            side_to_move: Player::Black,
            size,
        }
    }

    /// Build a position from text rows of `X` (Black), `O` (White) and `.` (empty).
    /// Whitespace is ignored, so rows may be laid out one per line.
    pub fn parse(text: &str, side_to_move: Player) -> Result<Self> {
        let cells = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(position, character)| match character {
                'X' | 'x' => Ok(Cell::Black),
                'O' | 'o' => Ok(Cell::White),
                '.' => Ok(Cell::Empty),
                _ => Err(GameError::InvalidCellCharacter {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        let count = cells.len();
        let size = (count as f64).sqrt().round() as usize;
        if size * size != count || !is_supported_size(size) {
            return Err(GameError::InvalidBoardLength { cells: count });
        }

        let cells = Array2::from_shape_vec((size, size), cells)
            .map_err(|_| GameError::InvalidBoardLength { cells: count })?;

        Ok(Board {
            cells,
            side_to_move,
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Read-only view of the grid, indexed `[(row, col)]`
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    /// Cell at `coord`, or `None` when it is off the board
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.cells.get((coord.row, coord.col)).copied()
    }

    /// Check signed coordinates, as typed by a human, against the board bounds
    pub fn is_within_board(&self, row: i64, col: i64) -> bool {
        let size = self.size as i64;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    /// Convert signed coordinates to a [`Coord`], rejecting anything off the board
    pub fn coord(&self, row: i64, col: i64) -> Result<Coord> {
        if !self.is_within_board(row, col) {
            return Err(GameError::InvalidCoordinate {
                row,
                col,
                size: self.size,
            });
        }
        Ok(Coord::new(row as usize, col as usize))
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if coord.row >= self.size || coord.col >= self.size {
            return Err(GameError::InvalidCoordinate {
                row: coord.row as i64,
                col: coord.col as i64,
                size: self.size,
            });
        }
        Ok(())
    }

    fn at(&self, coord: Coord) -> Cell {
        self.cells[(coord.row, coord.col)]
    }

    /// Next cell from `coord` in `direction`, or `None` past the edge
    fn step(&self, coord: Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        (row < self.size && col < self.size).then_some(Coord::new(row, col))
    }

    /// Pieces `mover` would capture by playing the (in-bounds, empty) cell `coord`.
    /// Each direction contributes its run of opponent pieces, in outward order,
    /// only when the run is closed by one of the mover's own pieces.
    fn collect_captures(&self, coord: Coord, mover: Player) -> Vec<Coord> {
        let own = mover.to_cell();
        let opponent = mover.opponent().to_cell();
        let mut captures = Vec::new();

        for direction in DIRECTIONS {
            let mut run = Vec::new();
            let mut next = self.step(coord, direction);

            while let Some(current) = next {
                if self.at(current) != opponent {
                    break;
                }
                run.push(current);
                next = self.step(current, direction);
            }

            if next.is_some_and(|end| self.at(end) == own) {
                captures.extend(run);
            }
        }

        captures
    }

    /// Pieces the side to move would capture by playing `coord`.
    ///
    /// Fails with `InvalidCoordinate` off the board and `OccupiedCell` on a
    /// non-empty cell. An empty result means the move is not legal.
    pub fn capture_set(&self, coord: Coord) -> Result<Vec<Coord>> {
        self.check_bounds(coord)?;
        if !self.at(coord).is_empty() {
            return Err(GameError::OccupiedCell {
                row: coord.row,
                col: coord.col,
            });
        }
        Ok(self.collect_captures(coord, self.side_to_move))
    }

    /// Check a move for the side to move and return its capture set.
    /// A move is valid if:
    /// 1. The coordinate is on the board
    /// 2. The cell is empty
    /// 3. Placing a piece there would capture at least one opponent piece
    pub fn validate_move(&self, coord: Coord) -> Result<Vec<Coord>> {
        let captures = self.capture_set(coord)?;
        if captures.is_empty() {
            return Err(GameError::IllegalMove {
                row: coord.row,
                col: coord.col,
            });
        }
        Ok(captures)
    }

    /// All legal moves for the side to move
    pub fn legal_moves(&self) -> LegalMoves {
        self.legal_moves_for(self.side_to_move)
    }

    /// Candidates are the empty neighbours of every occupied cell; each one is
    /// examined at most once.
    fn legal_moves_for(&self, mover: Player) -> LegalMoves {
        let mut moves = LegalMoves::new();
        let mut checked = Array2::from_elem((self.size, self.size), false);

        for ((row, col), cell) in self.cells.indexed_iter() {
            if cell.is_empty() {
                continue;
            }

            for direction in DIRECTIONS {
                let Some(candidate) = self.step(Coord::new(row, col), direction) else {
                    continue;
                };
                let seen = &mut checked[(candidate.row, candidate.col)];
                if *seen || !self.at(candidate).is_empty() {
                    continue;
                }
                *seen = true;

                let captures = self.collect_captures(candidate, mover);
                if !captures.is_empty() {
                    moves.insert(candidate, captures);
                }
            }
        }

        moves
    }

    /// Place a piece of `side` on `coord` and convert every cell in `captures`.
    ///
    /// Nothing is written unless `coord` is an empty on-board cell and every
    /// capture is on the board. The capture set is trusted otherwise; pass the
    /// one returned by [`Board::capture_set`] or [`Board::legal_moves`].
    pub fn apply_move(&mut self, coord: Coord, captures: &[Coord], side: Player) -> Result<()> {
        self.check_bounds(coord)?;
        if !self.at(coord).is_empty() {
            return Err(GameError::OccupiedCell {
                row: coord.row,
                col: coord.col,
            });
        }
        for &captured in captures {
            self.check_bounds(captured)?;
        }

        let piece = side.to_cell();
        self.cells[(coord.row, coord.col)] = piece;
        for captured in captures {
            self.cells[(captured.row, captured.col)] = piece;
        }

        Ok(())
    }

    /// Finish the current turn.
    ///
    /// With a placement, validates it for the side to move, places it and
    /// converts its captures, then hands the turn over. Without one the side to
    /// move simply passes. Returns the number of pieces captured.
    ///
    /// Never skips the opponent's turn on its own: the caller decides about
    /// passing by looking at [`Board::legal_moves`] first.
    pub fn advance_turn(&mut self, placement: Option<Coord>) -> Result<usize> {
        let Some(coord) = placement else {
            self.pass_turn();
            return Ok(0);
        };

        let mover = self.side_to_move;
        let captures = self.validate_move(coord)?;
        self.apply_move(coord, &captures, mover)?;
        trace!(player = ?mover, %coord, captured = captures.len(), "placed piece");

        self.side_to_move = mover.opponent();
        Ok(captures.len())
    }

    /// Hand the turn to the opponent without placing anything
    pub fn pass_turn(&mut self) {
        trace!(player = ?self.side_to_move, "turn passed");
        self.side_to_move = self.side_to_move.opponent();
    }

    /// The position reached by playing `coord` with its already computed
    /// `captures`. `self` is left untouched.
    pub fn after_move(&self, coord: Coord, captures: &[Coord]) -> Result<Board> {
        let mut next = self.clone();
        next.apply_move(coord, captures, self.side_to_move)?;
        next.side_to_move = self.side_to_move.opponent();
        Ok(next)
    }

    /// Check if the board is full (no empty cells)
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Check if the game is over
    /// Game is over when:
    /// 1. The board is full (no empty cells), OR
    /// 2. Neither player has a legal move
    pub fn is_terminal(&self) -> bool {
        self.is_full()
            || (self.legal_moves_for(self.side_to_move).is_empty()
                && self.legal_moves_for(self.side_to_move.opponent()).is_empty())
    }

    /// Get piece counts (black_count, white_count)
    pub fn piece_counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    /// Piece counts with the current leader
    pub fn tally(&self) -> Tally {
        let (black, white) = self.piece_counts();
        Tally::new(black, white)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn is_supported_size(size: usize) -> bool {
    size >= 4 && size % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black to move; the column above (5,5) holds four White pieces
    /// closed by a Black piece at (5,5).
    const CAPTURE_FIXTURE: &str = "
        ........
        ...X.OOO
        ..OXOO..
        ...XOO..
        ...XOO..
        ..XXXXX.
        ..OOOOO.
        ...X.OOO";

    /// Colors of `CAPTURE_FIXTURE` inverted, with a White piece at (0,5)
    const INVERTED_FIXTURE: &str = "
        .....O..
        ...O.XXX
        ..XOXX..
        ...OXX..
        ...OXX..
        ..OOOOO.
        ..XXXXX.
        ...O.XXX";

    /// White to move with no legal move, while Black still has (0,2)
    const STRANDED_FIXTURE: &str = "
        XO......
        ........
        ........
        ........
        ........
        ........
        ........
        ........";

    fn coords(list: &[(usize, usize)]) -> Vec<Coord> {
        list.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn test_board_new_initial_setup() {
        let board = Board::new();

        assert_eq!(board.cells[(3, 3)], Cell::White);
        assert_eq!(board.cells[(3, 4)], Cell::Black);
        assert_eq!(board.cells[(4, 3)], Cell::Black);
        assert_eq!(board.cells[(4, 4)], Cell::White);

        for ((i, j), cell) in board.cells.indexed_iter() {
            if ![(3, 3), (3, 4), (4, 3), (4, 4)].contains(&(i, j)) {
                assert_eq!(*cell, Cell::Empty);
            }
        }

        assert_eq!(board.side_to_move(), Player::Black);
        assert_eq!(board.size(), 8);
        assert_eq!(board.piece_counts(), (2, 2));
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_with_size_places_center_diagonals() {
        let board = Board::with_size(6).unwrap();

        assert_eq!(board.cell(Coord::new(2, 2)), Some(Cell::White));
        assert_eq!(board.cell(Coord::new(3, 3)), Some(Cell::White));
        assert_eq!(board.cell(Coord::new(2, 3)), Some(Cell::Black));
        assert_eq!(board.cell(Coord::new(3, 2)), Some(Cell::Black));
        assert_eq!(board.piece_counts(), (2, 2));
        assert_eq!(board.legal_moves().len(), 4);
    }

    #[test]
    fn test_with_size_rejects_unsupported_sizes() {
        for size in [0, 2, 5, 7] {
            assert_eq!(
                Board::with_size(size),
                Err(GameError::InvalidBoardSize { size })
            );
        }
    }

    #[test]
    fn test_is_within_board() {
        let board = Board::new();
        assert!(board.is_within_board(0, 0));
        assert!(board.is_within_board(7, 7));
        assert!(board.is_within_board(0, 7));
        assert!(board.is_within_board(7, 0));
        assert!(!board.is_within_board(-1, 0));
        assert!(!board.is_within_board(0, -1));
        assert!(!board.is_within_board(8, 0));
        assert!(!board.is_within_board(0, 8));
        assert!(!board.is_within_board(-1, -1));
        assert!(!board.is_within_board(8, 8));
    }

    #[test]
    fn test_coord_conversion() {
        let board = Board::new();
        assert_eq!(board.coord(2, 3), Ok(Coord::new(2, 3)));
        assert_eq!(
            board.coord(-1, 3),
            Err(GameError::InvalidCoordinate {
                row: -1,
                col: 3,
                size: 8
            })
        );
    }

    #[test]
    fn test_legal_moves_initial_board() {
        let board = Board::new();
        let moves = board.legal_moves();

        let keys: Vec<Coord> = moves.keys().copied().collect();
        assert_eq!(keys, coords(&[(2, 3), (3, 2), (4, 5), (5, 4)]));

        assert_eq!(moves[&Coord::new(2, 3)], coords(&[(3, 3)]));
        assert_eq!(moves[&Coord::new(3, 2)], coords(&[(3, 3)]));
        assert_eq!(moves[&Coord::new(4, 5)], coords(&[(4, 4)]));
        assert_eq!(moves[&Coord::new(5, 4)], coords(&[(4, 4)]));
    }

    #[test]
    fn test_each_opening_move_flips_exactly_one_piece() {
        let board = Board::new();

        for coord in board.legal_moves().keys() {
            let mut next = board.clone();
            let captured = next.advance_turn(Some(*coord)).unwrap();

            assert_eq!(captured, 1);
            assert_eq!(next.piece_counts(), (4, 1));
            assert_eq!(next.side_to_move(), Player::White);
        }
    }

    #[test]
    fn test_capture_set_initial_board() {
        let board = Board::new();
        assert_eq!(board.capture_set(Coord::new(2, 3)).unwrap(), coords(&[(3, 3)]));
        assert_eq!(board.capture_set(Coord::new(3, 2)).unwrap(), coords(&[(3, 3)]));
        assert!(board.capture_set(Coord::new(7, 7)).unwrap().is_empty());
        assert!(board.capture_set(Coord::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_capture_set_rejects_occupied_and_out_of_bounds() {
        let board = Board::new();
        assert_eq!(
            board.capture_set(Coord::new(3, 3)),
            Err(GameError::OccupiedCell { row: 3, col: 3 })
        );
        assert_eq!(
            board.capture_set(Coord::new(8, 0)),
            Err(GameError::InvalidCoordinate {
                row: 8,
                col: 0,
                size: 8
            })
        );
    }

    #[test]
    fn test_capture_set_four_piece_run_in_outward_order() {
        let board = Board::parse(CAPTURE_FIXTURE, Player::Black).unwrap();
        assert_eq!(
            board.capture_set(Coord::new(0, 5)).unwrap(),
            coords(&[(1, 5), (2, 5), (3, 5), (4, 5)])
        );
    }

    #[test]
    fn test_capture_set_aggregates_directions_in_walk_order() {
        let board = Board::parse(INVERTED_FIXTURE, Player::Black).unwrap();
        assert_eq!(
            board.capture_set(Coord::new(3, 2)).unwrap(),
            coords(&[(3, 3), (4, 3), (5, 4)])
        );
    }

    #[test]
    fn test_legal_moves_agree_with_capture_set() {
        let board = Board::parse(CAPTURE_FIXTURE, Player::Black).unwrap();
        let moves = board.legal_moves();

        assert!(moves.contains_key(&Coord::new(0, 5)));
        for (coord, captures) in &moves {
            assert_eq!(&board.capture_set(*coord).unwrap(), captures);
        }
    }

    #[test]
    fn test_validate_move() {
        let board = Board::new();
        assert_eq!(board.validate_move(Coord::new(2, 3)), Ok(coords(&[(3, 3)])));
        assert_eq!(
            board.validate_move(Coord::new(0, 0)),
            Err(GameError::IllegalMove { row: 0, col: 0 })
        );
        assert_eq!(
            board.validate_move(Coord::new(3, 4)),
            Err(GameError::OccupiedCell { row: 3, col: 4 })
        );
        assert!(matches!(
            board.validate_move(Coord::new(0, 8)),
            Err(GameError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_apply_move_sets_cell_and_captures() {
        let mut board = Board::new();
        board
            .apply_move(Coord::new(2, 3), &coords(&[(3, 3)]), Player::Black)
            .unwrap();

        assert_eq!(board.cells[(2, 3)], Cell::Black);
        assert_eq!(board.cells[(3, 3)], Cell::Black);
        assert_eq!(board.piece_counts(), (4, 1));
        // placement alone does not hand over the turn
        assert_eq!(board.side_to_move(), Player::Black);
    }

    #[test]
    fn test_apply_move_rejects_before_writing() {
        let mut board = Board::new();
        let before = board.clone();

        assert_eq!(
            board.apply_move(Coord::new(3, 3), &[], Player::Black),
            Err(GameError::OccupiedCell { row: 3, col: 3 })
        );
        assert!(board
            .apply_move(Coord::new(2, 3), &coords(&[(3, 3), (9, 9)]), Player::Black)
            .is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_advance_turn_invalid_move() {
        let mut board = Board::new();

        let result = board.advance_turn(Some(Coord::new(0, 0)));
        assert_eq!(result, Err(GameError::IllegalMove { row: 0, col: 0 }));

        assert_eq!(board, Board::new());
        assert_eq!(board.side_to_move(), Player::Black);
    }

    #[test]
    fn test_advance_turn_alternates_players() {
        let mut board = Board::new();
        board.advance_turn(Some(Coord::new(2, 3))).unwrap();
        assert_eq!(board.side_to_move(), Player::White);

        board.advance_turn(Some(Coord::new(2, 2))).unwrap();
        assert_eq!(board.side_to_move(), Player::Black);
        assert_eq!(board.piece_counts(), (3, 3));
    }

    #[test]
    fn test_pass_turn_leaves_board_unchanged() {
        let mut board = Board::new();
        let cells = board.cells.clone();

        assert_eq!(board.advance_turn(None), Ok(0));

        assert_eq!(board.side_to_move(), Player::White);
        assert_eq!(board.cells, cells);
    }

    #[test]
    fn test_stranded_side_has_no_moves_but_game_continues() {
        let board = Board::parse(STRANDED_FIXTURE, Player::White).unwrap();

        assert!(board.legal_moves().is_empty());
        assert!(!board.is_full());
        assert!(!board.is_terminal());

        let mut passed = board.clone();
        passed.pass_turn();
        assert_eq!(passed.cells, board.cells);
        assert_eq!(
            passed.legal_moves().keys().copied().collect::<Vec<_>>(),
            coords(&[(0, 2)])
        );
    }

    #[test]
    fn test_after_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board
            .after_move(Coord::new(5, 4), &coords(&[(4, 4)]))
            .unwrap();

        assert_eq!(board, Board::new());
        assert_eq!(next.side_to_move(), Player::White);
        assert_eq!(next.cell(Coord::new(5, 4)), Some(Cell::Black));
        assert_eq!(next.cell(Coord::new(4, 4)), Some(Cell::Black));
    }

    #[test]
    fn test_is_terminal_when_full() {
        let mut board = Board::new();
        board.cells.fill(Cell::Black);

        assert!(board.is_full());
        assert!(board.is_terminal());
        board.pass_turn();
        assert!(board.is_terminal());
    }

    #[test]
    fn test_is_terminal_when_neither_side_can_move() {
        let board = Board::parse(
            "X.......
             ........
             ........
             ........
             ........
             ........
             ........
             .......O",
            Player::Black,
        )
        .unwrap();

        assert!(!board.is_full());
        assert!(board.is_terminal());
    }

    #[test]
    fn test_tally() {
        let mut board = Board::new();
        for row in 0..4 {
            for col in 0..8 {
                board.cells[(row, col)] = Cell::Black;
            }
        }
        for row in 4..8 {
            for col in 0..8 {
                board.cells[(row, col)] = Cell::White;
            }
        }
        assert_eq!(board.tally(), Tally::new(32, 32));
        assert_eq!(board.tally().winner, None);

        board.cells[(7, 7)] = Cell::Black;
        assert_eq!(board.tally().winner, Some(Player::Black));
        assert_eq!(board.piece_counts(), (33, 31));
    }

    #[test]
    fn test_parse_round_trips_opening() {
        let board = Board::parse(
            "........
             ........
             ........
             ...OX...
             ...XO...
             ........
             ........
             ........",
            Player::Black,
        )
        .unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Board::parse("X.O", Player::Black),
            Err(GameError::InvalidBoardLength { cells: 3 })
        );
        assert_eq!(
            Board::parse("X........", Player::Black),
            Err(GameError::InvalidBoardLength { cells: 9 })
        );
        assert_eq!(
            Board::parse("X..?............", Player::Black),
            Err(GameError::InvalidCellCharacter {
                character: '?',
                position: 3
            })
        );
    }
}
