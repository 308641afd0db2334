//! Text rendering of the board for the terminal.

use std::fmt::Write;

use reversi::{Board, Cell, Tally};

const CELL_WIDTH: usize = 7;

/// Board as a grid with row and column indices, `X` for Black and `O` for White
pub fn render_board(board: &Board) -> String {
    let size = board.size();
    let cells = board.cells();
    let width = size * (CELL_WIDTH + 1) + 1;
    let mut out = String::new();

    out.push(' ');
    for col in 0..size {
        let _ = write!(out, "|{:^w$}", col, w = CELL_WIDTH);
    }
    out.push_str("|\n");
    let _ = writeln!(out, " {}", "=".repeat(width));

    for row in 0..size {
        let _ = write!(out, "{}", row);
        for col in 0..size {
            let symbol = match cells[(row, col)] {
                Cell::Empty => ' ',
                Cell::Black => 'X',
                Cell::White => 'O',
            };
            let _ = write!(out, "|{:^w$}", symbol, w = CELL_WIDTH);
        }
        out.push_str("|\n");
        let rule = if row + 1 == size { "=" } else { "-" };
        let _ = writeln!(out, " {}", rule.repeat(width));
    }

    out
}

pub fn render_result(tally: &Tally) -> String {
    match tally.winner {
        Some(winner) => format!(
            "{} wins {} to {}",
            winner.symbol(),
            tally.count(winner),
            tally.count(winner.opponent())
        ),
        None => format!("Draw, {} pieces each", tally.black),
    }
}
