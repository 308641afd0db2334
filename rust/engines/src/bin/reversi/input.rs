//! Reads the human player's moves from a line-oriented reader.

use std::io::{self, BufRead, ErrorKind, Write};

use reversi::{Board, GameError};
use reversi_engines::MoveInput;

pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
    /// First I/O failure; it ends the match like end of input does
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            error: None,
        }
    }

    /// `Err` with the I/O failure that ended input, if that is what happened
    pub fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    /// Ask for one integer until one is given; `None` on end of input
    fn prompt_number(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            write!(self.writer, "{}", prompt)?;
            self.writer.flush()?;

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(error) if error.kind() == ErrorKind::InvalidData => {
                    writeln!(self.writer, "input is not valid text")?;
                    continue;
                }
                Err(error) => return Err(error),
            }

            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.writer, "'{}' is not a number", line.trim())?,
            }
        }
    }

    fn prompt_move(&mut self, board: &Board) -> io::Result<Option<(i64, i64)>> {
        let symbol = board.side_to_move().symbol();
        let Some(row) = self.prompt_number(&format!("Player {}, enter row: ", symbol))? else {
            return Ok(None);
        };
        let Some(col) = self.prompt_number(&format!("Player {}, enter column: ", symbol))? else {
            return Ok(None);
        };
        Ok(Some((row, col)))
    }
}

impl<R: BufRead, W: Write> MoveInput for PromptInput<R, W> {
    fn read_move(&mut self, board: &Board) -> Option<(i64, i64)> {
        match self.prompt_move(board) {
            Ok(coords) => coords,
            Err(error) => {
                self.error = Some(error);
                None
            }
        }
    }

    fn reject(&mut self, error: &GameError) {
        if let Err(io_error) = writeln!(self.writer, "{}, try again", error) {
            self.error.get_or_insert(io_error);
        }
    }
}
