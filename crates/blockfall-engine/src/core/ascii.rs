use super::{board::Board, piece::PieceKind};

/// Error returned by [`Board::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AsciiBoardError {
    #[display("board art contains no rows")]
    Empty,
    #[display("board art has {rows} rows but the board is only {height} tall")]
    TooTall { rows: usize, height: usize },
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell { row: usize, column: usize, ch: char },
    #[display("row {row} is full")]
    FullRow { row: usize },
}

impl Board {
    /// Builds a board of the given height from ASCII art.
    ///
    /// Rows are written top to bottom and aligned to the floor: the last row of the
    /// art is `y = 0`. `.` is an empty cell and a piece letter (`I`, `O`, `S`, `Z`,
    /// `J`, `L`, `T`) is a settled cell of that kind. Surrounding whitespace and
    /// blank lines are ignored. The width is taken from the rows.
    ///
    /// Full rows are refused: a board only holds one after the command that
    /// completed it, and that command clears it.
    ///
    /// # Example
    ///
    /// ```
    /// use blockfall_engine::Board;
    ///
    /// let board = Board::from_ascii(
    ///     20,
    ///     "
    ///     ....T.....
    ///     ...TTT....
    ///     ",
    /// )
    /// .unwrap();
    /// assert_eq!(board.width(), 10);
    /// assert_eq!(board.column_height(4), 2);
    /// ```
    pub fn from_ascii(height: usize, art: &str) -> Result<Self, AsciiBoardError> {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(AsciiBoardError::Empty);
        };
        if lines.len() > height {
            return Err(AsciiBoardError::TooTall {
                rows: lines.len(),
                height,
            });
        }

        let width = first.chars().count();
        let mut cells = vec![None; width * height];
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(AsciiBoardError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            let y = lines.len() - 1 - row;
            let row_cells = &mut cells[y * width..][..width];
            for (column, ch) in line.chars().enumerate() {
                row_cells[column] = match ch {
                    '.' => None,
                    _ => Some(PieceKind::from_char(ch).ok_or(AsciiBoardError::InvalidCell {
                        row,
                        column,
                        ch,
                    })?),
                };
            }
            if row_cells.iter().all(Option::is_some) {
                return Err(AsciiBoardError::FullRow { row });
            }
        }

        Ok(Board::from_cells(width, height, cells))
    }
}
