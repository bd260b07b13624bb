use std::{fmt, str::FromStr};

use crate::ParseGridError;

use super::{cell::Cell, piece::ActivePiece};

/// Number of rows in the grid. Row 0 is the top.
pub const HEIGHT: usize = 20;
/// Number of columns in the grid.
pub const WIDTH: usize = 12;

/// A single row of the grid.
pub type GridRow = [Cell; WIDTH];

const EMPTY_ROW: GridRow = [Cell::Empty; WIDTH];

/// The settled cells of the playfield.
///
/// A `Grid` always holds exactly [`HEIGHT`] rows of [`WIDTH`] cells. It only
/// stores committed blocks: the falling piece lives in
/// [`ActivePiece`] and is merged in by [`Grid::merge_piece`] when it locks
/// (or on a throwaway copy for display).
///
/// The text form writes one row per line, `.` for an empty cell and the
/// piece letter otherwise:
///
/// ```
/// use blockfall_engine::{Cell, Grid, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// grid.set_cell(19, 0, Cell::Piece(PieceKind::T));
///
/// let text = grid.to_string();
/// assert!(text.ends_with("T...........\n"));
/// assert_eq!(text.parse::<Grid>().unwrap(), grid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: [GridRow; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const HEIGHT: usize = HEIGHT;
    pub const WIDTH: usize = WIDTH;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; HEIGHT],
    };

    #[must_use]
    pub fn rows(&self) -> &[GridRow; HEIGHT] {
        &self.rows
    }

    /// Returns the cell at `(row, column)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` lies outside the grid.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        self.rows[row][column] = cell;
    }

    /// Returns whether a piece cell may not be placed at `(row, column)`.
    ///
    /// Positions below the floor, beyond either wall (`None` marks a column
    /// left of the grid) or on a settled cell are blocked.
    #[must_use]
    pub fn is_blocked(&self, row: usize, column: Option<usize>) -> bool {
        match column.and_then(|c| self.cell(row, c)) {
            Some(cell) => !cell.is_empty(),
            None => true,
        }
    }

    #[must_use]
    pub fn is_row_filled(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| !cell.is_empty())
    }

    /// Writes the piece's occupied cells into the grid as its kind.
    ///
    /// The caller must already know the placement is legal; every target cell
    /// is expected to be inside the grid and empty.
    pub fn merge_piece(&mut self, piece: &ActivePiece) {
        for (row, column) in piece.occupied_positions() {
            let cell = column
                .and_then(|c| self.rows.get_mut(row)?.get_mut(c))
                .expect("merged piece must lie inside the grid");
            debug_assert!(
                cell.is_empty(),
                "{:?} merged over a settled cell at row {row}",
                piece.kind()
            );
            *cell = Cell::Piece(piece.kind());
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Filled rows are removed and the same number of empty rows appear at
    /// the top, so everything above a cleared row drops by the number of
    /// cleared rows beneath it.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..HEIGHT).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() != HEIGHT {
            return Err(ParseGridError::RowCount(lines.len()));
        }
        let mut grid = Grid::EMPTY;
        for (row, line) in lines.into_iter().enumerate() {
            grid.rows[row] = parse_row(row, line)?;
        }
        Ok(grid)
    }
}

fn parse_row(row: usize, line: &str) -> Result<GridRow, ParseGridError> {
    let width = line.chars().count();
    if width != WIDTH {
        return Err(ParseGridError::RowWidth { row, width });
    }
    let mut cells = EMPTY_ROW;
    for (column, ch) in line.chars().enumerate() {
        cells[column] =
            Cell::from_char(ch).ok_or(ParseGridError::InvalidCell { row, column, ch })?;
    }
    Ok(cells)
}

/// Builds a grid whose bottom rows are given in text form; rows above are empty.
#[cfg(test)]
pub(crate) fn grid_with_bottom_rows(rows: &[&str]) -> Grid {
    let mut grid = Grid::EMPTY;
    let top = HEIGHT - rows.len();
    for (i, line) in rows.iter().enumerate() {
        grid.rows[top + i] = parse_row(top + i, line).unwrap();
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.rows().len(), HEIGHT);
        for row in grid.rows() {
            assert_eq!(row.len(), WIDTH);
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_is_blocked_outside_and_on_settled_cells() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(5, 5, Cell::Piece(PieceKind::S));

        assert!(grid.is_blocked(HEIGHT, Some(0)));
        assert!(grid.is_blocked(0, Some(WIDTH)));
        assert!(grid.is_blocked(0, None));
        assert!(grid.is_blocked(5, Some(5)));
        assert!(!grid.is_blocked(5, Some(6)));
        assert!(!grid.is_blocked(HEIGHT - 1, Some(WIDTH - 1)));
    }

    #[test]
    fn test_merge_piece_writes_kind() {
        let mut grid = Grid::EMPTY;
        let piece = ActivePiece::spawn(PieceKind::O);
        grid.merge_piece(&piece);

        assert_eq!(grid.cell(0, 5), Some(Cell::Piece(PieceKind::O)));
        assert_eq!(grid.cell(0, 6), Some(Cell::Piece(PieceKind::O)));
        assert_eq!(grid.cell(1, 5), Some(Cell::Piece(PieceKind::O)));
        assert_eq!(grid.cell(1, 6), Some(Cell::Piece(PieceKind::O)));
        let occupied = grid
            .rows()
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(occupied, 4);
    }

    #[test]
    #[should_panic(expected = "merged over a settled cell")]
    #[cfg(debug_assertions)]
    fn test_merge_piece_over_settled_cell_panics() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(0, 5, Cell::Piece(PieceKind::T));
        grid.merge_piece(&ActivePiece::spawn(PieceKind::O));
    }

    #[test]
    fn test_clear_lines_bottom_line() {
        let mut grid = grid_with_bottom_rows(&["..T.........", "IIIIIIIIIIII"]);
        let cleared = grid.clear_lines();

        assert_eq!(cleared, 1);
        assert_eq!(grid, grid_with_bottom_rows(&["..T........."]));
    }

    #[test]
    fn test_clear_lines_keeps_partial_rows() {
        let mut grid = grid_with_bottom_rows(&[
            "LLLLLLLLLLL.",
            "JJJJJJJJJJJJ",
            "SSSSS.SSSSSS",
            "ZZZZZZZZZZZZ",
        ]);
        let cleared = grid.clear_lines();

        assert_eq!(cleared, 2);
        assert_eq!(
            grid,
            grid_with_bottom_rows(&["LLLLLLLLLLL.", "SSSSS.SSSSSS"])
        );
        assert!(grid.rows()[0].iter().all(|cell| cell.is_empty()));
        assert!(grid.rows()[1].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut grid = Grid::EMPTY;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                grid.set_cell(row, column, Cell::Piece(PieceKind::I));
            }
        }
        assert_eq!(grid.clear_lines(), HEIGHT);
        assert_eq!(grid, Grid::EMPTY);
    }

    #[test]
    fn test_clear_lines_nothing_to_clear() {
        let mut grid = grid_with_bottom_rows(&["OO.........."]);
        let before = grid.clone();
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "............".parse::<Grid>(),
            Err(ParseGridError::RowCount(1))
        ));

        let mut text = Grid::EMPTY.to_string();
        text.push_str("....\n");
        assert!(matches!(
            text.parse::<Grid>(),
            Err(ParseGridError::RowCount(21))
        ));

        let text = Grid::EMPTY.to_string().replacen("............", ".....", 1);
        assert!(matches!(
            text.parse::<Grid>(),
            Err(ParseGridError::RowWidth { row: 0, width: 5 })
        ));

        let text = Grid::EMPTY.to_string().replacen("............", "...X........", 1);
        assert!(matches!(
            text.parse::<Grid>(),
            Err(ParseGridError::InvalidCell {
                row: 0,
                column: 3,
                ch: 'X'
            })
        ));
    }
}
