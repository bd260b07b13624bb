use crate::{
    PieceCollisionError,
    core::{
        grid::Grid,
        piece::{ActivePiece, PieceKind, PieceShape},
    },
};

/// Returns whether `shape` anchored at `(row, column)` overlaps a wall, the
/// floor or a settled cell of `grid`.
///
/// This is the single legality check behind every board transition. There is
/// no ceiling: cells above row 0 are never produced because anchors start at
/// row 0 and only move down.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, PieceKind, collides};
///
/// let shape = PieceKind::O.shape();
/// assert!(!collides(&Grid::EMPTY, &shape, 0, 0));
/// assert!(collides(&Grid::EMPTY, &shape, 0, -1));
/// assert!(collides(&Grid::EMPTY, &shape, 19, 0));
/// ```
#[must_use]
pub fn collides(grid: &Grid, shape: &PieceShape, row: usize, column: isize) -> bool {
    shape.occupied_cells().any(|(dr, dc)| {
        let c = column
            .checked_add_unsigned(dc)
            .and_then(|c| usize::try_from(c).ok());
        grid.is_blocked(row + dr, c)
    })
}

/// Horizontal component of a [`Board::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    /// One column to the left.
    Left,
    /// Keep the column (rotation only).
    #[default]
    Stay,
    /// One column to the right.
    Right,
}

impl Shift {
    const fn apply(self, column: isize) -> isize {
        match self {
            Shift::Left => column - 1,
            Shift::Stay => column,
            Shift::Right => column + 1,
        }
    }
}

/// Settled grid plus the falling piece.
///
/// The board knows nothing about time, score or what comes next; it only
/// offers the transitions the session controller chooses between:
///
/// - [`start`](Self::start): clear the grid and spawn a piece
/// - [`advance_row`](Self::advance_row): move the piece one row down
/// - [`try_move`](Self::try_move): rotate and/or shift, if legal
/// - [`commit`](Self::commit): install an already merged grid and spawn the next piece
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: ActivePiece,
}

impl Board {
    /// Creates an empty board with `kind` spawned at the top.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            grid: Grid::EMPTY,
            active: ActivePiece::spawn(kind),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// Resets the grid to empty and spawns `kind` centred on the top row.
    pub fn start(&mut self, kind: PieceKind) {
        *self = Self::new(kind);
    }

    /// Moves the active piece down one row without checking for collisions.
    ///
    /// Callers decide beforehand (with [`is_landed`](Self::is_landed)) that
    /// the move is safe.
    pub fn advance_row(&mut self) {
        self.active.move_down();
    }

    /// Applies an optional new orientation and a column shift to the active
    /// piece, keeping its row.
    ///
    /// Rotation and sideways movement share this one check. When the candidate
    /// placement collides the piece is left untouched.
    pub fn try_move(
        &mut self,
        shape: Option<PieceShape>,
        shift: Shift,
    ) -> Result<(), PieceCollisionError> {
        let shape = shape.unwrap_or(*self.active.shape());
        let column = shift.apply(self.active.column());
        if collides(&self.grid, &shape, self.active.row(), column) {
            return Err(PieceCollisionError);
        }
        self.active.place(shape, column);
        Ok(())
    }

    /// Replaces the grid wholesale and spawns `next` centred on the top row.
    ///
    /// `grid` must already contain the locked piece with full rows cleared;
    /// this transition does neither.
    pub fn commit(&mut self, grid: Grid, next: PieceKind) {
        self.grid = grid;
        self.active = ActivePiece::spawn(next);
    }

    /// Returns whether the active piece cannot fall one more row.
    #[must_use]
    pub fn is_landed(&self) -> bool {
        collides(
            &self.grid,
            self.active.shape(),
            self.active.row() + 1,
            self.active.column(),
        )
    }

    /// Creates a board over an existing grid with `kind` spawned at the top.
    #[cfg(test)]
    pub(crate) fn with_grid(grid: Grid, kind: PieceKind) -> Self {
        Self {
            grid,
            active: ActivePiece::spawn(kind),
        }
    }

    /// Returns a copy of the grid with the active piece merged in.
    #[must_use]
    pub fn merged_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        grid.merge_piece(&self.active);
        grid
    }
}
