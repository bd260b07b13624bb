use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::WIDTH;

/// Side length of the largest bounding box a piece shape may use.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Occupancy matrix of a piece relative to its bounding box.
///
/// A shape is an `height × width` boolean matrix (at most
/// [`MAX_SHAPE_SIZE`] on either side) where `true` marks an occupied cell.
/// Every [`PieceKind`] has exactly one canonical shape; rotated orientations
/// are computed on demand with [`PieceShape::rotated`].
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceKind;
///
/// let shape = PieceKind::I.shape();
/// assert_eq!((shape.height(), shape.width()), (4, 4));
///
/// let turned = shape.rotated().rotated().rotated().rotated();
/// assert_eq!(turned, shape);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    height: usize,
    width: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Builds a shape from a row-major boolean matrix.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const context) if either
    /// dimension exceeds [`MAX_SHAPE_SIZE`].
    #[must_use]
    pub const fn from_rows<const H: usize, const W: usize>(rows: [[bool; W]; H]) -> Self {
        assert!(H <= MAX_SHAPE_SIZE && W <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                cells[r][c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self {
            height: H,
            width: W,
            cells,
        }
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns whether the cell at `(row, column)` of the bounding box is occupied.
    ///
    /// Positions outside the bounding box are reported as unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, row: usize, column: usize) -> bool {
        row < self.height && column < self.width && self.cells[row][column]
    }

    /// Returns the shape turned 90° clockwise.
    ///
    /// An `N×M` matrix becomes `M×N` with `out[c][N - 1 - r] = in[r][c]`,
    /// so four rotations always give back the original shape.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < self.height {
            let mut c = 0;
            while c < self.width {
                cells[c][self.height - 1 - r] = self.cells[r][c];
                c += 1;
            }
            r += 1;
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    /// Returns an iterator over `(row, column)` offsets of occupied cells.
    ///
    /// Rows without any occupied cell are skipped entirely.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells[..self.height]
            .iter()
            .enumerate()
            .filter(|(_, row)| row[..self.width].contains(&true))
            .flat_map(move |(r, row)| {
                row[..self.width]
                    .iter()
                    .enumerate()
                    .filter(|(_, occupied)| **occupied)
                    .map(move |(c, _)| (r, c))
            })
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Every piece kind, in discriminant order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the canonical (spawn orientation) shape of this kind.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        // I-piece
        PieceShape::from_rows([[E, E, E, E], [E, E, E, E], [C, C, C, C], [E, E, E, E]]),
        // O-piece
        PieceShape::from_rows([[C, C], [C, C]]),
        // S-piece
        PieceShape::from_rows([[E, E, E], [E, C, C], [C, C, E]]),
        // Z-piece
        PieceShape::from_rows([[E, E, E], [C, C, E], [E, C, C]]),
        // J-piece
        PieceShape::from_rows([[E, E, E], [C, E, E], [C, C, C]]),
        // L-piece
        PieceShape::from_rows([[E, E, E], [E, E, C], [C, C, C]]),
        // T-piece
        PieceShape::from_rows([[E, E, E], [E, C, E], [C, C, C]]),
    ]
};

/// The falling piece: its kind, current orientation and anchor.
///
/// The anchor is the top-left corner of the shape's bounding box in grid
/// coordinates. The column is signed because a rotated shape may have empty
/// leading columns and legally hang over the left edge.
///
/// Only [`Board`](crate::Board) transitions change an active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: PieceShape,
    row: usize,
    column: isize,
}

impl ActivePiece {
    /// Creates a piece of `kind` in its canonical shape, centred on the top row.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            row: 0,
            column: spawn_column(shape.width()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> isize {
        self.column
    }

    /// Returns an iterator over the `(row, column)` grid positions the piece covers.
    ///
    /// Columns left of the grid come out as `None`.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.shape.occupied_cells().map(|(dr, dc)| {
            let column = self
                .column
                .checked_add_unsigned(dc)
                .and_then(|c| usize::try_from(c).ok());
            (self.row + dr, column)
        })
    }

    pub(crate) fn move_down(&mut self) {
        self.row += 1;
    }

    pub(crate) fn place(&mut self, shape: PieceShape, column: isize) {
        self.shape = shape;
        self.column = column;
    }
}

/// Column that centres a shape of `width` cells, rounding half up.
#[expect(clippy::cast_possible_wrap)]
const fn spawn_column(width: usize) -> isize {
    ((WIDTH - width + 1) / 2) as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(
                kind.shape().occupied_cells().count(),
                4,
                "{kind:?} should occupy four cells",
            );
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = PieceKind::T.shape().rotated();
        // . . .      # . .
        // . # .  ->  # # .
        // # # #      # . .
        let expected = PieceShape::from_rows([
            [true, false, false],
            [true, true, false],
            [true, false, false],
        ]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_rectangular_transposes_dimensions() {
        let bar = PieceShape::from_rows([[true, true, true], [true, false, false]]);
        let rotated = bar.rotated();
        assert_eq!((rotated.height(), rotated.width()), (3, 2));
        assert_eq!(
            rotated,
            PieceShape::from_rows([[true, true], [false, true], [false, true]])
        );

        let half_turn = rotated.rotated();
        assert_eq!((half_turn.height(), half_turn.width()), (2, 3));
        assert_ne!(half_turn, bar);
        assert_eq!(half_turn.rotated().rotated(), bar);
    }

    #[test]
    fn test_four_rotations_return_original() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let mut turned = shape;
            for _ in 0..4 {
                turned = turned.rotated();
            }
            assert_eq!(turned, shape, "{kind:?} did not survive a full turn");
        }
    }

    #[test]
    fn test_occupied_cells_skip_empty_rows() {
        let cells: Vec<_> = PieceKind::I.shape().occupied_cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_spawn_is_centred_on_top_row() {
        // (12 - 4) / 2 = 4, (12 - 3) / 2 = 4.5 -> 5, (12 - 2) / 2 = 5
        assert_eq!(ActivePiece::spawn(PieceKind::I).column(), 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).column(), 5);
        assert_eq!(ActivePiece::spawn(PieceKind::O).column(), 5);
        for kind in PieceKind::ALL {
            let piece = ActivePiece::spawn(kind);
            assert_eq!(piece.row(), 0);
            assert_eq!(piece.kind(), kind);
            assert_eq!(*piece.shape(), kind.shape());
        }
    }

    #[test]
    fn test_occupied_positions_left_of_grid() {
        let mut piece = ActivePiece::spawn(PieceKind::I);
        piece.place(PieceKind::I.shape().rotated(), -1);
        // Vertical I sits in bounding-box column 1, i.e. grid column 0.
        assert!(piece.occupied_positions().all(|(_, c)| c == Some(0)));

        piece.place(PieceKind::I.shape(), -1);
        assert!(piece.occupied_positions().any(|(_, c)| c.is_none()));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }

    #[test]
    fn test_piece_kind_serializes_as_letter() {
        let json = serde_json::to_string(&PieceKind::Z).unwrap();
        assert_eq!(json, "\"Z\"");
        assert_eq!(
            serde_json::from_str::<PieceKind>("\"L\"").unwrap(),
            PieceKind::L
        );
    }
}
