//! Rules engine for a falling-block puzzle game.
//!
//! The crate is split the same way the game is:
//!
//! - [`core`] - value types: [`Cell`], [`Grid`], [`PieceKind`], [`PieceShape`], [`ActivePiece`]
//! - [`engine`] - the [`Board`] state machine and the [`GameSession`] controller
//!   that drives it from timer ticks and key events
//!
//! Nothing here sleeps, spawns threads or touches a terminal. A host delivers
//! ticks and input events, reads the session back for display, and applies the
//! tick interval the session asks for (see [`TickScheduler`] and
//! [`SessionDriver`]).

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the requested placement")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("clearing {lines} lines at once has no defined score")]
pub struct UnsupportedLineClearError {
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    #[display("expected {} rows, got {_0}", Grid::HEIGHT)]
    RowCount(#[error(not(source))] usize),
    #[display("row {row} has {width} cells, expected {}", Grid::WIDTH)]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell { row: usize, column: usize, ch: char },
}
