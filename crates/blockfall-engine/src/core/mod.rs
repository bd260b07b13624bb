pub use self::{cell::*, grid::*, piece::*};

pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod piece;
