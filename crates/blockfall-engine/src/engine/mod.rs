//! Game engine logic and state management.
//!
//! - [`Board`] - settled grid plus the falling piece, with the legal transitions between them
//! - [`GameSession`] - one game: drives the board from ticks and key events, keeps score
//! - [`GameStats`] - score, piece count and line clear histogram
//! - [`UpcomingQueue`] - preview of the next pieces
//! - [`PieceGenerator`] / [`PieceSeed`] - seeded random source for new pieces
//! - [`SessionDriver`] / [`TickScheduler`] - keeps a host timer in step with the session
//!
//! # Game Flow
//!
//! 1. [`GameSession::start_game`] clears the board and deals the first pieces
//! 2. Each tick moves the piece down one row until it lands
//! 3. A landed piece gets one short [`TickSpeed::Sliding`] tick to be moved off its ledge
//! 4. Otherwise it locks: full rows are cleared, points are added, the next piece spawns
//! 5. Repeat until a new piece cannot spawn (game over)

pub use self::{
    board::*, config::*, driver::*, game_session::*, game_stats::*, input::*,
    piece_generator::*, upcoming_queue::*,
};

mod board;
mod config;
mod driver;
mod game_session;
mod game_stats;
mod input;
mod piece_generator;
mod upcoming_queue;
