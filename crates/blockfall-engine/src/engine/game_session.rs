use std::time::Duration;

use log::{debug, info, trace};
use rand::Rng as _;

use crate::core::{
    grid::Grid,
    piece::{ActivePiece, PieceKind},
};

use super::{
    board::{Board, Shift, collides},
    config::{SessionConfig, TickSpeed},
    game_stats::GameStats,
    input::{Direction, InputEvent},
    piece_generator::{PieceGenerator, PieceSeed},
    upcoming_queue::UpcomingQueue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionStatus {
    /// No game started yet.
    Idle,
    Playing,
    GameOver,
}

/// Outcome of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    /// Kind of the piece that locked.
    pub kind: PieceKind,
    pub lines_cleared: usize,
    pub points: usize,
}

/// One game: the board plus score, piece queue, status and tick pacing.
///
/// The session never waits on a clock. A host calls [`on_tick`](Self::on_tick)
/// every [`tick_interval`](Self::tick_interval) and forwards key events to
/// [`handle_input`](Self::handle_input); [`SessionDriver`](crate::SessionDriver)
/// does the rescheduling bookkeeping for it.
///
/// # Locking
///
/// When a tick finds the piece resting on something, the session switches to
/// the short [`TickSpeed::Sliding`] interval and marks a commit as pending.
/// On the next tick the piece locks, unless the player slid it off the ledge
/// in the meantime, in which case normal falling resumes.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Direction, GameSession, InputEvent, SessionConfig};
///
/// let mut session = GameSession::new(SessionConfig::default());
/// session.start_game();
/// assert!(session.status().is_playing());
///
/// session.handle_input(InputEvent::press(Direction::Left));
/// while session.stats().pieces() == 1 {
///     session.on_tick();
/// }
/// assert!(session.last_commit().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    generator: PieceGenerator,
    upcoming: UpcomingQueue,
    stats: GameStats,
    status: SessionStatus,
    tick_speed: Option<TickSpeed>,
    commit_pending: bool,
    last_commit: Option<CommitReport>,
}

impl GameSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(config: SessionConfig, seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let board = Board::new(generator.next_kind());
        Self {
            config,
            board,
            generator,
            upcoming: UpcomingQueue::new(),
            stats: GameStats::new(),
            status: SessionStatus::Idle,
            tick_speed: None,
            commit_pending: false,
            last_commit: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        self.board.active()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.tick_speed == Some(TickSpeed::Paused)
    }

    #[must_use]
    pub fn is_commit_pending(&self) -> bool {
        self.commit_pending
    }

    #[must_use]
    pub fn tick_speed(&self) -> Option<TickSpeed> {
        self.tick_speed
    }

    /// Returns how long the host should wait between ticks.
    ///
    /// `None` means no timer should be running at all.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_speed.map(|speed| self.config.interval(speed))
    }

    /// Returns the preview of upcoming piece kinds, next first.
    #[must_use]
    pub fn upcoming(&self) -> &[PieceKind] {
        self.upcoming.as_slice()
    }

    #[must_use]
    pub fn last_commit(&self) -> Option<CommitReport> {
        self.last_commit
    }

    /// Returns the grid to display: settled cells, plus the falling piece while playing.
    #[must_use]
    pub fn render_grid(&self) -> Grid {
        if self.status.is_playing() {
            self.board.merged_grid()
        } else {
            self.board.grid().clone()
        }
    }

    /// Starts a new game, discarding any previous one.
    pub fn start_game(&mut self) {
        let upcoming = std::array::from_fn(|_| self.generator.next_kind());
        self.upcoming.reset(upcoming);
        self.board.start(self.generator.next_kind());
        self.stats = GameStats::new();
        self.status = SessionStatus::Playing;
        self.commit_pending = false;
        self.last_commit = None;
        self.set_tick_speed(Some(TickSpeed::Normal));
        info!(
            "game started with {:?}, upcoming {:?}",
            self.board.active().kind(),
            self.upcoming.as_slice()
        );
    }

    /// Switches between the paused and the normal tick speed.
    ///
    /// Has no effect unless a game is being played.
    pub fn toggle_pause(&mut self) {
        if !self.status.is_playing() {
            return;
        }
        let speed = if self.is_paused() {
            TickSpeed::Normal
        } else {
            TickSpeed::Paused
        };
        self.set_tick_speed(Some(speed));
    }

    /// Advances the game by one timer tick.
    pub fn on_tick(&mut self) {
        if !self.status.is_playing() {
            return;
        }
        if self.commit_pending {
            self.commit_position();
            return;
        }
        if self.board.is_landed() {
            self.commit_pending = true;
            self.set_tick_speed(Some(TickSpeed::Sliding));
        } else {
            self.board.advance_row();
        }
    }

    /// Applies a key event from the player.
    ///
    /// Ignored unless a game is being played and not paused. Rejected moves
    /// and rotations leave the piece where it is.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.status.is_playing() || self.is_paused() {
            return;
        }
        match event {
            InputEvent::KeyDown {
                key: Direction::Down,
                repeat,
            } => {
                if !repeat {
                    self.set_tick_speed(Some(TickSpeed::Fast));
                }
            }
            InputEvent::KeyDown {
                key: Direction::Up, ..
            } => {
                let rotated = self.board.active().shape().rotated();
                _ = self.board.try_move(Some(rotated), Shift::Stay);
            }
            InputEvent::KeyDown {
                key: Direction::Left,
                ..
            } => _ = self.board.try_move(None, Shift::Left),
            InputEvent::KeyDown {
                key: Direction::Right,
                ..
            } => _ = self.board.try_move(None, Shift::Right),
            InputEvent::KeyUp {
                key: Direction::Down,
            } => {
                let speed = if self.commit_pending {
                    TickSpeed::Sliding
                } else {
                    TickSpeed::Normal
                };
                self.set_tick_speed(Some(speed));
            }
            InputEvent::KeyUp { .. } => {}
        }
    }

    fn commit_position(&mut self) {
        if !self.board.is_landed() {
            self.commit_pending = false;
            self.set_tick_speed(Some(TickSpeed::Normal));
            return;
        }

        let locked = *self.board.active();
        let mut grid = self.board.grid().clone();
        grid.merge_piece(&locked);
        let lines_cleared = grid.clear_lines();

        let next = self
            .upcoming
            .advance(self.generator.next_kind())
            .expect("upcoming queue is filled when the game starts");
        let spawned = ActivePiece::spawn(next);
        let topped_out = collides(&grid, spawned.shape(), spawned.row(), spawned.column());

        let points = self
            .stats
            .complete_piece_drop(lines_cleared)
            .unwrap_or_else(|err| panic!("{err}"));
        self.board.commit(grid, next);
        self.commit_pending = false;
        self.last_commit = Some(CommitReport {
            kind: locked.kind(),
            lines_cleared,
            points,
        });
        debug!(
            "locked {:?} at row {}, column {}: {lines_cleared} lines, {points} points, score {}",
            locked.kind(),
            locked.row(),
            locked.column(),
            self.stats.score()
        );

        if topped_out {
            self.status = SessionStatus::GameOver;
            self.set_tick_speed(None);
            info!(
                "game over: {next:?} cannot spawn, score {} after {} pieces",
                self.stats.score(),
                self.stats.pieces()
            );
        } else {
            self.set_tick_speed(Some(TickSpeed::Normal));
        }
    }

    fn set_tick_speed(&mut self, speed: Option<TickSpeed>) {
        if self.tick_speed != speed {
            trace!("tick speed {:?} -> {speed:?}", self.tick_speed);
            self.tick_speed = speed;
        }
    }
}
