use std::time::Duration;

use log::debug;

use super::{game_session::GameSession, input::InputEvent};

/// Timer service that delivers ticks to a session.
///
/// Implementors restart their periodic timer with the new interval on every
/// call; `None` stops it.
pub trait TickScheduler {
    fn reschedule(&mut self, interval: Option<Duration>);
}

impl<T> TickScheduler for &mut T
where
    T: TickScheduler + ?Sized,
{
    fn reschedule(&mut self, interval: Option<Duration>) {
        (**self).reschedule(interval);
    }
}

/// Couples a [`GameSession`] with the timer that paces it.
///
/// Every event is forwarded to the session and the timer is rescheduled
/// whenever the session's tick interval changed as a result. The timer is
/// acquired when play starts and released when the game ends or the driver
/// is dropped, whichever comes first.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, SessionConfig, SessionDriver, TickScheduler};
///
/// #[derive(Default)]
/// struct Recorder(Vec<Option<Duration>>);
///
/// impl TickScheduler for Recorder {
///     fn reschedule(&mut self, interval: Option<Duration>) {
///         self.0.push(interval);
///     }
/// }
///
/// let mut timer = Recorder::default();
/// {
///     let mut driver = SessionDriver::new(GameSession::new(SessionConfig::default()), &mut timer);
///     driver.start_game();
/// }
/// assert_eq!(timer.0, [Some(Duration::from_millis(800)), None]);
/// ```
#[derive(Debug)]
pub struct SessionDriver<S>
where
    S: TickScheduler,
{
    session: GameSession,
    scheduler: S,
    scheduled: Option<Duration>,
}

impl<S> SessionDriver<S>
where
    S: TickScheduler,
{
    /// Wraps `session`; the timer is only started once the session asks for ticks.
    pub fn new(session: GameSession, scheduler: S) -> Self {
        let mut this = Self {
            session,
            scheduler,
            scheduled: None,
        };
        this.sync_timer();
        this
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn start_game(&mut self) {
        self.session.start_game();
        self.sync_timer();
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
        self.sync_timer();
    }

    pub fn on_tick(&mut self) {
        self.session.on_tick();
        self.sync_timer();
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.session.handle_input(event);
        self.sync_timer();
    }

    fn sync_timer(&mut self) {
        let interval = self.session.tick_interval();
        if interval != self.scheduled {
            debug!("rescheduling ticks: {interval:?}");
            self.scheduled = interval;
            self.scheduler.reschedule(interval);
        }
    }
}

impl<S> Drop for SessionDriver<S>
where
    S: TickScheduler,
{
    fn drop(&mut self) {
        if self.scheduled.take().is_some() {
            self.scheduler.reschedule(None);
        }
    }
}
