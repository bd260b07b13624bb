use blockfall_engine::{GameSession, SessionDriver};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{App, RenderMode, Runtime, TickTimer, input::key_input};

/// Plays one [`GameSession`] in the terminal.
///
/// Ticks come from the runtime's [`TickTimer`]. Presentation is left to the
/// `render` callback, which receives the session on every render event.
///
/// Controls: Enter starts (or restarts) a game, arrows play, P pauses and
/// Q, Esc or Ctrl-C quits.
pub struct GameApp<F>
where
    F: FnMut(&GameSession),
{
    driver: SessionDriver<TickTimer>,
    render: F,
    is_exiting: bool,
}

impl<F> GameApp<F>
where
    F: FnMut(&GameSession),
{
    /// Creates an app whose session is paced by `runtime`'s timer.
    pub fn new(runtime: &Runtime, session: GameSession, render: F) -> Self {
        Self {
            driver: SessionDriver::new(session, runtime.timer()),
            render,
            is_exiting: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        self.driver.session()
    }
}

impl<F> App for GameApp<F>
where
    F: FnMut(&GameSession),
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(60.0));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if let Some(input) = key_input(&key) {
            self.driver.handle_input(input);
            return;
        }
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Enter => self.driver.start_game(),
            KeyCode::Char('p') => self.driver.toggle_pause(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.is_exiting = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn render(&mut self) {
        (self.render)(self.driver.session());
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.driver.on_tick();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{PieceSeed, SessionConfig, TickSpeed};
    use crossterm::event::KeyEvent;

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    // The app must not keep `runtime` borrowed.
    fn app(runtime: &Runtime) -> GameApp<impl FnMut(&GameSession) + use<>> {
        let session =
            GameSession::with_seed(SessionConfig::default(), PieceSeed::from_bytes([5; 16]));
        GameApp::new(runtime, session, |_| {})
    }

    #[test]
    fn test_enter_starts_game_and_timer() {
        let mut runtime = Runtime::new();
        let mut app = app(&runtime);
        assert!(app.session().status().is_idle());
        assert_eq!(runtime.timer().interval(), None);

        app.handle_event(&mut runtime, press(KeyCode::Enter));
        assert!(app.session().status().is_playing());
        assert_eq!(runtime.timer().interval(), Some(Duration::from_millis(800)));
    }

    #[test]
    fn test_arrows_reach_session() {
        let mut runtime = Runtime::new();
        let mut app = app(&runtime);
        app.handle_event(&mut runtime, press(KeyCode::Enter));

        let column = app.session().active_piece().column();
        app.handle_event(&mut runtime, press(KeyCode::Left));
        assert_eq!(app.session().active_piece().column(), column - 1);

        app.handle_event(&mut runtime, press(KeyCode::Down));
        assert_eq!(app.session().tick_speed(), Some(TickSpeed::Fast));
        assert_eq!(runtime.timer().interval(), Some(Duration::from_millis(50)));
        app.handle_event(&mut runtime, release(KeyCode::Down));
        assert_eq!(app.session().tick_speed(), Some(TickSpeed::Normal));
    }

    #[test]
    fn test_update_ticks_session() {
        let mut runtime = Runtime::new();
        let mut app = app(&runtime);
        app.handle_event(&mut runtime, press(KeyCode::Enter));

        let row = app.session().active_piece().row();
        app.update(&mut runtime);
        assert_eq!(app.session().active_piece().row(), row + 1);
    }

    #[test]
    fn test_pause_key() {
        let mut runtime = Runtime::new();
        let mut app = app(&runtime);
        app.handle_event(&mut runtime, press(KeyCode::Enter));
        app.handle_event(&mut runtime, press(KeyCode::Char('p')));
        assert!(app.session().is_paused());
        app.handle_event(&mut runtime, press(KeyCode::Char('p')));
        assert!(!app.session().is_paused());
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let mut runtime = Runtime::new();
            let mut app = app(&runtime);
            assert!(!app.should_exit());
            app.handle_event(&mut runtime, event);
            assert!(app.should_exit());
        }
    }

    #[test]
    fn test_render_passes_session() {
        let runtime = Runtime::new();
        let session = GameSession::new(SessionConfig::default());
        let mut seen = 0;
        {
            let mut app = GameApp::new(&runtime, session, |s: &GameSession| {
                assert!(s.status().is_idle());
                seen += 1;
            });
            app.render();
            app.render();
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_dropping_app_stops_timer() {
        let mut runtime = Runtime::new();
        let timer = runtime.timer();
        {
            let mut app = app(&runtime);
            app.handle_event(&mut runtime, press(KeyCode::Enter));
            assert!(timer.interval().is_some());
        }
        assert_eq!(timer.interval(), None);
    }
}
