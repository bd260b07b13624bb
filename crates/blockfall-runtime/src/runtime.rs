use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use log::{debug, warn};

use crate::{
    App,
    event::RuntimeEvent,
    event_loop::{EventLoop, RenderMode},
    timer::TickTimer,
};

/// Terminal application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the timer that drives `App::update()`.
    ///
    /// The timer starts stopped; hand the handle to whatever decides the tick pace.
    #[must_use]
    pub fn timer(&self) -> TickTimer {
        self.events.timer().clone()
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Puts the terminal in raw mode with key release reporting when available
    /// 3. Runs the event loop until `app.should_exit()` returns true
    ///    - `RuntimeEvent::Tick`: calls `app.update()`
    ///    - `RuntimeEvent::Render`: calls `app.render()`
    ///    - `RuntimeEvent::Crossterm`: calls `app.handle_event()`
    ///
    /// The terminal is restored on return, including on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        let _guard = TerminalGuard::enter(Crossterm)?;
        while !app.should_exit() {
            match self.events.next()? {
                RuntimeEvent::Tick => {
                    app.update(&mut self);
                }
                RuntimeEvent::Render => {
                    app.render();
                }
                RuntimeEvent::Crossterm(event) => {
                    app.handle_event(&mut self, event);
                }
            }
        }
        Ok(())
    }
}

/// Terminal mode switches used by [`TerminalGuard`].
trait TerminalModes {
    fn enable_raw_mode(&mut self) -> io::Result<()>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;
    fn supports_keyboard_enhancement(&mut self) -> bool;
    fn push_keyboard_flags(&mut self) -> io::Result<()>;
    fn pop_keyboard_flags(&mut self) -> io::Result<()>;
}

/// The process's controlling terminal.
#[derive(Debug)]
struct Crossterm;

impl TerminalModes for Crossterm {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    fn supports_keyboard_enhancement(&mut self) -> bool {
        terminal::supports_keyboard_enhancement().unwrap_or(false)
    }

    fn push_keyboard_flags(&mut self) -> io::Result<()> {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
    }

    fn pop_keyboard_flags(&mut self) -> io::Result<()> {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)
    }
}

/// Raw mode for the lifetime of the guard.
///
/// The guard exists as soon as raw mode is on, so a failure later in
/// [`enter`](Self::enter) still restores the terminal.
#[derive(Debug)]
struct TerminalGuard<T>
where
    T: TerminalModes,
{
    terminal: T,
    keyboard_enhanced: bool,
}

impl<T> TerminalGuard<T>
where
    T: TerminalModes,
{
    fn enter(mut terminal: T) -> io::Result<Self> {
        terminal.enable_raw_mode()?;
        let mut guard = Self {
            terminal,
            keyboard_enhanced: false,
        };
        if guard.terminal.supports_keyboard_enhancement() {
            guard.terminal.push_keyboard_flags()?;
            guard.keyboard_enhanced = true;
        } else {
            debug!("terminal does not report key releases");
        }
        Ok(guard)
    }
}

impl<T> Drop for TerminalGuard<T>
where
    T: TerminalModes,
{
    fn drop(&mut self) {
        if self.keyboard_enhanced
            && let Err(e) = self.terminal.pop_keyboard_flags()
        {
            warn!("failed to restore keyboard flags: {e}");
        }
        if let Err(e) = self.terminal.disable_raw_mode() {
            warn!("failed to leave raw mode: {e}");
        }
    }
}
