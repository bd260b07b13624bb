//! Terminal host for [`blockfall_engine`].
//!
//! [`Runtime`] owns a crossterm event loop whose tick pace is set through a
//! shared [`TickTimer`]. [`GameApp`] couples it with a
//! [`SessionDriver`](blockfall_engine::SessionDriver) so the session's tick
//! interval drives the loop, and hands the session to a render callback.
//!
//! ```no_run
//! use blockfall_engine::{GameSession, SessionConfig};
//! use blockfall_runtime::{GameApp, Runtime};
//!
//! let runtime = Runtime::new();
//! let session = GameSession::new(SessionConfig::default());
//! let mut app = GameApp::new(&runtime, session, |session| {
//!     print!("\x1b[2J\x1b[H{}", session.render_grid().to_string().replace('\n', "\r\n"));
//! });
//! runtime.run(&mut app)?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub use self::{
    app::App, event_loop::RenderMode, game_app::GameApp, input::key_input, runtime::Runtime,
    timer::TickTimer,
};

mod app;
mod event;
mod event_loop;
mod game_app;
mod input;
mod runtime;
mod timer;
