use crossterm::event::Event;

use crate::Runtime;

/// Trait for terminal applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Presents the current state (called on each render event).
    fn render(&mut self);

    /// Updates game logic (called on each tick of the runtime's [`TickTimer`](crate::TickTimer)).
    fn update(&mut self, runtime: &mut Runtime);
}
