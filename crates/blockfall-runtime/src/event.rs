use crossterm::event::Event as CrosstermEvent;

/// Events processed by a runtime application.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum RuntimeEvent {
    /// Game logic update timing (based on the scheduled tick interval).
    Tick,
    /// Render callback timing (based on the render mode).
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
