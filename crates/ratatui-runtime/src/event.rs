use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub(super) enum TuiEvent<M> {
    /// Game logic update timing (based on `tick_interval`).
    Tick,
    /// Screen render timing (based on the render mode).
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
    /// Message received from the runtime's message channel.
    Message(M),
}
