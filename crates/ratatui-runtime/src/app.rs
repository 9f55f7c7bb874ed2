use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Messages delivered through the runtime's message channel.
    type Message;

    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure tick rate and render mode.
    fn init(&mut self, runtime: &mut Runtime<Self::Message>);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime<Self::Message>, event: Event);

    /// Handles a message from the message channel.
    fn handle_message(&mut self, runtime: &mut Runtime<Self::Message>, message: Self::Message);

    /// Draws the screen (called on each render event).
    fn draw(&self, frame: &mut Frame);

    /// Updates application state (called on each tick, if a tick interval is set).
    fn update(&mut self, _runtime: &mut Runtime<Self::Message>) {}
}
