use std::{io, time::Duration};

use crossbeam_channel::Receiver;

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Debug)]
pub struct Runtime<M = ()> {
    events: EventLoop<M>,
}

impl<M> Default for Runtime<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Runtime<M> {
    /// Creates a new Runtime without a message channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(None),
        }
    }

    /// Creates a new Runtime that delivers messages from `messages` to the app.
    ///
    /// The channel is watched until its senders are dropped.
    #[must_use]
    pub fn with_messages(messages: Receiver<M>) -> Self {
        Self {
            events: EventLoop::new(Some(messages)),
        }
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    /// Sets the tick interval.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Sets the render mode.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Tick`: calls `app.update()`
    ///    - `Render`: calls `app.draw()`
    ///    - terminal event: calls `app.handle_event()`
    ///    - channel message: calls `app.handle_message()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App<Message = M>,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                    TuiEvent::Message(message) => app.handle_message(&mut self, message),
                }
            }
            Ok(())
        })
    }
}
