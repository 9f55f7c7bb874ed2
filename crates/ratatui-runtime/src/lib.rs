//! Minimal event-loop runtime for ratatui applications.
//!
//! Besides terminal input and tick/render timing, the loop can deliver messages from
//! a channel (for example replies from a worker thread) to [`App::handle_message`].

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
