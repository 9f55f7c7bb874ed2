use std::{
    io,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event;

use crate::event::TuiEvent;

/// Longest time terminal polling blocks while a message channel is attached.
///
/// This bounds the delay between a message arriving and the app seeing it, and sets
/// how often an otherwise idle loop wakes up.
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render at fixed intervals.
    Interval(Duration),
    /// Render after state changes (tick, message or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Interval` mode from frame rate (FPS).
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state management.
///
/// Manages tick/render intervals and the optional message channel, and returns the
/// next event via `next()`. If an interval is not set, that event type will not be
/// generated.
#[derive(Debug)]
pub(super) struct EventLoop<M> {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
    messages: Option<Receiver<M>>,
}

impl<M> EventLoop<M> {
    /// Creates a new `EventLoop`.
    ///
    /// Tick interval is unset, and render mode defaults to `OnDirty`.
    pub(super) fn new(messages: Option<Receiver<M>>) -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: past_time,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
            messages,
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Sets the render mode.
    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached, a message arrives or a crossterm
    /// event occurs. Pending renders and ticks take precedence over messages.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent<M>> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let do_render = match self.render_mode {
                RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(message) = self.try_recv_message() {
                self.dirty = true;
                return Ok(TuiEvent::Message(message));
            }

            if let Some(timeout) = self.poll_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(TuiEvent::Crossterm(event::read()?));
        }
    }

    fn try_recv_message(&mut self) -> Option<M> {
        let messages = self.messages.as_ref()?;
        match messages.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.messages = None;
                None
            }
        }
    }

    /// Timeout for terminal polling, capped while messages may still arrive.
    fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        let timeout = self.compute_timeout(now);
        if self.messages.is_none() {
            return timeout;
        }
        Some(timeout.map_or(MESSAGE_POLL_INTERVAL, |t| t.min(MESSAGE_POLL_INTERVAL)))
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_render_comes_first() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut events = EventLoop::new(Some(rx));
        tx.send(7).unwrap();

        assert!(events.next().unwrap().is_render());
        assert!(matches!(events.next().unwrap(), TuiEvent::Message(7)));
    }

    #[test]
    fn test_message_marks_dirty() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut events = EventLoop::new(Some(rx));
        assert!(events.next().unwrap().is_render());

        tx.send("reply").unwrap();
        assert!(events.next().unwrap().is_message());
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_messages_are_delivered_in_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut events = EventLoop::new(Some(rx));
        events.set_render_mode(RenderMode::Interval(Duration::from_secs(3600)));
        for i in 0..3 {
            tx.send(i).unwrap();
        }

        assert!(events.next().unwrap().is_render());
        for i in 0..3 {
            assert!(matches!(events.next().unwrap(), TuiEvent::Message(m) if m == i));
        }
    }

    #[test]
    fn test_tick_before_render() {
        let mut events = EventLoop::<()>::new(None);
        events.set_tick_interval(Some(Duration::from_secs(3600)));
        assert!(events.next().unwrap().is_tick());
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_disconnected_channel_is_dropped() {
        let (tx, rx) = crossbeam_channel::unbounded::<u8>();
        let mut events = EventLoop::new(Some(rx));
        drop(tx);
        assert_eq!(events.try_recv_message(), None);
        assert!(events.messages.is_none());
    }

    #[test]
    fn test_poll_timeout_is_capped_with_messages() {
        let now = Instant::now();
        let mut idle = EventLoop::<()>::new(None);
        idle.dirty = false;
        assert_eq!(idle.poll_timeout(now), None);

        let (_tx, rx) = crossbeam_channel::unbounded::<()>();
        let mut watching = EventLoop::new(Some(rx));
        watching.dirty = false;
        assert_eq!(watching.poll_timeout(now), Some(MESSAGE_POLL_INTERVAL));

        watching.set_tick_interval(Some(Duration::from_secs(3600)));
        watching.last_tick = now;
        assert_eq!(watching.poll_timeout(now), Some(MESSAGE_POLL_INTERVAL));

        // A sooner tick still wins over the cap.
        watching.set_tick_interval(Some(Duration::from_millis(20)));
        assert_eq!(watching.poll_timeout(now), Some(Duration::from_millis(20)));
    }
}
