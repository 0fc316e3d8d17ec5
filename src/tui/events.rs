use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::remote::Artwork;
use crate::table::{PageWindow, RequestId};

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// A page fetch resolved with fresh data
    PageLoaded {
        request: RequestId,
        window: PageWindow<Artwork>,
    },

    /// A page fetch failed
    FetchFailed { request: RequestId, message: String },
}

/// Event handler bridging terminal input and fetch results into one
/// stream consumed by the application loop.
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::UnboundedReceiver<Event>,

    /// Event sender channel, cloned into spawned fetch tasks
    sender: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self { receiver, sender }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        // Internal events (fetch results) first so they are not starved
        // by input polling.
        if let Ok(event) = self.receiver.try_recv() {
            return Some(event);
        }

        // Poll for terminal input without blocking the runtime.
        let has_input = tokio::task::spawn_blocking(|| {
            crossterm::event::poll(Duration::from_millis(50)).unwrap_or(false)
        })
        .await
        .ok()?;

        if has_input {
            if let Ok(Ok(crossterm_event)) =
                tokio::task::spawn_blocking(crossterm::event::read).await
            {
                return Some(self.convert_crossterm_event(crossterm_event));
            }
        }

        if let Ok(event) = self.receiver.try_recv() {
            return Some(event);
        }

        Some(Event::Tick)
    }

    /// Convert crossterm events to application events
    fn convert_crossterm_event(&self, event: CrosstermEvent) -> Event {
        match event {
            CrosstermEvent::Key(key_event) => Event::Key(key_event),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }

    /// Get a clone of the sender
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
