use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

use crate::event::AppEvent;

/// One event drawn from either source.
#[derive(Debug)]
pub enum IoEvent {
    App(AppEvent),
    Terminal(Event),
    /// The terminal event stream ended (stdin closed).
    Closed,
}

/// Unified event source: generator/app events on one channel, terminal
/// events on another.
///
/// `Io` keeps a sender to its own app channel, so `next_event` blocks
/// rather than reporting closure when no producer is currently attached.
pub struct Io {
    app_tx: mpsc::UnboundedSender<AppEvent>,
    app_rx: mpsc::UnboundedReceiver<AppEvent>,
    term_rx: mpsc::UnboundedReceiver<Event>,
}

impl Io {
    pub fn new(term_rx: mpsc::UnboundedReceiver<Event>) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        Self {
            app_tx,
            app_rx,
            term_rx,
        }
    }

    /// A sender for app events, cloned into the generator reader task and
    /// the settings watcher.
    pub fn app_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.app_tx.clone()
    }

    /// Wait for the next event from either source.
    pub async fn next_event(&mut self) -> IoEvent {
        tokio::select! {
            Some(event) = self.app_rx.recv() => IoEvent::App(event),
            event = self.term_rx.recv() => match event {
                Some(event) => IoEvent::Terminal(event),
                None => IoEvent::Closed,
            },
        }
    }

    /// Receive the next app event, or `None` once `timeout` elapses.
    ///
    /// Used at the capture-cycle boundary to absorb a finished generator's
    /// trailing events (while still observing settings changes that arrived
    /// mid-stream) so they cannot bleed into the next cycle.
    pub async fn next_app_event_timeout(&mut self, timeout: Duration) -> Option<AppEvent> {
        tokio::time::timeout(timeout, self.app_rx.recv())
            .await
            .ok()
            .flatten()
    }
}
