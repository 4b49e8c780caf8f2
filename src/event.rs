use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Redraw,
}

/// Polls crossterm on a background thread. Only key presses are forwarded;
/// repeats and releases never drive the reveal state.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                if !event::poll(poll_interval).unwrap_or(false) {
                    continue;
                }
                let app_event = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(_, _)) => AppEvent::Redraw,
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
