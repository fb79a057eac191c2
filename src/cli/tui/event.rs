//! Event handling for the TUI

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Tick event for periodic redraws
    Tick,
}

/// Reads terminal events on a background thread until dropped
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    running: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let still_running = Arc::clone(&running);

        thread::spawn(move || {
            while still_running.load(Ordering::Relaxed) {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Only forward presses, not releases or repeats
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, running }
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        // Stops the reader before the terminal is handed back to the shell
        self.running.store(false, Ordering::Relaxed);
    }
}
