//! Watch loop for the order log
//!
//! Watches the directory containing the log and re-runs the analysis each
//! time the log file changes. The loop is cancellable through a
//! [`StopHandle`] and can run on the calling thread ([`LogWatcher::run`]) or
//! on a background thread ([`LogWatcher::spawn`]).

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use thiserror::Error;

use super::engine::AnalysisEngine;
use crate::storage::LogError;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to watch {path}: {source}")]
    Setup {
        path: PathBuf,
        source: notify::Error,
    },

    #[error("Watch error: {0}")]
    Notify(String),

    #[error("Watch event channel disconnected")]
    Disconnected,

    #[error("Watch thread panicked")]
    Panicked,
}

/// Why a watch loop ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchExit {
    Stopped,
}

/// Progress reported by the watch loop
#[derive(Debug)]
pub enum WatchNotice<'a> {
    /// The watcher is registered and waiting for changes
    Ready { directory: &'a Path },

    /// The log changed and was analyzed again
    Reanalyzed {
        changes: usize,
        engine: &'a AnalysisEngine,
        error: Option<&'a LogError>,
    },
}

enum Signal {
    Changed(DebounceEventResult),
    Stop,
}

/// Requests that a running watch loop stop
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<Signal>,
}

impl StopHandle {
    /// Signals the loop to stop. Has no effect if it already ended.
    pub fn stop(&self) {
        let _ = self.tx.send(Signal::Stop);
    }
}

/// Debounced watcher over the order log
pub struct LogWatcher {
    debounce: Duration,
    tx: Sender<Signal>,
    rx: Receiver<Signal>,
}

impl LogWatcher {
    pub fn new(debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { debounce, tx, rx }
    }

    /// Returns a handle that stops this watcher's loop
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Runs the watch loop on the calling thread until stopped or failed
    pub fn run<F>(self, engine: &mut AnalysisEngine, mut on_notice: F) -> Result<WatchExit, WatchError>
    where
        F: FnMut(WatchNotice<'_>),
    {
        let log = engine.log().clone();
        let directory = log.directory();
        let file_name = log.file_name().map(|name| name.to_os_string());

        let event_tx = self.tx.clone();
        let mut debouncer = new_debouncer(self.debounce, move |result: DebounceEventResult| {
            let _ = event_tx.send(Signal::Changed(result));
        })
        .map_err(|source| WatchError::Setup {
            path: directory.clone(),
            source,
        })?;

        debouncer
            .watcher()
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Setup {
                path: directory.clone(),
                source,
            })?;

        // Only stop handles and the debouncer keep the channel open from here
        let Self { rx, tx, .. } = self;
        drop(tx);

        on_notice(WatchNotice::Ready {
            directory: &directory,
        });

        loop {
            match rx.recv() {
                Ok(Signal::Changed(Ok(events))) => {
                    let changes = count_matching(
                        events.iter().map(|event| event.path.as_path()),
                        file_name.as_deref(),
                    );
                    if changes == 0 {
                        continue;
                    }

                    let error = engine.analyze().err();
                    on_notice(WatchNotice::Reanalyzed {
                        changes,
                        engine: &*engine,
                        error: error.as_ref(),
                    });
                }
                Ok(Signal::Changed(Err(error))) => {
                    return Err(WatchError::Notify(format!("{:?}", error)));
                }
                Ok(Signal::Stop) => return Ok(WatchExit::Stopped),
                Err(_) => return Err(WatchError::Disconnected),
            }
        }
    }

    /// Runs the watch loop on a background thread
    pub fn spawn<F>(self, mut engine: AnalysisEngine, on_notice: F) -> WatchTask
    where
        F: FnMut(WatchNotice<'_>) + Send + 'static,
    {
        let stop = self.stop_handle();
        let handle = thread::spawn(move || {
            let result = self.run(&mut engine, on_notice);
            (engine, result)
        });

        WatchTask { stop, handle }
    }
}

/// A watch loop running on a background thread
pub struct WatchTask {
    stop: StopHandle,
    handle: JoinHandle<(AnalysisEngine, Result<WatchExit, WatchError>)>,
}

impl WatchTask {
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// True once the loop has ended
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the loop and waits for it to end
    pub fn stop(self) -> Result<WatchExit, WatchError> {
        self.stop.stop();
        self.join()
    }

    /// Waits for the loop to end on its own
    pub fn join(self) -> Result<WatchExit, WatchError> {
        self.handle
            .join()
            .map_err(|_| WatchError::Panicked)
            .and_then(|(_engine, result)| result)
    }
}

/// Counts changed paths that name the log file itself
fn count_matching<'a>(
    paths: impl Iterator<Item = &'a Path>,
    file_name: Option<&std::ffi::OsStr>,
) -> usize {
    let Some(file_name) = file_name else {
        return 0;
    };
    paths.filter(|path| path.file_name() == Some(file_name)).count()
}
