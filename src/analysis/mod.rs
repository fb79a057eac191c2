//! Order log analysis
//!
//! [`AnalysisEngine`] rebuilds a product tally from the order log on demand.
//! [`LogWatcher`] re-runs it whenever the log file changes, until stopped.

mod engine;
mod watch;

pub use engine::AnalysisEngine;
pub use watch::{LogWatcher, StopHandle, WatchError, WatchExit, WatchNotice, WatchTask};
