//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `menu` | List the menu with item ids and prices |
//! | `order` | Build an order interactively in the terminal |
//! | `place` | Build and save an order from arguments |
//! | `analyze` | Rank products by how often they were ordered |
//! | `analyze --watch` | Re-rank on every change to the order log |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod analyze;
mod app;
mod menu_cmd;
mod output;
mod place;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
