//! # Storage Layer
//!
//! Persistence for the menu ordering system.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Orders | Plain text blocks, append-only | `orders.txt` (configurable) |
//! | Config | TOML | `menu-order.toml` or the user config dir |
//!
//! ## Order Log Grammar
//!
//! ```text
//! Order for: <customer>
//! <item name> - $<price>
//! Total: $<total>
//! ```
//!
//! Prices are always written with two decimals. Blocks follow each other
//! with no delimiter; the next header starts the next order.
//!
//! ## Concurrency Safety
//!
//! [`OrderLog`] uses file locking (`fs2`): exclusive for appends, shared for
//! scans.

mod config;
mod log;

pub use config::{Config, ConfigError, WatchConfig, LOCAL_CONFIG_FILE};
pub use log::{LogError, OrderLog, DEFAULT_LOG_FILE};
