//! Menu ordering and order analysis
//!
//! Customers build orders from a fixed menu and finalize them to an
//! append-only text log. The analysis side reads that log back, counts how
//! often each product was ordered and can keep the ranking current while
//! the log changes.

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod session;
pub mod storage;

pub use analysis::AnalysisEngine;
pub use domain::{ItemId, MenuCatalog, MenuItem, Order, OrderError, ProductTally};
pub use session::OrderSession;
pub use storage::{Config, OrderLog};
