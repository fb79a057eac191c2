//! Domain models for the menu ordering system
//!
//! Contains the core business logic. The only I/O is [`Order::append_to`],
//! which hands the rendered block to an [`OrderLog`](crate::storage::OrderLog).

mod menu;
mod order;
mod tally;

pub use menu::{Category, ItemId, MenuCatalog, MenuItem};
pub use order::{Order, OrderError, HEADER_PREFIX, MAX_QUANTITY, TOTAL_PREFIX, UNKNOWN_CUSTOMER};
pub use tally::{ProductTally, RankedProduct, EMPTY_REPORT, ITEM_MARKER, REPORT_HEADING};
