//! Order domain model
//!
//! An order is a customer's cart: an ordered sequence of line items with no
//! deduplication. The rendered block is the canonical text of the order and
//! is shared by the on-screen summary and the order log.

use std::fmt;
use std::iter;

use rust_decimal::Decimal;
use thiserror::Error;

use super::menu::{ItemId, MenuItem};
use crate::storage::{LogError, OrderLog};

/// Prefix of the first line of every order block
pub const HEADER_PREFIX: &str = "Order for:";

/// Prefix of the last line of every order block
pub const TOTAL_PREFIX: &str = "Total: $";

/// Customer name used when none was entered
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Largest quantity accepted by a single [`Order::add_item`] call
pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Quantity must be at most {max}")]
    QuantityTooLarge { max: u32 },

    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    #[error("Order has already been finalized")]
    SessionEnded,
}

/// A customer's order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    customer_name: String,
    items: Vec<&'static MenuItem>,
}

impl Order {
    /// Creates an empty order for the given customer
    pub fn new(customer_name: &str) -> Self {
        Self {
            customer_name: normalize_customer(customer_name),
            items: Vec::new(),
        }
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Appends `quantity` line items referring to `item`
    pub fn add_item(&mut self, item: &'static MenuItem, quantity: u32) -> Result<(), OrderError> {
        if quantity == 0 {
            return Err(OrderError::ZeroQuantity);
        }
        if quantity > MAX_QUANTITY {
            return Err(OrderError::QuantityTooLarge { max: MAX_QUANTITY });
        }
        self.items.extend(iter::repeat(item).take(quantity as usize));
        Ok(())
    }

    /// Removes the most recently added line item, if any
    pub fn remove_last_item(&mut self) -> Option<&'static MenuItem> {
        self.items.pop()
    }

    /// Line items in insertion order
    pub fn line_items(&self) -> &[&'static MenuItem] {
        &self.items
    }

    /// Number of line items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many times the given item appears in the order
    pub fn quantity_of(&self, id: &ItemId) -> usize {
        self.items.iter().filter(|item| item.id() == id).count()
    }

    /// Exact sum of all line item prices
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|item| item.price()).sum()
    }

    /// Renders the order as a log block, terminated by a newline
    pub fn to_log_block(&self) -> String {
        format!("{}\n", self)
    }

    /// Appends this order's block to `log`. The order itself is unchanged.
    pub fn append_to(&self, log: &OrderLog) -> Result<(), LogError> {
        log.append(self)
    }
}

/// Renders the canonical order text without a trailing newline
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", HEADER_PREFIX, self.customer_name)?;
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        write!(f, "{}{:.2}", TOTAL_PREFIX, self.total_price())
    }
}

/// Trims the name and folds line breaks, which would otherwise inject lines
/// into the log
fn normalize_customer(name: &str) -> String {
    let folded: String = name
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let trimmed = folded.trim();

    if trimmed.is_empty() {
        UNKNOWN_CUSTOMER.to_string()
    } else {
        trimmed.to_string()
    }
}
