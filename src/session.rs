//! Ordering session
//!
//! The contract a user interface drives for one customer: start an order,
//! add and remove items, read the summary and total, then finalize. The UI
//! owns presentation only.

use rust_decimal::Decimal;

use crate::domain::{ItemId, MenuCatalog, MenuItem, Order, OrderError};
use crate::storage::{LogError, OrderLog};

/// One customer's ordering session
#[derive(Debug)]
pub struct OrderSession {
    catalog: &'static MenuCatalog,
    order: Order,
    log: OrderLog,
    ended: bool,
}

impl OrderSession {
    /// Starts a session for `customer` that saves to `log`
    pub fn new(customer: &str, log: OrderLog) -> Self {
        Self {
            catalog: MenuCatalog::standard(),
            order: Order::new(customer),
            log,
            ended: false,
        }
    }

    pub fn catalog(&self) -> &'static MenuCatalog {
        self.catalog
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn log(&self) -> &OrderLog {
        &self.log
    }

    /// True once [`finalize`](Self::finalize) has been attempted
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Adds `quantity` of the item with the given id
    pub fn add_item(&mut self, id: &ItemId, quantity: u32) -> Result<&'static MenuItem, OrderError> {
        if self.ended {
            return Err(OrderError::SessionEnded);
        }

        let catalog: &'static MenuCatalog = self.catalog;
        let item = catalog
            .get(id)
            .ok_or_else(|| OrderError::UnknownItem(id.to_string()))?;
        self.order.add_item(item, quantity)?;
        Ok(item)
    }

    /// Removes the last added item. Returns `None` if the order is empty.
    pub fn remove_last(&mut self) -> Result<Option<&'static MenuItem>, OrderError> {
        if self.ended {
            return Err(OrderError::SessionEnded);
        }
        Ok(self.order.remove_last_item())
    }

    /// Current summary text, identical to the block written to the log
    pub fn summary_text(&self) -> String {
        self.order.to_string()
    }

    pub fn total(&self) -> Decimal {
        self.order.total_price()
    }

    /// Appends the order to the log and ends the session.
    ///
    /// The session ends even if the write fails. The order is not retried
    /// and stays readable through [`order`](Self::order).
    pub fn finalize(&mut self) -> Result<(), LogError> {
        self.ended = true;
        self.order.append_to(&self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn id(s: &str) -> ItemId {
        ItemId::new(s)
    }

    #[test]
    fn builds_and_finalizes_an_order() {
        let dir = TempDir::new().unwrap();
        let mut session = OrderSession::new("Alice", OrderLog::new(dir.path().join("orders.txt")));

        session.add_item(&id("water"), 2).unwrap();
        session.add_item(&id("cheese-pizza"), 1).unwrap();
        assert_eq!(session.total(), Decimal::new(1399, 2));

        session.finalize().unwrap();

        let content = fs::read_to_string(session.log().path()).unwrap();
        assert_eq!(content, format!("{}\n", session.summary_text()));
    }

    #[test]
    fn unknown_item_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = OrderSession::new("Alice", OrderLog::new(dir.path().join("orders.txt")));

        let err = session.add_item(&id("lasagna"), 1).unwrap_err();
        assert_eq!(err, OrderError::UnknownItem("lasagna".to_string()));
        assert!(session.order().is_empty());
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = OrderSession::new("Alice", OrderLog::new(dir.path().join("orders.txt")));

        let err = session.add_item(&id("tea"), 4_000_000_000).unwrap_err();
        assert!(matches!(err, OrderError::QuantityTooLarge { .. }));
        assert!(session.order().is_empty());
    }

    #[test]
    fn remove_last_on_empty_session() {
        let dir = TempDir::new().unwrap();
        let mut session = OrderSession::new("Alice", OrderLog::new(dir.path().join("orders.txt")));

        assert_eq!(session.remove_last().unwrap(), None);
    }

    #[test]
    fn failed_finalize_keeps_order_and_ends_session() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let mut session = OrderSession::new("Alice", OrderLog::new(dir.path()));
        session.add_item(&id("tea"), 1).unwrap();

        assert!(session.finalize().is_err());
        assert!(session.is_ended());
        assert_eq!(session.order().len(), 1);
        assert_eq!(session.add_item(&id("tea"), 1).unwrap_err(), OrderError::SessionEnded);
        assert_eq!(session.remove_last().unwrap_err(), OrderError::SessionEnded);
    }
}
