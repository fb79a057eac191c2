//! Analysis engine
//!
//! Re-parses the order log into a fresh [`ProductTally`] on every pass.

use crate::domain::{ProductTally, RankedProduct};
use crate::storage::{LogError, OrderLog};

/// Tallies product popularity from an order log
#[derive(Debug)]
pub struct AnalysisEngine {
    log: OrderLog,
    tally: ProductTally,
}

impl AnalysisEngine {
    pub fn new(log: OrderLog) -> Self {
        Self {
            log,
            tally: ProductTally::new(),
        }
    }

    pub fn log(&self) -> &OrderLog {
        &self.log
    }

    /// Rebuilds the tally from the log.
    ///
    /// The previous tally is discarded first, so on error the tally is empty.
    /// Lines that are not item lines are ignored.
    pub fn analyze(&mut self) -> Result<&ProductTally, LogError> {
        self.tally.clear();

        let mut fresh = ProductTally::new();
        self.log.for_each_line(|line| {
            fresh.record_line(line);
        })?;

        self.tally = fresh;
        Ok(&self.tally)
    }

    /// The tally from the last pass
    pub fn tally(&self) -> &ProductTally {
        &self.tally
    }

    /// Products by popularity, most ordered first
    pub fn rank(&self) -> Vec<RankedProduct> {
        self.tally.rank()
    }

    /// Rendered report for the last pass
    pub fn report(&self) -> String {
        self.tally.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, MenuCatalog, Order};
    use std::fs;
    use tempfile::TempDir;

    fn order(customer: &str, items: &[(&str, u32)]) -> Order {
        let catalog = MenuCatalog::standard();
        let mut order = Order::new(customer);
        for (id, qty) in items {
            order
                .add_item(catalog.get(&ItemId::new(*id)).unwrap(), *qty)
                .unwrap();
        }
        order
    }

    fn engine_in(dir: &TempDir) -> AnalysisEngine {
        AnalysisEngine::new(OrderLog::new(dir.path().join("orders.txt")))
    }

    #[test]
    fn single_block_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine
            .log()
            .append(&order("Alice", &[("water", 2), ("cheese-pizza", 1)]))
            .unwrap();

        let tally = engine.analyze().unwrap();
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.count("Water"), 2);
        assert_eq!(tally.count("Cheese Pizza"), 1);
    }

    #[test]
    fn tea_ranks_before_bbq_pizza() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        let log = engine.log().clone();
        log.append(&order("Alice", &[("tea", 1), ("bbq-pizza", 1)])).unwrap();
        log.append(&order("Bob", &[("tea", 1)])).unwrap();
        log.append(&order("Carol", &[("water", 1)])).unwrap();

        engine.analyze().unwrap();
        let ranked = engine.rank();
        let tea = ranked.iter().position(|p| p.name == "Tea").unwrap();
        let bbq = ranked.iter().position(|p| p.name == "BBQ Pizza").unwrap();

        assert!(tea < bbq);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn foreign_encoded_customer_does_not_stop_analysis() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        fs::write(
            engine.log().path(),
            b"Order for: Jos\xe9\nTea - $4.00\nTotal: $4.00\n",
        )
        .unwrap();
        engine.log().append(&order("Bob", &[("water", 1)])).unwrap();

        let tally = engine.analyze().unwrap();
        assert_eq!(tally.count("Tea"), 1);
        assert_eq!(tally.count("Water"), 1);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn duplicate_appends_are_counted_independently() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        let same = order("Alice", &[("powerade", 1)]);
        engine.log().append(&same).unwrap();
        engine.log().append(&same).unwrap();

        assert_eq!(engine.analyze().unwrap().count("Powerade"), 2);
    }

    #[test]
    fn analyze_rebuilds_from_scratch() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine.log().append(&order("Alice", &[("tea", 1)])).unwrap();

        engine.analyze().unwrap();
        engine.analyze().unwrap();

        assert_eq!(engine.tally().count("Tea"), 1);
    }

    #[test]
    fn missing_log_leaves_tally_empty() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine.log().append(&order("Alice", &[("tea", 1)])).unwrap();
        engine.analyze().unwrap();

        fs::remove_file(engine.log().path()).unwrap();

        let err = engine.analyze().unwrap_err();
        assert!(err.is_not_found());
        assert!(engine.tally().is_empty());
        assert_eq!(engine.report(), "No products found.");
    }

    #[test]
    fn parses_logs_from_older_writers() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        fs::write(
            engine.log().path(),
            "Order for: Dan\nWater - $3.5\nTea - $4.0\nTotal: $7.5\nnot an item\n",
        )
        .unwrap();

        let tally = engine.analyze().unwrap();
        assert_eq!(tally.count("Water"), 1);
        assert_eq!(tally.count("Tea"), 1);
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn customer_names_never_count_as_products() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_in(&dir);
        engine
            .log()
            .append(&order("Mallory - $1\nFake - $2", &[("tea", 1)]))
            .unwrap();

        let tally = engine.analyze().unwrap();
        assert_eq!(tally.len(), 1);
        assert_eq!(tally.count("Tea"), 1);
    }
}
