//! Product tally
//!
//! Counts how often each product appears in order log text and ranks the
//! products by popularity.

use std::collections::BTreeMap;

use serde::Serialize;

use super::order::HEADER_PREFIX;

/// Substring that marks an item line in the order log
pub const ITEM_MARKER: &str = " - $";

/// Separator between the product name and its price
const NAME_SEPARATOR: &str = " - ";

/// Report heading for a non-empty tally
pub const REPORT_HEADING: &str = "Products ranked from most liked to least liked:";

/// Report body for an empty tally
pub const EMPTY_REPORT: &str = "No products found.";

/// A product with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedProduct {
    pub name: String,
    pub count: usize,
}

/// Occurrence count per product name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductTally {
    counts: BTreeMap<String, usize>,
}

impl ProductTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the product name from a log line, if it is an item line
    pub fn product_name(line: &str) -> Option<&str> {
        if !line.contains(ITEM_MARKER) || line.starts_with(HEADER_PREFIX) {
            return None;
        }
        line.split_once(NAME_SEPARATOR).map(|(name, _)| name)
    }

    /// Counts the line if it names a product. Returns true if it did.
    pub fn record_line(&mut self, line: &str) -> bool {
        match Self::product_name(line) {
            Some(name) => {
                self.record(name);
                true
            }
            None => false,
        }
    }

    /// Adds one occurrence of a product
    pub fn record(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Counts every item line in a block of log text
    pub fn from_text(text: &str) -> Self {
        let mut tally = Self::new();
        for line in text.lines() {
            tally.record_line(line);
        }
        tally
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct products
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of item lines counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Products sorted by count descending, then by name ascending
    pub fn rank(&self) -> Vec<RankedProduct> {
        let mut ranked: Vec<RankedProduct> = self
            .counts
            .iter()
            .map(|(name, count)| RankedProduct {
                name: name.clone(),
                count: *count,
            })
            .collect();

        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked
    }

    /// Renders the ranking as report text
    pub fn report(&self) -> String {
        if self.is_empty() {
            return EMPTY_REPORT.to_string();
        }

        let mut lines = vec![REPORT_HEADING.to_string()];
        for product in self.rank() {
            lines.push(format!("{} (Ordered {} times)", product.name, product.count));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lines_yield_names() {
        assert_eq!(ProductTally::product_name("Tea - $4.00"), Some("Tea"));
        assert_eq!(ProductTally::product_name("BBQ Pizza - $9.99"), Some("BBQ Pizza"));
        // unformatted prices written by older logs
        assert_eq!(ProductTally::product_name("Water - $3.5"), Some("Water"));
    }

    #[test]
    fn header_and_total_lines_are_skipped() {
        assert_eq!(ProductTally::product_name("Order for: Alice"), None);
        assert_eq!(ProductTally::product_name("Total: $12.99"), None);
        assert_eq!(ProductTally::product_name("Order for: Eve Tea - $4.00"), None);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        assert_eq!(ProductTally::product_name(""), None);
        assert_eq!(ProductTally::product_name("Tea $4.00"), None);
        assert_eq!(ProductTally::product_name("Tea - 4.00"), None);
    }

    #[test]
    fn from_text_counts_occurrences() {
        let text = "Order for: Alice\nWater - $3.50\nWater - $3.50\nCheese Pizza - $6.99\nTotal: $13.99\n";
        let tally = ProductTally::from_text(text);

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.count("Water"), 2);
        assert_eq!(tally.count("Cheese Pizza"), 1);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn rank_is_descending_with_name_tiebreak() {
        let mut tally = ProductTally::new();
        for name in ["Tea", "Water", "Tea", "BBQ Pizza", "Chicken Bowl", "Tea", "Water"] {
            tally.record(name);
        }

        let ranked: Vec<_> = tally
            .rank()
            .into_iter()
            .map(|p| (p.name, p.count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Tea".to_string(), 3),
                ("Water".to_string(), 2),
                ("BBQ Pizza".to_string(), 1),
                ("Chicken Bowl".to_string(), 1),
            ]
        );
        assert_eq!(tally.rank(), tally.rank());
    }

    #[test]
    fn report_lists_ranked_products() {
        let mut tally = ProductTally::new();
        tally.record("Tea");
        tally.record("Tea");
        tally.record("Water");

        assert_eq!(
            tally.report(),
            "Products ranked from most liked to least liked:\nTea (Ordered 2 times)\nWater (Ordered 1 times)"
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(ProductTally::new().report(), "No products found.");
    }

    #[test]
    fn clear_resets_counts() {
        let mut tally = ProductTally::from_text("Tea - $4.00\n");
        tally.clear();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }
}
