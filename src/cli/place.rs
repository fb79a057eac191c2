//! Non-interactive order placement

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::domain::{ItemId, MenuCatalog};
use crate::session::OrderSession;
use crate::storage::Config;

/// An item argument of the form `ID[:QTY]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub id: ItemId,
    pub quantity: u32,
}

/// Parses `ID[:QTY]`, resolving the id or name against the catalog
pub fn parse_item_spec(catalog: &MenuCatalog, spec: &str) -> Result<ItemSpec> {
    let (name, quantity) = match spec.rsplit_once(':') {
        Some((name, qty)) => {
            let quantity: u32 = qty
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", spec))?;
            (name, quantity)
        }
        None => (spec, 1),
    };

    let item = match catalog.find(name) {
        Some(item) => item,
        None => bail!("Unknown menu item '{}'. Run 'menu-order menu' to list items.", name.trim()),
    };

    Ok(ItemSpec {
        id: item.id().clone(),
        quantity,
    })
}

/// Builds an order from item specs and appends it to the log
pub fn run(output: &Output, config: &Config, customer: &str, specs: &[String]) -> Result<()> {
    let mut session = OrderSession::new(customer, config.order_log());

    for spec in specs {
        let parsed = parse_item_spec(session.catalog(), spec)?;
        let item = session
            .add_item(&parsed.id, parsed.quantity)
            .with_context(|| format!("Cannot add '{}'", spec))?;
        output.verbose_ctx("place", &format!("Added {} x {}", parsed.quantity, item.name()));
    }

    let saved = session.finalize();
    output.verbose_ctx("place", &format!("Finalized order to {}", session.log().path().display()));

    if output.is_json() {
        let order = session.order();
        let items: Vec<_> = order.line_items().iter().map(|item| item.name()).collect();
        let mut data = serde_json::json!({
            "saved": saved.is_ok(),
            "customer": order.customer_name(),
            "items": items,
            "total": order.total_price(),
            "log": session.log().path().display().to_string(),
        });
        if let Err(e) = &saved {
            data["error"] = serde_json::json!(e.to_string());
        }
        output.data(&data);
    } else {
        println!("{}", session.summary_text());
        println!();
        if saved.is_ok() {
            output.success("Order saved!");
        }
        println!("Thank you for your order!");
    }

    saved.context("Error saving order to file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_without_quantity_defaults_to_one() {
        let spec = parse_item_spec(MenuCatalog::standard(), "tea").unwrap();
        assert_eq!(spec.id, ItemId::new("tea"));
        assert_eq!(spec.quantity, 1);
    }

    #[test]
    fn spec_with_quantity() {
        let spec = parse_item_spec(MenuCatalog::standard(), "cheese-pizza:3").unwrap();
        assert_eq!(spec.id, ItemId::new("cheese-pizza"));
        assert_eq!(spec.quantity, 3);
    }

    #[test]
    fn spec_by_display_name() {
        let spec = parse_item_spec(MenuCatalog::standard(), "Chicken Bowl:2").unwrap();
        assert_eq!(spec.id, ItemId::new("chicken-bowl"));
        assert_eq!(spec.quantity, 2);
    }

    #[test]
    fn invalid_specs_are_errors() {
        let catalog = MenuCatalog::standard();
        assert!(parse_item_spec(catalog, "tea:").is_err());
        assert!(parse_item_spec(catalog, "tea:-1").is_err());
        assert!(parse_item_spec(catalog, "tea:two").is_err());
        assert!(parse_item_spec(catalog, "lasagna").is_err());
    }

    #[test]
    fn zero_quantity_parses_but_is_rejected_by_the_order() {
        let spec = parse_item_spec(MenuCatalog::standard(), "tea:0").unwrap();
        assert_eq!(spec.quantity, 0);
    }
}
