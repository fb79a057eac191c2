//! Menu listing command

use anyhow::Result;

use super::output::Output;
use crate::domain::{Category, MenuCatalog};

/// Show every menu item grouped by category
pub fn run(output: &Output) -> Result<()> {
    let catalog = MenuCatalog::standard();
    output.verbose_ctx("menu", &format!("Catalog has {} items", catalog.len()));

    if output.is_json() {
        output.data(&catalog.items());
        return Ok(());
    }

    for (index, category) in Category::ALL.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}:", category.heading());

        for item in catalog.by_category(*category) {
            let ingredients = if item.ingredients().is_empty() {
                String::new()
            } else {
                format!("  ({})", item.ingredients().join(", "))
            };
            println!("  {:<24} {}{}", item.id(), item, ingredients);
        }
    }

    Ok(())
}
