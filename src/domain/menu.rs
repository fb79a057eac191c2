//! Menu catalog
//!
//! The menu is fixed at build time. Items are identified by a stable
//! kebab-case [`ItemId`] so that key bindings and CLI arguments never depend
//! on display names.

use std::fmt;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Serialize;

/// Stable identifier of a menu item (e.g. `cheese-pizza`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Menu section an item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pizza,
    Sandwich,
    Bowl,
    Drink,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 4] = [
        Category::Pizza,
        Category::Sandwich,
        Category::Bowl,
        Category::Drink,
    ];

    /// Plural heading used when listing the menu
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Pizza => "Pizzas",
            Category::Sandwich => "Sandwiches",
            Category::Bowl => "Bowls",
            Category::Drink => "Drinks",
        }
    }
}

/// A single orderable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    id: ItemId,
    name: String,
    price: Decimal,
    ingredients: Vec<String>,
    category: Category,
}

impl MenuItem {
    /// Creates a menu item. Price is given in cents.
    pub fn new(
        id: &str,
        name: &str,
        price_cents: i64,
        ingredients: &[&str],
        category: Category,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.to_string(),
            price: Decimal::new(price_cents, 2),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            category,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Renders the item line used both on screen and in the order log
impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${:.2}", self.name, self.price)
    }
}

/// The fixed set of items on offer
#[derive(Debug)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    /// Returns the shared catalog, built once on first use
    pub fn standard() -> &'static MenuCatalog {
        static CATALOG: OnceLock<MenuCatalog> = OnceLock::new();
        CATALOG.get_or_init(MenuCatalog::build)
    }

    fn build() -> Self {
        use Category::*;

        let items = vec![
            MenuItem::new(
                "cheese-pizza",
                "Cheese Pizza",
                699,
                &["Cheese", "Tomato Sauce", "Dough"],
                Pizza,
            ),
            MenuItem::new(
                "pepe-pizza",
                "Pepe Pizza",
                999,
                &["Pepperoni", "Cheese", "Tomato Sauce"],
                Pizza,
            ),
            MenuItem::new(
                "bbq-pizza",
                "BBQ Pizza",
                999,
                &["BBQ Sauce", "Chicken", "Cheese"],
                Pizza,
            ),
            MenuItem::new(
                "basil-chicken-sandwich",
                "Basil Chicken Sandwich",
                799,
                &["Chicken", "Basil", "Lettuce", "Bread"],
                Sandwich,
            ),
            MenuItem::new(
                "bahnmi-sandwich",
                "Bahnmi Sandwich",
                899,
                &["Pork", "Pickled Veggies", "Bread", "Cilantro"],
                Sandwich,
            ),
            MenuItem::new(
                "pesto-sandwich",
                "Pesto Sandwich",
                699,
                &["Pesto", "Tomato", "Cheese", "Bread"],
                Sandwich,
            ),
            MenuItem::new(
                "chicken-bowl",
                "Chicken Bowl",
                1199,
                &["Chicken", "Rice", "Veggies"],
                Bowl,
            ),
            MenuItem::new(
                "tuna-bowl",
                "Tuna Bowl",
                1299,
                &["Tuna", "Rice", "Sauce"],
                Bowl,
            ),
            MenuItem::new("water", "Water", 350, &[], Drink),
            MenuItem::new("powerade", "Powerade", 350, &[], Drink),
            MenuItem::new("tea", "Tea", 400, &[], Drink),
        ];

        Self { items }
    }

    /// All items in menu order
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Items of a single category, in menu order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Looks up an item by its stable id
    pub fn get(&self, id: &ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Looks up an item by id or by case-insensitive display name
    pub fn find(&self, query: &str) -> Option<&MenuItem> {
        let query = query.trim();
        self.items
            .iter()
            .find(|item| item.id.as_str() == query)
            .or_else(|| {
                self.items
                    .iter()
                    .find(|item| item.name.eq_ignore_ascii_case(query))
            })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
