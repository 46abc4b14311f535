//! Menu catalog.
//!
//! The catalog is the "known menu" every other component works against: the
//! extractor fuzzy-matches dish names and aliases from it, the generative
//! fallback embeds it as structured prompt context, and reply payloads carry
//! `MenuItem` records picked from it.

mod builtin;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu section a dish is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starters,
    Curries,
    Tacos,
    Burgers,
    Pizza,
    Pasta,
    Desserts,
    Beverages,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Starters => "starters",
            MenuCategory::Curries => "curries",
            MenuCategory::Tacos => "tacos",
            MenuCategory::Burgers => "burgers",
            MenuCategory::Pizza => "pizza",
            MenuCategory::Pasta => "pasta",
            MenuCategory::Desserts => "desserts",
            MenuCategory::Beverages => "beverages",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heat level advertised for a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    #[default]
    None,
    Mild,
    Medium,
    Spicy,
}

/// Suggested wine for a dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinePairing {
    pub varietal: String,
    pub origin: String,
}

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub cuisine: String,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub dietary_info: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Alternate spellings and short names customers use for the dish
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wine_pairings: Vec<WinePairing>,
    #[serde(default)]
    pub popular: bool,
}

/// Ordered collection of menu items.
///
/// Order is significant: `popular` and the fallback's `menuItems` extraction
/// both return items in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The house menu shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(builtin::items())
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_category(&self, category: MenuCategory) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// First `n` items flagged as popular.
    pub fn popular(&self, n: usize) -> Vec<MenuItem> {
        self.items
            .iter()
            .filter(|item| item.popular)
            .take(n)
            .cloned()
            .collect()
    }

    /// Case-insensitive lookup by canonical name.
    pub fn find_by_name(&self, name: &str) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }
}
