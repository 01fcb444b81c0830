//! Menu item model.

use serde::{Deserialize, Serialize};

/// A dish or drink on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MenuItem {
    pub id: String,

    pub name: String,

    pub description: String,

    /// Menu section, e.g. "Mains" or "Desserts"
    pub category: String,

    /// Price in cents
    pub price_cents: u32,

    /// Kitchen time for one portion, in minutes
    pub prep_time_minutes: u32,

    /// Whether the item can currently be ordered
    pub available: bool,
}

impl MenuItem {
    /// Create a new, available menu item.
    pub fn new(
        id: String,
        name: String,
        description: String,
        category: String,
        price_cents: u32,
        prep_time_minutes: u32,
    ) -> Self {
        Self {
            id,
            name,
            description,
            category,
            price_cents,
            prep_time_minutes,
            available: true,
        }
    }

    /// Price formatted as a decimal amount, e.g. `"12.50"`.
    pub fn display_price(&self) -> String {
        format!("{}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }

    /// Case-insensitive category match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }
}
