//! Menu service layer.

use super::IdGenerator;
use crate::domain::validation::{
    category_error, description_error, parse_price_cents, price_error, required_error,
};
use crate::domain::FormValidator;
use crate::error::{DeskError, DeskResult};
use crate::models::MenuItem;
use crate::repositories::MenuStore;
use async_trait::async_trait;
use std::sync::Arc;

const MAX_NAME_LENGTH: usize = 80;
const MAX_PREP_TIME_MINUTES: u32 = 240;

/// Raw menu item form input.
#[derive(Debug, Clone, Default)]
pub struct MenuItemRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Decimal amount as typed, e.g. "12.50"
    pub price: String,
    pub prep_time_minutes: u32,
    pub available: Option<bool>,
}

/// Menu service trait for business operations.
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn create_item(&self, request: MenuItemRequest) -> DeskResult<MenuItem>;

    /// Replace every editable field of an existing item.
    async fn update_item(&self, id: &str, request: MenuItemRequest) -> DeskResult<MenuItem>;

    async fn set_availability(&self, id: &str, available: bool) -> DeskResult<MenuItem>;

    /// Items sorted by category then name, optionally limited to one category.
    async fn list_items(&self, category: Option<String>) -> DeskResult<Vec<MenuItem>>;

    async fn delete_item(&self, id: &str) -> DeskResult<()>;
}

/// Default implementation of MenuService.
pub struct MenuServiceImpl {
    menu: Arc<dyn MenuStore>,
    ids: IdGenerator,
}

/// Validation helper functions.
impl MenuServiceImpl {
    fn validate(request: &MenuItemRequest) -> DeskResult<u32> {
        let mut form = FormValidator::new();
        form.check("name", required_error(&request.name, "Name"))
            .rule(
                "name",
                request.name.trim().chars().count() <= MAX_NAME_LENGTH,
                "Name must be at most 80 characters",
            )
            .check("description", description_error(&request.description))
            .check("category", category_error(&request.category))
            .check("price", price_error(&request.price))
            .rule(
                "prep_time_minutes",
                (1..=MAX_PREP_TIME_MINUTES).contains(&request.prep_time_minutes),
                "Prep time must be between 1 and 240 minutes",
            );

        let validation = form.finish();
        if !validation.is_valid {
            return Err(DeskError::Validation(validation));
        }

        parse_price_cents(&request.price)
            .ok_or_else(|| DeskError::InvalidRequest(format!("Invalid price: {}", request.price)))
    }
}

impl MenuServiceImpl {
    /// Create a new menu service.
    pub fn new(menu: Arc<dyn MenuStore>) -> Self {
        Self {
            menu,
            ids: IdGenerator::new("menu"),
        }
    }
}

#[async_trait]
impl MenuService for MenuServiceImpl {
    async fn create_item(&self, request: MenuItemRequest) -> DeskResult<MenuItem> {
        let price_cents = Self::validate(&request)?;

        let mut item = MenuItem::new(
            self.ids.next_id(),
            request.name.trim().to_string(),
            request.description.trim().to_string(),
            request.category.trim().to_string(),
            price_cents,
            request.prep_time_minutes,
        );
        item.available = request.available.unwrap_or(true);

        let stored = self.menu.create(&item).await?;
        tracing::info!(
            "Menu item created: id={}, name={}, price={}",
            stored.id,
            stored.name,
            stored.display_price()
        );
        Ok(stored)
    }

    async fn update_item(&self, id: &str, request: MenuItemRequest) -> DeskResult<MenuItem> {
        let mut item = self.menu.get(id).await?;
        let price_cents = Self::validate(&request)?;

        item.name = request.name.trim().to_string();
        item.description = request.description.trim().to_string();
        item.category = request.category.trim().to_string();
        item.price_cents = price_cents;
        item.prep_time_minutes = request.prep_time_minutes;
        if let Some(available) = request.available {
            item.available = available;
        }

        self.menu.update(id, &item).await
    }

    async fn set_availability(&self, id: &str, available: bool) -> DeskResult<MenuItem> {
        let mut item = self.menu.get(id).await?;
        item.available = available;
        let updated = self.menu.update(id, &item).await?;
        tracing::info!("Menu item {} available={}", id, available);
        Ok(updated)
    }

    async fn list_items(&self, category: Option<String>) -> DeskResult<Vec<MenuItem>> {
        let mut items = match category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => self.menu.list_by_category(category).await?,
            None => self.menu.list().await?,
        };

        items.sort_by(|a, b| {
            a.category
                .to_lowercase()
                .cmp(&b.category.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    async fn delete_item(&self, id: &str) -> DeskResult<()> {
        self.menu.delete(id).await?;
        tracing::info!("Menu item {} deleted", id);
        Ok(())
    }
}
