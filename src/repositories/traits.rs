use crate::error::DeskResult;
use crate::models::*;
use async_trait::async_trait;

/// Store for menu items.
///
/// Provides abstraction over menu storage so a hosted backend can replace the
/// in-memory implementation.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Retrieve a single menu item by ID.
    async fn get(&self, id: &str) -> DeskResult<MenuItem>;

    /// All menu items in insertion order.
    async fn list(&self) -> DeskResult<Vec<MenuItem>>;

    /// Menu items in a category (case-insensitive).
    async fn list_by_category(&self, category: &str) -> DeskResult<Vec<MenuItem>>;

    /// Create a new menu item.
    async fn create(&self, item: &MenuItem) -> DeskResult<MenuItem>;

    /// Replace an existing menu item.
    async fn update(&self, id: &str, item: &MenuItem) -> DeskResult<MenuItem>;

    /// Delete a menu item.
    async fn delete(&self, id: &str) -> DeskResult<()>;
}

/// Store for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, id: &str) -> DeskResult<Order>;

    async fn list(&self) -> DeskResult<Vec<Order>>;

    /// Orders placed for a table.
    async fn list_for_table(&self, table_number: u32) -> DeskResult<Vec<Order>>;

    /// Orders linked to a reservation.
    async fn list_for_reservation(&self, reservation_id: &str) -> DeskResult<Vec<Order>>;

    async fn create(&self, order: &Order) -> DeskResult<Order>;

    async fn update(&self, id: &str, order: &Order) -> DeskResult<Order>;

    async fn delete(&self, id: &str) -> DeskResult<()>;
}

/// Store for reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn get(&self, id: &str) -> DeskResult<Reservation>;

    async fn list(&self) -> DeskResult<Vec<Reservation>>;

    /// Reservations for a service date (YYYY-MM-DD).
    async fn list_for_date(&self, date: &str) -> DeskResult<Vec<Reservation>>;

    async fn create(&self, reservation: &Reservation) -> DeskResult<Reservation>;

    async fn update(&self, id: &str, reservation: &Reservation) -> DeskResult<Reservation>;

    async fn delete(&self, id: &str) -> DeskResult<()>;
}

/// Store for dining tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn get(&self, id: &str) -> DeskResult<Table>;

    /// Look up a table by its floor number.
    async fn get_by_number(&self, number: u32) -> DeskResult<Table>;

    async fn list(&self) -> DeskResult<Vec<Table>>;

    async fn create(&self, table: &Table) -> DeskResult<Table>;

    async fn update(&self, id: &str, table: &Table) -> DeskResult<Table>;

    async fn delete(&self, id: &str) -> DeskResult<()>;
}
