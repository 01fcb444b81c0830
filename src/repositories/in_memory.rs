//! In-memory store implementations.
//!
//! Records live in insertion-ordered vectors; an update replaces the record at
//! its index. Everything is lost when the process exits.

use super::traits::{MenuStore, OrderStore, ReservationStore, TableStore};
use crate::error::{DeskError, DeskResult};
use crate::models::{MenuItem, Order, Reservation, Table};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A record addressable by string ID.
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in error messages.
    const KIND: &'static str;

    fn record_id(&self) -> &str;
}

impl Record for MenuItem {
    const KIND: &'static str = "Menu item";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    const KIND: &'static str = "Order";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Reservation {
    const KIND: &'static str = "Reservation";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Table {
    const KIND: &'static str = "Table";

    fn record_id(&self) -> &str {
        &self.id
    }
}

struct Collection<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn not_found(id: &str) -> DeskError {
        DeskError::NotFound(format!("{} {}", T::KIND, id))
    }

    async fn get(&self, id: &str) -> DeskResult<T> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.record_id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let records = self.records.read().await;
        records.iter().find(|r| predicate(r)).cloned()
    }

    async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let records = self.records.read().await;
        records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    async fn create(&self, record: &T) -> DeskResult<T> {
        if record.record_id().trim().is_empty() {
            return Err(DeskError::InvalidRequest(format!(
                "{} ID cannot be empty",
                T::KIND
            )));
        }

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.record_id() == record.record_id()) {
            return Err(DeskError::Conflict(format!(
                "{} {} already exists",
                T::KIND,
                record.record_id()
            )));
        }

        records.push(record.clone());
        Ok(record.clone())
    }

    async fn update(&self, id: &str, record: &T) -> DeskResult<T> {
        if record.record_id() != id {
            return Err(DeskError::InvalidRequest(format!(
                "{} ID mismatch: {} vs {}",
                T::KIND,
                id,
                record.record_id()
            )));
        }

        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        records[index] = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        records.remove(index);
        Ok(())
    }
}

/// In-memory menu store.
pub struct InMemoryMenuStore {
    items: Collection<MenuItem>,
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self {
            items: Collection::new(),
        }
    }
}

impl Default for InMemoryMenuStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn get(&self, id: &str) -> DeskResult<MenuItem> {
        self.items.get(id).await
    }

    async fn list(&self) -> DeskResult<Vec<MenuItem>> {
        Ok(self.items.list().await)
    }

    async fn list_by_category(&self, category: &str) -> DeskResult<Vec<MenuItem>> {
        Ok(self.items.filter(|item| item.in_category(category)).await)
    }

    async fn create(&self, item: &MenuItem) -> DeskResult<MenuItem> {
        self.items.create(item).await
    }

    async fn update(&self, id: &str, item: &MenuItem) -> DeskResult<MenuItem> {
        self.items.update(id, item).await
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.items.delete(id).await
    }
}

/// In-memory order store.
pub struct InMemoryOrderStore {
    orders: Collection<Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: Collection::new(),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get(&self, id: &str) -> DeskResult<Order> {
        self.orders.get(id).await
    }

    async fn list(&self) -> DeskResult<Vec<Order>> {
        Ok(self.orders.list().await)
    }

    async fn list_for_table(&self, table_number: u32) -> DeskResult<Vec<Order>> {
        Ok(self
            .orders
            .filter(|order| order.table_number == table_number)
            .await)
    }

    async fn list_for_reservation(&self, reservation_id: &str) -> DeskResult<Vec<Order>> {
        Ok(self
            .orders
            .filter(|order| order.reservation_id.as_deref() == Some(reservation_id))
            .await)
    }

    async fn create(&self, order: &Order) -> DeskResult<Order> {
        self.orders.create(order).await
    }

    async fn update(&self, id: &str, order: &Order) -> DeskResult<Order> {
        self.orders.update(id, order).await
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.orders.delete(id).await
    }
}

/// In-memory reservation store.
pub struct InMemoryReservationStore {
    reservations: Collection<Reservation>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Collection::new(),
        }
    }
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn get(&self, id: &str) -> DeskResult<Reservation> {
        self.reservations.get(id).await
    }

    async fn list(&self) -> DeskResult<Vec<Reservation>> {
        Ok(self.reservations.list().await)
    }

    async fn list_for_date(&self, date: &str) -> DeskResult<Vec<Reservation>> {
        Ok(self.reservations.filter(|r| r.date == date).await)
    }

    async fn create(&self, reservation: &Reservation) -> DeskResult<Reservation> {
        self.reservations.create(reservation).await
    }

    async fn update(&self, id: &str, reservation: &Reservation) -> DeskResult<Reservation> {
        self.reservations.update(id, reservation).await
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.reservations.delete(id).await
    }
}

/// In-memory table store.
pub struct InMemoryTableStore {
    tables: Collection<Table>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self {
            tables: Collection::new(),
        }
    }
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn get(&self, id: &str) -> DeskResult<Table> {
        self.tables.get(id).await
    }

    async fn get_by_number(&self, number: u32) -> DeskResult<Table> {
        self.tables
            .find(|table| table.number == number)
            .await
            .ok_or_else(|| DeskError::NotFound(format!("Table number {}", number)))
    }

    async fn list(&self) -> DeskResult<Vec<Table>> {
        Ok(self.tables.list().await)
    }

    async fn create(&self, table: &Table) -> DeskResult<Table> {
        self.tables.create(table).await
    }

    async fn update(&self, id: &str, table: &Table) -> DeskResult<Table> {
        self.tables.update(id, table).await
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.tables.delete(id).await
    }
}
