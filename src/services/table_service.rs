//! Table service layer.
//!
//! Floor plan management and availability lookups for walk-ins and bookings.

use super::IdGenerator;
use crate::config::Config;
use crate::domain::validation::{
    capacity_error, party_size_error, required_error, table_number_error,
};
use crate::domain::FormValidator;
use crate::error::{DeskError, DeskResult};
use crate::models::{Table, TableStatus};
use crate::repositories::TableStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Raw table form input.
#[derive(Debug, Clone, Default)]
pub struct TableRequest {
    pub number: String,
    pub capacity: String,
    pub location: String,
}

/// Table service trait for business operations.
#[async_trait]
pub trait TableService: Send + Sync {
    /// Validate and store a new table. Table numbers are unique.
    async fn create_table(&self, request: TableRequest) -> DeskResult<Table>;

    /// Tables ordered by number, optionally filtered by status.
    async fn list_tables(&self, status: Option<TableStatus>) -> DeskResult<Vec<Table>>;

    async fn update_status(&self, number: u32, status: TableStatus) -> DeskResult<Table>;

    /// Available tables that seat `party_size`, smallest fit first.
    async fn find_available(&self, party_size: &str) -> DeskResult<Vec<Table>>;

    async fn delete_table(&self, number: u32) -> DeskResult<()>;
}

/// Default implementation of TableService.
pub struct TableServiceImpl {
    tables: Arc<dyn TableStore>,
    config: Config,
    ids: IdGenerator,
    /// Serialises the unique-number check with the insert.
    registry: Mutex<()>,
}

/// Validation helper functions.
impl TableServiceImpl {
    fn validate(request: &TableRequest) -> DeskResult<(u32, u32)> {
        let mut form = FormValidator::new();
        form.check("number", table_number_error(&request.number))
            .check("capacity", capacity_error(&request.capacity))
            .check("location", required_error(&request.location, "Location"));

        let validation = form.finish();
        if !validation.is_valid {
            return Err(DeskError::Validation(validation));
        }

        let number = request.number.trim().parse().map_err(|_| {
            DeskError::InvalidRequest(format!("Invalid table number: {}", request.number))
        })?;
        let capacity = request.capacity.trim().parse().map_err(|_| {
            DeskError::InvalidRequest(format!("Invalid capacity: {}", request.capacity))
        })?;
        Ok((number, capacity))
    }

    fn validate_party_size(&self, party_size: &str) -> DeskResult<u32> {
        let mut form = FormValidator::new();
        form.check(
            "party_size",
            party_size_error(
                party_size,
                self.config.min_party_size,
                self.config.max_party_size,
            ),
        );

        let validation = form.finish();
        if !validation.is_valid {
            return Err(DeskError::Validation(validation));
        }

        party_size.trim().parse().map_err(|_| {
            DeskError::InvalidRequest(format!("Invalid party size: {}", party_size))
        })
    }
}

impl TableServiceImpl {
    /// Create a new table service.
    pub fn new(tables: Arc<dyn TableStore>, config: Config) -> Self {
        Self {
            tables,
            config,
            ids: IdGenerator::new("tbl"),
            registry: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TableService for TableServiceImpl {
    async fn create_table(&self, request: TableRequest) -> DeskResult<Table> {
        let (number, capacity) = Self::validate(&request)?;

        let _registry = self.registry.lock().await;
        match self.tables.get_by_number(number).await {
            Ok(_) => {
                return Err(DeskError::Conflict(format!(
                    "Table {} already exists",
                    number
                )))
            }
            Err(DeskError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let table = Table::new(
            self.ids.next_id(),
            number,
            capacity,
            request.location.trim().to_string(),
        );
        let stored = self.tables.create(&table).await?;
        tracing::info!(
            "Table created: number={}, capacity={}, location={}",
            stored.number,
            stored.capacity,
            stored.location
        );
        Ok(stored)
    }

    async fn list_tables(&self, status: Option<TableStatus>) -> DeskResult<Vec<Table>> {
        let mut tables = self.tables.list().await?;
        if let Some(status) = status {
            tables.retain(|table| table.status == status);
        }
        tables.sort_by_key(|table| table.number);
        Ok(tables)
    }

    async fn update_status(&self, number: u32, status: TableStatus) -> DeskResult<Table> {
        let mut table = self.tables.get_by_number(number).await?;
        let previous = table.status;
        table.status = status;
        let updated = self.tables.update(&table.id, &table).await?;
        tracing::info!("Table {} moved from {} to {}", number, previous, status);
        Ok(updated)
    }

    async fn find_available(&self, party_size: &str) -> DeskResult<Vec<Table>> {
        let party_size = self.validate_party_size(party_size)?;

        let mut tables: Vec<Table> = self
            .tables
            .list()
            .await?
            .into_iter()
            .filter(|table| table.can_seat(party_size))
            .collect();
        tables.sort_by_key(|table| (table.capacity, table.number));

        tracing::debug!(
            "{} table(s) available for a party of {}",
            tables.len(),
            party_size
        );
        Ok(tables)
    }

    async fn delete_table(&self, number: u32) -> DeskResult<()> {
        let table = self.tables.get_by_number(number).await?;
        self.tables.delete(&table.id).await?;
        tracing::info!("Table {} deleted", number);
        Ok(())
    }
}
