use async_trait::async_trait;
use restaurant_desk::error::{DeskError, DeskResult};
use restaurant_desk::models::Table;
use restaurant_desk::repositories::TableStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock table store for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTableStore {
    tables: Arc<Mutex<HashMap<String, Table>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockTableStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_table(&self, table: Table) {
        let mut tables = self.tables.lock().unwrap();
        tables.insert(table.id.clone(), table);
    }

    pub fn add_tables(&self, tables_list: Vec<Table>) {
        let mut tables = self.tables.lock().unwrap();
        for table in tables_list {
            tables.insert(table.id.clone(), table);
        }
    }

    /// Current state of the table with `number`, bypassing call counting.
    pub fn by_number(&self, number: u32) -> Option<Table> {
        let tables = self.tables.lock().unwrap();
        tables.values().find(|t| t.number == number).cloned()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MockTableStore {
    async fn get(&self, id: &str) -> DeskResult<Table> {
        self.track_call("get");

        let tables = self.tables.lock().unwrap();
        tables
            .get(id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Table {} not found", id)))
    }

    async fn get_by_number(&self, number: u32) -> DeskResult<Table> {
        self.track_call("get_by_number");

        let tables = self.tables.lock().unwrap();
        tables
            .values()
            .find(|t| t.number == number)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Table number {} not found", number)))
    }

    async fn list(&self) -> DeskResult<Vec<Table>> {
        self.track_call("list");

        let tables = self.tables.lock().unwrap();
        let mut result: Vec<Table> = tables.values().cloned().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn create(&self, table: &Table) -> DeskResult<Table> {
        self.track_call("create");

        let mut tables = self.tables.lock().unwrap();

        if tables.contains_key(&table.id) {
            return Err(DeskError::Conflict(format!(
                "Table with ID {} already exists",
                table.id
            )));
        }

        tables.insert(table.id.clone(), table.clone());
        Ok(table.clone())
    }

    async fn update(&self, id: &str, table: &Table) -> DeskResult<Table> {
        self.track_call("update");

        let mut tables = self.tables.lock().unwrap();

        if !tables.contains_key(id) {
            return Err(DeskError::NotFound(format!("Table {} not found", id)));
        }

        tables.insert(id.to_string(), table.clone());
        Ok(table.clone())
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.track_call("delete");

        let mut tables = self.tables.lock().unwrap();

        if tables.remove(id).is_none() {
            return Err(DeskError::NotFound(format!("Table {} not found", id)));
        }
        Ok(())
    }
}
