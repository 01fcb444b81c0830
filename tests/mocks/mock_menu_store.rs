use async_trait::async_trait;
use restaurant_desk::error::{DeskError, DeskResult};
use restaurant_desk::models::MenuItem;
use restaurant_desk::repositories::MenuStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock menu store for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockMenuStore {
    items: Arc<Mutex<HashMap<String, MenuItem>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockMenuStore {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_item(&self, item: MenuItem) {
        let mut items = self.items.lock().unwrap();
        items.insert(item.id.clone(), item);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockMenuStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuStore for MockMenuStore {
    async fn get(&self, id: &str) -> DeskResult<MenuItem> {
        self.track_call("get");

        let items = self.items.lock().unwrap();
        items
            .get(id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Menu item {} not found", id)))
    }

    async fn list(&self) -> DeskResult<Vec<MenuItem>> {
        self.track_call("list");

        let items = self.items.lock().unwrap();
        Ok(items.values().cloned().collect())
    }

    async fn list_by_category(&self, category: &str) -> DeskResult<Vec<MenuItem>> {
        self.track_call("list_by_category");

        let items = self.items.lock().unwrap();
        Ok(items
            .values()
            .filter(|item| item.in_category(category))
            .cloned()
            .collect())
    }

    async fn create(&self, item: &MenuItem) -> DeskResult<MenuItem> {
        self.track_call("create");

        let mut items = self.items.lock().unwrap();

        if items.contains_key(&item.id) {
            return Err(DeskError::Conflict(format!(
                "Menu item with ID {} already exists",
                item.id
            )));
        }

        items.insert(item.id.clone(), item.clone());
        Ok(item.clone())
    }

    async fn update(&self, id: &str, item: &MenuItem) -> DeskResult<MenuItem> {
        self.track_call("update");

        let mut items = self.items.lock().unwrap();

        if !items.contains_key(id) {
            return Err(DeskError::NotFound(format!("Menu item {} not found", id)));
        }

        items.insert(id.to_string(), item.clone());
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.track_call("delete");

        let mut items = self.items.lock().unwrap();

        if items.remove(id).is_none() {
            return Err(DeskError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(())
    }
}
