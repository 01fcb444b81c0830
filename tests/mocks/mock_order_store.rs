use async_trait::async_trait;
use restaurant_desk::error::{DeskError, DeskResult};
use restaurant_desk::models::Order;
use restaurant_desk::repositories::OrderStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock order store for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockOrderStore {
    orders: Arc<Mutex<HashMap<String, Order>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockOrderStore {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn sorted(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        orders
    }
}

impl Default for MockOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn get(&self, id: &str) -> DeskResult<Order> {
        self.track_call("get");

        let orders = self.orders.lock().unwrap();
        orders
            .get(id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Order {} not found", id)))
    }

    async fn list(&self) -> DeskResult<Vec<Order>> {
        self.track_call("list");

        let orders = self.orders.lock().unwrap();
        Ok(Self::sorted(orders.values().cloned().collect()))
    }

    async fn list_for_table(&self, table_number: u32) -> DeskResult<Vec<Order>> {
        self.track_call("list_for_table");

        let orders = self.orders.lock().unwrap();
        Ok(Self::sorted(
            orders
                .values()
                .filter(|o| o.table_number == table_number)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_reservation(&self, reservation_id: &str) -> DeskResult<Vec<Order>> {
        self.track_call("list_for_reservation");

        let orders = self.orders.lock().unwrap();
        Ok(Self::sorted(
            orders
                .values()
                .filter(|o| o.reservation_id.as_deref() == Some(reservation_id))
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, order: &Order) -> DeskResult<Order> {
        self.track_call("create");

        let mut orders = self.orders.lock().unwrap();

        if orders.contains_key(&order.id) {
            return Err(DeskError::Conflict(format!(
                "Order with ID {} already exists",
                order.id
            )));
        }

        orders.insert(order.id.clone(), order.clone());
        Ok(order.clone())
    }

    async fn update(&self, id: &str, order: &Order) -> DeskResult<Order> {
        self.track_call("update");

        let mut orders = self.orders.lock().unwrap();

        if !orders.contains_key(id) {
            return Err(DeskError::NotFound(format!("Order {} not found", id)));
        }

        orders.insert(id.to_string(), order.clone());
        Ok(order.clone())
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.track_call("delete");

        let mut orders = self.orders.lock().unwrap();

        if orders.remove(id).is_none() {
            return Err(DeskError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}
