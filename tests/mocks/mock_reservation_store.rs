use async_trait::async_trait;
use restaurant_desk::error::{DeskError, DeskResult};
use restaurant_desk::models::Reservation;
use restaurant_desk::repositories::ReservationStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock reservation store for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockReservationStore {
    reservations: Arc<Mutex<HashMap<String, Reservation>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_reservation(&self, reservation: Reservation) {
        let mut reservations = self.reservations.lock().unwrap();
        reservations.insert(reservation.id.clone(), reservation);
    }

    pub fn snapshot(&self, id: &str) -> Option<Reservation> {
        self.reservations.lock().unwrap().get(id).cloned()
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

    fn sorted(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
        reservations.sort_by(|a, b| a.id.cmp(&b.id));
        reservations
    }
}

impl Default for MockReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for MockReservationStore {
    async fn get(&self, id: &str) -> DeskResult<Reservation> {
        self.track_call("get");

        let reservations = self.reservations.lock().unwrap();
        reservations
            .get(id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("Reservation {} not found", id)))
    }

    async fn list(&self) -> DeskResult<Vec<Reservation>> {
        self.track_call("list");

        let reservations = self.reservations.lock().unwrap();
        Ok(Self::sorted(reservations.values().cloned().collect()))
    }

    async fn list_for_date(&self, date: &str) -> DeskResult<Vec<Reservation>> {
        self.track_call("list_for_date");

        let reservations = self.reservations.lock().unwrap();
        Ok(Self::sorted(
            reservations
                .values()
                .filter(|r| r.date == date)
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, reservation: &Reservation) -> DeskResult<Reservation> {
        self.track_call("create");

        let mut reservations = self.reservations.lock().unwrap();

        if reservations.contains_key(&reservation.id) {
            return Err(DeskError::Conflict(format!(
                "Reservation with ID {} already exists",
                reservation.id
            )));
        }

        reservations.insert(reservation.id.clone(), reservation.clone());
        Ok(reservation.clone())
    }

    async fn update(&self, id: &str, reservation: &Reservation) -> DeskResult<Reservation> {
        self.track_call("update");

        let mut reservations = self.reservations.lock().unwrap();

        if !reservations.contains_key(id) {
            return Err(DeskError::NotFound(format!("Reservation {} not found", id)));
        }

        reservations.insert(id.to_string(), reservation.clone());
        Ok(reservation.clone())
    }

    async fn delete(&self, id: &str) -> DeskResult<()> {
        self.track_call("delete");

        let mut reservations = self.reservations.lock().unwrap();

        if reservations.remove(id).is_none() {
            return Err(DeskError::NotFound(format!("Reservation {} not found", id)));
        }
        Ok(())
    }
}
