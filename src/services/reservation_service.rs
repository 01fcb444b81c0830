//! Reservation service layer.
//!
//! Validates booking forms, canonicalises phone numbers and keeps table state
//! in step with the reservation lifecycle.

use super::{Clock, IdGenerator};
use crate::config::Config;
use crate::domain::validation::{
    email_error, future_date_error, name_error, party_size_error, phone_error, required_error,
    table_number_error, time_error,
};
use crate::domain::{
    lookup_phone_metadata, EmailAddress, FormValidation, FormValidator, PhoneNumber, TimeOfDay,
};
use crate::error::{DeskError, DeskResult};
use crate::models::{Reservation, ReservationStatus, TableStatus};
use crate::repositories::{ReservationStore, TableStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

const MAX_SPECIAL_REQUESTS_LENGTH: usize = 500;

/// Raw booking form input.
#[derive(Debug, Clone, Default)]
pub struct ReservationRequest {
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: String,
    /// Composite country code; the configured default is used when absent
    pub country_code: Option<String>,
    pub date: String,
    pub time: String,
    pub party_size: String,
    pub table_number: Option<u32>,
    pub special_requests: Option<String>,
}

/// Reservation service trait for business operations.
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Run the booking form validators without storing anything.
    fn validate_reservation(&self, request: &ReservationRequest) -> FormValidation;

    /// Validate and store a new reservation.
    async fn create_reservation(&self, request: ReservationRequest) -> DeskResult<Reservation>;

    /// Reservations in service order, optionally filtered.
    async fn list_reservations(
        &self,
        date: Option<String>,
        status: Option<ReservationStatus>,
    ) -> DeskResult<Vec<Reservation>>;

    /// Move a reservation to a new status.
    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> DeskResult<Reservation>;

    /// Shorthand for moving to `Cancelled`.
    async fn cancel_reservation(&self, id: &str) -> DeskResult<Reservation>;
}

/// Default implementation of ReservationService.
pub struct ReservationServiceImpl {
    reservations: Arc<dyn ReservationStore>,
    tables: Arc<dyn TableStore>,
    config: Config,
    clock: Clock,
    ids: IdGenerator,
    /// Held from the table clash check until the booking is stored.
    booking: Mutex<()>,
}

/// Validation helper functions.
impl ReservationServiceImpl {
    fn country_code<'a>(&'a self, request: &'a ReservationRequest) -> &'a str {
        request
            .country_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(self.config.default_country_code.as_str())
    }

    /// Statuses cannot leave a terminal state.
    fn validate_transition(from: ReservationStatus, to: ReservationStatus) -> Result<(), String> {
        if from == to {
            return Ok(());
        }
        match from {
            ReservationStatus::Completed | ReservationStatus::Cancelled => Err(format!(
                "Reservation is already {} and cannot become {}",
                from, to
            )),
            _ => Ok(()),
        }
    }
}

impl ReservationServiceImpl {
    /// Create a new reservation service.
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        tables: Arc<dyn TableStore>,
        config: Config,
    ) -> Self {
        Self {
            reservations,
            tables,
            config,
            clock: Clock::System,
            ids: IdGenerator::new("res"),
            booking: Mutex::new(()),
        }
    }

    /// Replace the clock used for "today" and timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The table must exist, seat the party and be free at that slot.
    async fn check_table(
        &self,
        table_number: u32,
        request: &ReservationRequest,
        party_size: u32,
    ) -> DeskResult<()> {
        let table = match self.tables.get_by_number(table_number).await {
            Ok(table) => table,
            Err(DeskError::NotFound(_)) => {
                return Err(DeskError::InvalidRequest(format!(
                    "Table {} does not exist",
                    table_number
                )))
            }
            Err(e) => return Err(e),
        };

        if table.capacity < party_size {
            return Err(DeskError::InvalidRequest(format!(
                "Table {} seats {} but the party has {}",
                table_number, table.capacity, party_size
            )));
        }

        let time = TimeOfDay::parse(request.time.trim())
            .map_err(|e| DeskError::InvalidRequest(e.to_string()))?;
        let clash = self
            .reservations
            .list_for_date(request.date.trim())
            .await?
            .into_iter()
            .any(|r| {
                r.status.is_active()
                    && r.table_number == Some(table_number)
                    && TimeOfDay::parse(&r.time).ok() == Some(time)
            });
        if clash {
            return Err(DeskError::Conflict(format!(
                "Table {} is already booked on {} at {}",
                table_number,
                request.date.trim(),
                time
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ReservationService for ReservationServiceImpl {
    fn validate_reservation(&self, request: &ReservationRequest) -> FormValidation {
        let country_code = self.country_code(request);
        let hours = self.config.business_hours();
        let today = self.clock.today();

        let mut form = FormValidator::new();
        form.check(
            "customer_name",
            required_error(&request.customer_name, "Customer name"),
        )
        .check("customer_name", name_error(&request.customer_name));

        if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
            form.check("email", email_error(email));
        }

        form.check("phone", required_error(&request.phone, "Phone number"))
            .check("phone", phone_error(&request.phone, country_code))
            .check("date", required_error(&request.date, "Date"))
            .check("date", future_date_error(&request.date, today))
            .check("time", required_error(&request.time, "Time"))
            .check("time", time_error(request.time.trim(), hours))
            .check(
                "party_size",
                party_size_error(
                    &request.party_size,
                    self.config.min_party_size,
                    self.config.max_party_size,
                ),
            );

        if let Some(number) = request.table_number {
            form.check("table_number", table_number_error(&number.to_string()));
        }

        if let Some(notes) = &request.special_requests {
            form.rule(
                "special_requests",
                notes.chars().count() <= MAX_SPECIAL_REQUESTS_LENGTH,
                "Special requests must be 500 characters or fewer",
            );
        }

        form.finish()
    }

    async fn create_reservation(&self, request: ReservationRequest) -> DeskResult<Reservation> {
        let validation = self.validate_reservation(&request);
        if !validation.is_valid {
            tracing::debug!("Reservation rejected: {}", validation);
            return Err(DeskError::Validation(validation));
        }

        let party_size: u32 = request
            .party_size
            .trim()
            .parse()
            .map_err(|_| DeskError::InvalidRequest("Invalid party size".to_string()))?;

        let _booking = self.booking.lock().await;
        if let Some(number) = request.table_number {
            self.check_table(number, &request, party_size).await?;
        }

        let lookup = lookup_phone_metadata(self.country_code(&request));
        let country_code = lookup.profile.key();
        let time = TimeOfDay::parse(request.time.trim())
            .map_err(|e| DeskError::InvalidRequest(e.to_string()))?;
        let phone = PhoneNumber::new(&request.phone, &country_code)
            .map_err(|e| DeskError::InvalidRequest(e.to_string()))?;
        let email = match request.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Some(
                EmailAddress::new(email)
                    .map_err(|e| DeskError::InvalidRequest(e.to_string()))?
                    .into_inner(),
            ),
            None => None,
        };

        let reservation = Reservation {
            id: self.ids.next_id(),
            customer_name: request.customer_name.trim().to_string(),
            email,
            phone: phone.into_inner(),
            country_code,
            date: request.date.trim().to_string(),
            time: time.to_string(),
            party_size,
            table_number: request.table_number,
            status: ReservationStatus::Pending,
            special_requests: request
                .special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            created_at: self.clock.timestamp(),
        };

        let stored = self.reservations.create(&reservation).await?;
        tracing::info!(
            "Reservation created: id={}, date={}, time={}, party={}",
            stored.id,
            stored.date,
            stored.time,
            stored.party_size
        );
        Ok(stored)
    }

    async fn list_reservations(
        &self,
        date: Option<String>,
        status: Option<ReservationStatus>,
    ) -> DeskResult<Vec<Reservation>> {
        let mut reservations = match date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => self.reservations.list_for_date(date).await?,
            None => self.reservations.list().await?,
        };

        if let Some(status) = status {
            reservations.retain(|r| r.status == status);
        }

        reservations.sort_by_key(|r| r.service_key());
        Ok(reservations)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> DeskResult<Reservation> {
        let mut reservation = self.reservations.get(id).await?;
        Self::validate_transition(reservation.status, status).map_err(DeskError::InvalidRequest)?;

        let previous = reservation.status;
        reservation.status = status;
        let updated = self.reservations.update(id, &reservation).await?;

        if let Some(number) = updated.table_number {
            let table_status = match status {
                ReservationStatus::Seated => Some(TableStatus::Occupied),
                ReservationStatus::Completed => Some(TableStatus::Cleaning),
                ReservationStatus::Cancelled if previous == ReservationStatus::Seated => {
                    Some(TableStatus::Available)
                }
                _ => None,
            };

            if let Some(table_status) = table_status {
                match self.tables.get_by_number(number).await {
                    Ok(mut table) => {
                        table.status = table_status;
                        self.tables.update(&table.id, &table).await?;
                        tracing::debug!("Table {} is now {}", number, table_status);
                    }
                    Err(e) => tracing::warn!("Could not update table {}: {}", number, e),
                }
            }
        }

        tracing::info!("Reservation {} moved from {} to {}", id, previous, status);
        Ok(updated)
    }

    async fn cancel_reservation(&self, id: &str) -> DeskResult<Reservation> {
        self.update_status(id, ReservationStatus::Cancelled).await
    }
}
