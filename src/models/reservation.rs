//! Reservation model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Reservations that still hold a table.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed | ReservationStatus::Seated
        )
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "seated" => Ok(ReservationStatus::Seated),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("Unknown reservation status: {}", other)),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Reservation {
    pub id: String,

    pub customer_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number in the country's display format
    pub phone: String,

    /// Composite country code, e.g. "+1-US"
    pub country_code: String,

    /// Service date (YYYY-MM-DD)
    pub date: String,

    /// Service time (HH:MM)
    pub time: String,

    pub party_size: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,

    pub status: ReservationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    /// When the reservation was taken (ISO 8601 timestamp)
    pub created_at: String,
}

impl Reservation {
    /// Sort key placing reservations in service order.
    pub fn service_key(&self) -> (String, String) {
        (self.date.clone(), self.time.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_status_parsing() {
        assert_eq!(
            " Confirmed ".parse::<ReservationStatus>(),
            Ok(ReservationStatus::Confirmed)
        );
        assert!("no-show".parse::<ReservationStatus>().is_err());
        assert!(ReservationStatus::Seated.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
        assert_eq!(ReservationStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_reservation_deserialization() {
        let json = r#"{
            "id": "res-0001",
            "customer_name": "Ana Lima",
            "phone": "555-123-4567",
            "country_code": "+1-US",
            "date": "2025-06-15",
            "time": "19:30",
            "party_size": 4,
            "status": "confirmed"
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.party_size, 4);
        assert_eq!(reservation.table_number, None);
        assert_eq!(
            reservation.service_key(),
            ("2025-06-15".to_string(), "19:30".to_string())
        );
    }
}
