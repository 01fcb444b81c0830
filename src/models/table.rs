//! Dining table model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current state of a table on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Cleaning => "cleaning",
        }
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            "cleaning" => Ok(TableStatus::Cleaning),
            other => Err(format!("Unknown table status: {}", other)),
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dining table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Table {
    pub id: String,

    /// Number shown on the floor plan, unique per restaurant
    pub number: u32,

    /// Seats
    pub capacity: u32,

    /// Area, e.g. "Patio"
    pub location: String,

    pub status: TableStatus,
}

impl Table {
    pub fn new(id: String, number: u32, capacity: u32, location: String) -> Self {
        Self {
            id,
            number,
            capacity,
            location,
            status: TableStatus::Available,
        }
    }

    /// Free and large enough for the party.
    pub fn can_seat(&self, party_size: u32) -> bool {
        self.status == TableStatus::Available && self.capacity >= party_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_can_seat() {
        let mut table = Table::new("tbl-0001".to_string(), 7, 4, "Patio".to_string());
        assert!(table.can_seat(4));
        assert!(!table.can_seat(5));

        table.status = TableStatus::Occupied;
        assert!(!table.can_seat(2));
    }

    #[test]
    fn test_table_status_round_trip() {
        for status in [
            TableStatus::Available,
            TableStatus::Occupied,
            TableStatus::Reserved,
            TableStatus::Cleaning,
        ] {
            assert_eq!(status.to_string().parse::<TableStatus>(), Ok(status));
        }
        assert!("broken".parse::<TableStatus>().is_err());
    }
}
