//! Order model representing a kitchen ticket for a table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Orders still occupying the kitchen.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: u32,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> u32 {
        self.quantity.saturating_mul(self.unit_price_cents)
    }
}

/// An order placed for a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Order {
    pub id: String,

    pub table_number: u32,

    pub customer_name: String,

    pub items: Vec<OrderItem>,

    pub status: OrderStatus,

    /// Minutes of kitchen work the order needs
    pub estimated_prep_time: u32,

    /// Reservation this order is being prepared for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,

    /// Advisory message when the order may not be ready for its reservation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_warning: Option<String>,

    /// When the order was placed (ISO 8601 timestamp)
    pub created_at: String,
}

impl Order {
    /// Create a new pending order.
    pub fn new(
        id: String,
        table_number: u32,
        customer_name: String,
        items: Vec<OrderItem>,
        estimated_prep_time: u32,
        created_at: String,
    ) -> Self {
        Self {
            id,
            table_number,
            customer_name,
            items,
            status: OrderStatus::Pending,
            estimated_prep_time,
            reservation_id: None,
            prep_warning: None,
            created_at,
        }
    }

    pub fn total_cents(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.line_total_cents()))
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order::new(
            "ord-0001".to_string(),
            4,
            "Ana".to_string(),
            vec![
                OrderItem {
                    menu_item_id: "menu-0001".to_string(),
                    name: "Risotto".to_string(),
                    quantity: 2,
                    unit_price_cents: 1850,
                },
                OrderItem {
                    menu_item_id: "menu-0002".to_string(),
                    name: "Tiramisu".to_string(),
                    quantity: 1,
                    unit_price_cents: 750,
                },
            ],
            25,
            "2025-06-15T18:00:00+00:00".to_string(),
        )
    }

    #[test]
    fn test_order_totals() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents(), 4450);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_order_status_parsing() {
        assert_eq!("Preparing".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
        assert_eq!("canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("burnt".parse::<OrderStatus>().is_err());
        assert!(OrderStatus::Ready.is_open());
        assert!(!OrderStatus::Served.is_open());
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"status\":\"pending\""));
        // Optional fields are omitted when unset
        assert!(!json.contains("prep_warning"));
        assert!(!json.contains("reservation_id"));

        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
