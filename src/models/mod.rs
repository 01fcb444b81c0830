//! Data models for restaurant back-office records.
//!
//! These are the records held by the stores: menu items, orders, reservations
//! and tables, each with a status enum that parses case-insensitively.

pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod table;

pub use menu_item::MenuItem;
pub use order::{Order, OrderItem, OrderStatus};
pub use reservation::{Reservation, ReservationStatus};
pub use table::{Table, TableStatus};
