//! Restaurant Desk - an MCP server for restaurant back-office work.
//!
//! The core is a set of pure scheduling and form-validation helpers: time-of-day
//! conversion, prep-start suggestions and feasibility checks, per-country phone
//! formatting and booking form validators. Around it sit in-memory stores,
//! services for reservations, orders, menu items and tables, and an MCP server
//! exposing them as tools.
//!
//! # Architecture
//!
//! - **domain**: Pure helpers for times, prep scheduling, phones, emails and forms
//! - **models**: Reservation, order, menu item and table records
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Store traits and in-memory implementations
//! - **services**: Business operations over the stores
//! - **seed**: Demo data for a fresh desk
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::{
    compute_suggested_prep_start, format_minutes_to_time, format_phone_number,
    get_phone_metadata, parse_time_to_minutes, validate_phone_number, FormValidation,
    PrepFeasibility, PrepPolicy,
};
pub use error::{ConfigError, DeskError, DeskResult};
pub use models::{MenuItem, Order, OrderStatus, Reservation, ReservationStatus, Table, TableStatus};
pub use server::RestaurantDeskServer;
pub use services::{Clock, DeskServices};
