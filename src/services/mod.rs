//! Application service layer.
//!
//! Services contain business logic and orchestrate the form validators,
//! scheduling helpers and stores. They provide a clean boundary between the
//! MCP handlers and the data access layer.

mod menu_service;
mod order_service;
mod reservation_service;
mod table_service;

pub use menu_service::{MenuItemRequest, MenuService, MenuServiceImpl};
pub use order_service::{OrderLineRequest, OrderRequest, OrderService, OrderServiceImpl};
pub use reservation_service::{ReservationRequest, ReservationService, ReservationServiceImpl};
pub use table_service::{TableRequest, TableService, TableServiceImpl};

use crate::config::Config;
use crate::repositories::{
    InMemoryMenuStore, InMemoryOrderStore, InMemoryReservationStore, InMemoryTableStore,
    MenuStore, OrderStore, ReservationStore, TableStore,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Every service the desk exposes, sharing one set of stores.
#[derive(Clone)]
pub struct DeskServices {
    pub reservations: Arc<dyn ReservationService>,
    pub orders: Arc<dyn OrderService>,
    pub menu: Arc<dyn MenuService>,
    pub tables: Arc<dyn TableService>,
    /// Clock shared by every service; also decides "today" for ad hoc checks.
    pub clock: Clock,
}

impl DeskServices {
    /// Wire services over the given stores.
    pub fn new(
        reservation_store: Arc<dyn ReservationStore>,
        order_store: Arc<dyn OrderStore>,
        menu_store: Arc<dyn MenuStore>,
        table_store: Arc<dyn TableStore>,
        config: &Config,
        clock: Clock,
    ) -> Self {
        let reservations = Arc::new(
            ReservationServiceImpl::new(
                reservation_store.clone(),
                table_store.clone(),
                config.clone(),
            )
            .with_clock(clock),
        ) as Arc<dyn ReservationService>;

        let orders = Arc::new(
            OrderServiceImpl::new(
                order_store,
                menu_store.clone(),
                reservation_store,
                table_store.clone(),
                config.clone(),
            )
            .with_clock(clock),
        ) as Arc<dyn OrderService>;

        let menu = Arc::new(MenuServiceImpl::new(menu_store)) as Arc<dyn MenuService>;
        let tables =
            Arc::new(TableServiceImpl::new(table_store, config.clone())) as Arc<dyn TableService>;

        Self {
            reservations,
            orders,
            menu,
            tables,
            clock,
        }
    }

    /// Services backed by fresh in-memory stores.
    pub fn in_memory(config: &Config, clock: Clock) -> Self {
        Self::new(
            Arc::new(InMemoryReservationStore::new()),
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(InMemoryMenuStore::new()),
            Arc::new(InMemoryTableStore::new()),
            config,
            clock,
        )
    }
}

/// Source of the current local date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Local wall clock.
    #[default]
    System,
    /// Frozen at a fixed instant (tests, replays).
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => chrono::Local::now().naive_local(),
            Clock::Fixed(instant) => *instant,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Minutes since local midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        use chrono::Timelike;
        let now = self.now();
        now.hour() * 60 + now.minute()
    }

    /// ISO 8601 timestamp for `created_at` fields.
    pub fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Sequential record IDs such as `res-0001`.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:04}", self.prefix, n)
    }
}
