//! Order service layer.
//!
//! Resolves order lines against the menu, estimates kitchen time and attaches an
//! advisory prep warning when an order linked to a reservation may run late.

use super::{Clock, IdGenerator};
use crate::config::Config;
use crate::domain::validation::{required_error, table_number_error};
use crate::domain::{parse_time_to_minutes, FormValidator, PrepFeasibility, PrepPolicy};
use crate::error::{DeskError, DeskResult};
use crate::models::{Order, OrderItem, OrderStatus, Reservation};
use crate::repositories::{MenuStore, OrderStore, ReservationStore, TableStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

const MAX_LINE_QUANTITY: u32 = 50;
const MAX_PREP_MINUTES: u32 = 480;

/// One requested order line.
#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// Raw order form input.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub table_number: u32,
    pub customer_name: String,
    pub items: Vec<OrderLineRequest>,
    /// Kitchen time override; defaults to the slowest item's prep time
    pub estimated_prep_time: Option<u32>,
    pub reservation_id: Option<String>,
}

/// Order service trait for business operations.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Validate and store a new order.
    async fn create_order(&self, request: OrderRequest) -> DeskResult<Order>;

    /// Orders in creation order, optionally filtered.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        table_number: Option<u32>,
    ) -> DeskResult<Vec<Order>>;

    /// Move an order to a new status.
    async fn update_status(&self, id: &str, status: OrderStatus) -> DeskResult<Order>;

    /// Re-run the prep feasibility check for an order linked to a reservation.
    ///
    /// `at_time` (`HH:MM`) is the moment prep would start; when absent the
    /// suggested prep start is used.
    async fn check_feasibility(
        &self,
        order_id: &str,
        at_time: Option<String>,
    ) -> DeskResult<PrepFeasibility>;

    /// Remove an order.
    async fn delete_order(&self, id: &str) -> DeskResult<()>;
}

/// Default implementation of OrderService.
pub struct OrderServiceImpl {
    orders: Arc<dyn OrderStore>,
    menu: Arc<dyn MenuStore>,
    reservations: Arc<dyn ReservationStore>,
    tables: Arc<dyn TableStore>,
    policy: PrepPolicy,
    clock: Clock,
    ids: IdGenerator,
}

/// Validation helper functions.
impl OrderServiceImpl {
    fn validate_form(request: &OrderRequest) -> FormValidator {
        let mut form = FormValidator::new();
        form.check(
            "table_number",
            table_number_error(&request.table_number.to_string()),
        )
        .check(
            "customer_name",
            required_error(&request.customer_name, "Customer name"),
        )
        .rule(
            "items",
            !request.items.is_empty(),
            "Add at least one item to the order",
        )
        .rule(
            "items",
            request
                .items
                .iter()
                .all(|line| (1..=MAX_LINE_QUANTITY).contains(&line.quantity)),
            "Item quantities must be between 1 and 50",
        );

        if let Some(minutes) = request.estimated_prep_time {
            form.rule(
                "estimated_prep_time",
                (1..=MAX_PREP_MINUTES).contains(&minutes),
                "Estimated prep time must be between 1 and 480 minutes",
            );
        }

        form
    }

    /// Statuses cannot leave a terminal state.
    fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), String> {
        if from == to || from.is_open() {
            return Ok(());
        }
        Err(format!("Order is already {} and cannot become {}", from, to))
    }
}

impl OrderServiceImpl {
    /// Create a new order service.
    pub fn new(
        orders: Arc<dyn OrderStore>,
        menu: Arc<dyn MenuStore>,
        reservations: Arc<dyn ReservationStore>,
        tables: Arc<dyn TableStore>,
        config: Config,
    ) -> Self {
        Self {
            orders,
            menu,
            reservations,
            tables,
            policy: config.prep_policy(),
            clock: Clock::System,
            ids: IdGenerator::new("ord"),
        }
    }

    /// Replace the clock used for "now" and timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Look up every line on the menu, recording problems on `form`.
    async fn resolve_items(
        &self,
        request: &OrderRequest,
        form: &mut FormValidator,
    ) -> DeskResult<(Vec<OrderItem>, u32)> {
        let mut items = Vec::with_capacity(request.items.len());
        let mut slowest = 0;

        for line in &request.items {
            match self.menu.get(&line.menu_item_id).await {
                Ok(menu_item) if menu_item.available => {
                    slowest = slowest.max(menu_item.prep_time_minutes);
                    items.push(OrderItem {
                        menu_item_id: menu_item.id,
                        name: menu_item.name,
                        quantity: line.quantity,
                        unit_price_cents: menu_item.price_cents,
                    });
                }
                Ok(menu_item) => {
                    form.check(
                        "items",
                        Some(format!("{} is not available", menu_item.name)),
                    );
                }
                Err(DeskError::NotFound(_)) => {
                    form.check(
                        "items",
                        Some(format!("Unknown menu item: {}", line.menu_item_id)),
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok((items, slowest))
    }

    /// Advisory warning for an order prepared for `reservation`.
    ///
    /// Reservations on a later day always fit. Same-day reservations are
    /// measured from the current time, anything else from the suggested start.
    fn prep_warning(&self, reservation: &Reservation, prep_minutes: u32) -> Option<String> {
        let today = self.clock.today();
        let start_reference = match NaiveDate::parse_from_str(&reservation.date, "%Y-%m-%d") {
            Ok(date) if date > today => return None,
            Ok(date) if date == today => Some(self.clock.minutes_since_midnight()),
            _ => None,
        };

        let feasibility = self
            .policy
            .check(&reservation.time, prep_minutes, start_reference)?;
        if !feasibility.fits {
            tracing::warn!(
                "Order for reservation {} may be late: slack {} min",
                reservation.id,
                feasibility.slack_minutes
            );
        }
        feasibility.warning()
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn create_order(&self, request: OrderRequest) -> DeskResult<Order> {
        let mut form = Self::validate_form(&request);
        let (items, slowest) = self.resolve_items(&request, &mut form).await?;
        let validation = form.finish();
        if !validation.is_valid {
            tracing::debug!("Order rejected: {}", validation);
            return Err(DeskError::Validation(validation));
        }

        match self.tables.get_by_number(request.table_number).await {
            Ok(_) => {}
            Err(DeskError::NotFound(_)) => {
                return Err(DeskError::InvalidRequest(format!(
                    "Table {} does not exist",
                    request.table_number
                )))
            }
            Err(e) => return Err(e),
        }

        let reservation = match request
            .reservation_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
        {
            Some(id) => Some(self.reservations.get(id.trim()).await?),
            None => None,
        };

        let estimated_prep_time = request.estimated_prep_time.unwrap_or(slowest);
        let mut order = Order::new(
            self.ids.next_id(),
            request.table_number,
            request.customer_name.trim().to_string(),
            items,
            estimated_prep_time,
            self.clock.timestamp(),
        );

        if let Some(reservation) = &reservation {
            order.reservation_id = Some(reservation.id.clone());
            order.prep_warning = self.prep_warning(reservation, estimated_prep_time);
        }

        let stored = self.orders.create(&order).await?;
        tracing::info!(
            "Order created: id={}, table={}, items={}, prep={}min",
            stored.id,
            stored.table_number,
            stored.item_count(),
            stored.estimated_prep_time
        );
        Ok(stored)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        table_number: Option<u32>,
    ) -> DeskResult<Vec<Order>> {
        let mut orders = match table_number {
            Some(number) => self.orders.list_for_table(number).await?,
            None => self.orders.list().await?,
        };

        if let Some(status) = status {
            orders.retain(|order| order.status == status);
        }

        Ok(orders)
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> DeskResult<Order> {
        let mut order = self.orders.get(id).await?;
        Self::validate_transition(order.status, status).map_err(DeskError::InvalidRequest)?;

        let previous = order.status;
        order.status = status;
        let updated = self.orders.update(id, &order).await?;
        tracing::info!("Order {} moved from {} to {}", id, previous, status);
        Ok(updated)
    }

    async fn check_feasibility(
        &self,
        order_id: &str,
        at_time: Option<String>,
    ) -> DeskResult<PrepFeasibility> {
        let order = self.orders.get(order_id).await?;
        let reservation_id = order.reservation_id.as_deref().ok_or_else(|| {
            DeskError::InvalidRequest(format!("Order {} is not linked to a reservation", order_id))
        })?;
        let reservation = self.reservations.get(reservation_id).await?;

        let start_reference = match at_time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(time) => {
                let minutes = parse_time_to_minutes(time);
                let mut form = FormValidator::new();
                form.rule("at_time", minutes.is_some(), "Please enter a time as HH:MM");
                if minutes.is_none() {
                    return Err(DeskError::Validation(form.finish()));
                }
                minutes
            }
            None => None,
        };

        self.policy
            .check(&reservation.time, order.estimated_prep_time, start_reference)
            .ok_or_else(|| {
                DeskError::InvalidRequest(format!(
                    "Reservation {} has an invalid time: {}",
                    reservation.id, reservation.time
                ))
            })
    }

    async fn delete_order(&self, id: &str) -> DeskResult<()> {
        self.orders.delete(id).await?;
        tracing::info!("Order {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuItem, Table};
    use crate::repositories::{
        InMemoryMenuStore, InMemoryOrderStore, InMemoryReservationStore, InMemoryTableStore,
    };

    fn clock_at(hour: u32, minute: u32) -> Clock {
        Clock::Fixed(
            NaiveDate::from_ymd_opt(2025, 6, 15)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }

    async fn service(clock: Clock) -> OrderServiceImpl {
        let menu = Arc::new(InMemoryMenuStore::new());
        menu.create(&MenuItem::new(
            "menu-0001".into(),
            "Risotto".into(),
            "Arborio rice, porcini".into(),
            "Mains".into(),
            1850,
            25,
        ))
        .await
        .unwrap();
        let mut sorbet = MenuItem::new(
            "menu-0002".into(),
            "Sorbet".into(),
            "Lemon sorbet".into(),
            "Desserts".into(),
            600,
            5,
        );
        sorbet.available = false;
        menu.create(&sorbet).await.unwrap();

        let tables = Arc::new(InMemoryTableStore::new());
        tables
            .create(&Table::new("tbl-0001".into(), 4, 4, "Main".into()))
            .await
            .unwrap();

        let reservations = Arc::new(InMemoryReservationStore::new());
        for (id, date) in [("res-0001", "2025-06-15"), ("res-0002", "2025-06-16")] {
            reservations
                .create(&Reservation {
                    id: id.to_string(),
                    date: date.to_string(),
                    time: "19:30".to_string(),
                    party_size: 2,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        OrderServiceImpl::new(
            Arc::new(InMemoryOrderStore::new()),
            menu,
            reservations,
            tables,
            Config::default(),
        )
        .with_clock(clock)
    }

    fn request(reservation_id: Option<&str>, prep: Option<u32>) -> OrderRequest {
        OrderRequest {
            table_number: 4,
            customer_name: "Ana".to_string(),
            items: vec![OrderLineRequest {
                menu_item_id: "menu-0001".to_string(),
                quantity: 2,
            }],
            estimated_prep_time: prep,
            reservation_id: reservation_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_order_uses_slowest_item() {
        let service = service(clock_at(12, 0)).await;
        let order = service.create_order(request(None, None)).await.unwrap();
        assert_eq!(order.id, "ord-0001");
        assert_eq!(order.estimated_prep_time, 25);
        assert_eq!(order.total_cents(), 3700);
        assert_eq!(order.prep_warning, None);
    }

    #[tokio::test]
    async fn test_create_order_rejects_bad_lines() {
        let service = service(clock_at(12, 0)).await;
        let err = service
            .create_order(OrderRequest {
                items: vec![
                    OrderLineRequest {
                        menu_item_id: "menu-0002".to_string(),
                        quantity: 1,
                    },
                    OrderLineRequest {
                        menu_item_id: "menu-9999".to_string(),
                        quantity: 1,
                    },
                ],
                ..request(None, None)
            })
            .await
            .unwrap_err();

        match err {
            DeskError::Validation(validation) => {
                assert_eq!(validation.error_for("items"), Some("Sorbet is not available"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let err = service
            .create_order(OrderRequest {
                items: vec![],
                ..request(None, None)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_order_unknown_table() {
        let service = service(clock_at(12, 0)).await;
        let err = service
            .create_order(OrderRequest {
                table_number: 12,
                ..request(None, None)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_same_day_order_measured_from_now() {
        // 17:00 + 45 prep + 15 buffer = 18:00, well before 19:30
        let service = service(clock_at(17, 0)).await;
        let order = service
            .create_order(request(Some("res-0001"), Some(45)))
            .await
            .unwrap();
        assert_eq!(order.reservation_id.as_deref(), Some("res-0001"));
        assert_eq!(order.prep_warning, None);

        // 18:45 + 45 + 15 = 19:45, past 19:30
        let service = self::service(clock_at(18, 45)).await;
        let order = service
            .create_order(request(Some("res-0001"), Some(45)))
            .await
            .unwrap();
        assert!(order.prep_warning.unwrap().contains("15 min short"));
    }

    #[tokio::test]
    async fn test_future_reservation_never_warns() {
        let service = service(clock_at(19, 29)).await;
        let order = service
            .create_order(request(Some("res-0002"), Some(120)))
            .await
            .unwrap();
        assert_eq!(order.prep_warning, None);
    }

    #[tokio::test]
    async fn test_check_feasibility_branches() {
        let service = service(clock_at(12, 0)).await;
        let slow = service
            .create_order(request(Some("res-0002"), Some(45)))
            .await
            .unwrap();
        let quick = service
            .create_order(request(Some("res-0002"), Some(10)))
            .await
            .unwrap();

        let result = service.check_feasibility(&slow.id, None).await.unwrap();
        assert_eq!(result.suggested_start_minutes, 19 * 60);
        assert!(!result.fits);

        let result = service.check_feasibility(&quick.id, None).await.unwrap();
        assert!(result.fits);

        let result = service
            .check_feasibility(&slow.id, Some("18:00".to_string()))
            .await
            .unwrap();
        assert!(result.fits);

        let err = service
            .check_feasibility(&slow.id, Some("6pm".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
    }

    #[tokio::test]
    async fn test_check_feasibility_requires_reservation() {
        let service = service(clock_at(12, 0)).await;
        let order = service.create_order(request(None, None)).await.unwrap();
        let err = service.check_feasibility(&order.id, None).await.unwrap_err();
        assert!(matches!(err, DeskError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let service = service(clock_at(12, 0)).await;
        let order = service.create_order(request(None, None)).await.unwrap();

        service
            .update_status(&order.id, OrderStatus::Preparing)
            .await
            .unwrap();
        service
            .update_status(&order.id, OrderStatus::Served)
            .await
            .unwrap();
        let err = service
            .update_status(&order.id, OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::InvalidRequest(_)));

        let served = service
            .list_orders(Some(OrderStatus::Served), Some(4))
            .await
            .unwrap();
        assert_eq!(served.len(), 1);

        service.delete_order(&order.id).await.unwrap();
        assert!(service.list_orders(None, None).await.unwrap().is_empty());
    }
}
