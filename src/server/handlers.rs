//! MCP tool handlers for the restaurant desk.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::config::Config;
use crate::domain::validation::{
    capacity_error, category_error, description_error, email_error, future_date_error, name_error,
    party_size_error, phone_error, price_error, table_number_error, time_error,
};
use crate::domain::{
    compute_suggested_prep_start, format_minutes_to_time, format_phone_number,
    get_phone_max_length, is_within_business_hours, lookup_phone_metadata, parse_time_to_minutes,
    PhoneCountrySummary, PhoneNumber, ValidationOutcome, PHONE_PROFILES,
};
use crate::models::{OrderStatus, ReservationStatus, TableStatus};
use crate::services::{
    DeskServices, MenuItemRequest, OrderLineRequest, OrderRequest, ReservationRequest,
    TableRequest,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The MCP server that exposes the restaurant desk tools.
#[derive(Clone)]
pub struct RestaurantDeskServer {
    services: DeskServices,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for RestaurantDeskServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "restaurant-desk".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Restaurant back-office desk - reservations, orders, menu and tables, with prep-time scheduling and per-country phone formatting.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ConvertTimeParams {
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    minutes: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SuggestPrepStartParams {
    reservation_time: String,
    #[serde(default)]
    lead_time_minutes: Option<u32>,
    #[serde(default)]
    fallback_minutes: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckPrepFeasibilityParams {
    reservation_time: String,
    estimated_prep_minutes: u32,
    #[serde(default)]
    start_time: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatPhoneParams {
    phone: String,
    #[serde(default)]
    country_code: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateFieldParams {
    field: String,
    value: String,
    #[serde(default)]
    country_code: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ReservationParams {
    customer_name: String,
    #[serde(default)]
    email: Option<String>,
    phone: String,
    #[serde(default)]
    country_code: Option<String>,
    date: String,
    time: String,
    party_size: u32,
    #[serde(default)]
    table_number: Option<u32>,
    #[serde(default)]
    special_requests: Option<String>,
}

impl From<ReservationParams> for ReservationRequest {
    fn from(params: ReservationParams) -> Self {
        Self {
            customer_name: params.customer_name,
            email: params.email,
            phone: params.phone,
            country_code: params.country_code,
            date: params.date,
            time: params.time,
            party_size: params.party_size.to_string(),
            table_number: params.table_number,
            special_requests: params.special_requests,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListReservationsParams {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateReservationStatusParams {
    reservation_id: String,
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct OrderLineParams {
    menu_item_id: String,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateOrderParams {
    table_number: u32,
    customer_name: String,
    items: Vec<OrderLineParams>,
    #[serde(default)]
    estimated_prep_time: Option<u32>,
    #[serde(default)]
    reservation_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListOrdersParams {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    table_number: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateOrderStatusParams {
    order_id: String,
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CheckOrderFeasibilityParams {
    order_id: String,
    #[serde(default)]
    start_time: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListMenuItemsParams {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateMenuItemParams {
    name: String,
    description: String,
    category: String,
    price: String,
    prep_time_minutes: u32,
    #[serde(default)]
    available: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListTablesParams {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateTableParams {
    number: u32,
    capacity: u32,
    location: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateTableStatusParams {
    table_number: u32,
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FindAvailableTablesParams {
    party_size: u32,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn to_invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

fn parse_status<T: std::str::FromStr<Err = String>>(
    status: Option<&str>,
) -> Result<Option<T>, McpError> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>().map_err(to_invalid_params))
        .transpose()
}

// Tool router implementation
#[tool_router]
impl RestaurantDeskServer {
    /// Create a new restaurant desk server.
    pub fn new(services: DeskServices, config: Config) -> Self {
        Self {
            services,
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of every registered tool.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Convert between `HH:MM` and minutes since midnight.
    #[tool(
        description = "Convert a time of day between HH:MM and minutes since midnight. Pass `time` to parse or `minutes` to format; also reports whether the time falls inside business hours."
    )]
    async fn convert_time(
        &self,
        params: Parameters<ConvertTimeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let (open_hour, close_hour) = self.config.business_hours().bounds();

        let response = match (params.time, params.minutes) {
            (Some(time), _) => {
                let minutes = parse_time_to_minutes(&time);
                serde_json::json!({
                    "time": time,
                    "valid": minutes.is_some(),
                    "minutes": minutes,
                    "canonical": minutes.map(|m| format_minutes_to_time(m as i64)),
                    "within_business_hours": is_within_business_hours(&time, open_hour, close_hour),
                })
            }
            (None, Some(minutes)) => {
                let time = format_minutes_to_time(minutes);
                serde_json::json!({
                    "minutes": minutes,
                    "time": time,
                    "within_business_hours": is_within_business_hours(&time, open_hour, close_hour),
                })
            }
            (None, None) => return Err(to_invalid_params("Provide either `time` or `minutes`")),
        };

        json_result(&response)
    }

    /// Suggest when kitchen prep should begin for a reservation.
    #[tool(
        description = "Suggest when kitchen prep should begin for a reservation time (HH:MM). Uses the configured lead time unless `lead_time_minutes` is given; `fallback_minutes` is returned when the time does not parse."
    )]
    async fn suggest_prep_start(
        &self,
        params: Parameters<SuggestPrepStartParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let lead_time = params
            .lead_time_minutes
            .unwrap_or(self.config.prep_lead_time_minutes);

        let suggested = compute_suggested_prep_start(
            &params.reservation_time,
            lead_time,
            params.fallback_minutes,
        );

        json_result(&serde_json::json!({
            "reservation_time": params.reservation_time,
            "lead_time_minutes": lead_time,
            "suggested_start_minutes": suggested,
            "suggested_start": suggested.map(|m| format_minutes_to_time(m as i64)),
        }))
    }

    /// Check whether a prep estimate fits before a reservation.
    #[tool(
        description = "Check whether an estimated prep time fits before a reservation, leaving the configured safety buffer. Measured from `start_time` (HH:MM) when given, otherwise from the suggested prep start."
    )]
    async fn check_prep_feasibility(
        &self,
        params: Parameters<CheckPrepFeasibilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let start_reference = match params.start_time.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(time) => Some(parse_time_to_minutes(time).ok_or_else(|| {
                to_invalid_params(format!("Invalid start time: {} (expected HH:MM)", time))
            })?),
            None => None,
        };

        let feasibility = self
            .config
            .prep_policy()
            .check(
                &params.reservation_time,
                params.estimated_prep_minutes,
                start_reference,
            )
            .ok_or_else(|| {
                to_invalid_params(format!(
                    "Invalid reservation time: {} (expected HH:MM)",
                    params.reservation_time
                ))
            })?;

        json_result(&serde_json::json!({
            "feasibility": feasibility,
            "suggested_start": format_minutes_to_time(feasibility.suggested_start_minutes as i64),
            "latest_start": format_minutes_to_time(feasibility.latest_start_minutes),
            "warning": feasibility.warning(),
        }))
    }

    /// Format and validate a phone number for a country.
    #[tool(
        description = "Format a phone number using a country's display pattern and check its digit count. Country codes look like \"+33-FR\" or \"FR\"; unknown codes fall back to US."
    )]
    async fn format_phone(
        &self,
        params: Parameters<FormatPhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let country_code = params
            .country_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.config.default_country_code.clone());

        let lookup = lookup_phone_metadata(&country_code);
        let key = lookup.profile.key();
        let response = match PhoneNumber::new(&params.phone, &key) {
            Ok(number) => serde_json::json!({
                "valid": true,
                "formatted": number.as_str(),
                "international": number.international(),
                "country": PhoneCountrySummary::from(number.profile()),
                "used_fallback": lookup.used_fallback,
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "formatted": format_phone_number(&params.phone, &key),
                "error": e.to_string(),
                "country": PhoneCountrySummary::from(lookup.profile),
                "max_length": get_phone_max_length(&key),
                "used_fallback": lookup.used_fallback,
            }),
        };

        json_result(&response)
    }

    /// List supported phone countries.
    #[tool(description = "List the supported phone countries with their dial codes, digit counts and display patterns")]
    async fn list_phone_countries(&self) -> Result<CallToolResult, McpError> {
        let countries: Vec<PhoneCountrySummary> =
            PHONE_PROFILES.iter().map(PhoneCountrySummary::from).collect();
        json_result(&countries)
    }

    /// Validate a single form field.
    #[tool(
        description = "Validate a single form field: name, email, phone, date, time, party_size, table_number, capacity, description, category or price. Returns is_valid and an error message."
    )]
    async fn validate_field(
        &self,
        params: Parameters<ValidateFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let value = params.value.as_str();

        let error = match params.field.trim().to_lowercase().as_str() {
            "name" | "customer_name" => name_error(value),
            "email" => email_error(value.trim()),
            "phone" => {
                let country_code = params
                    .country_code
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or(self.config.default_country_code.as_str());
                phone_error(value, country_code)
            }
            "date" => future_date_error(value, self.services.clock.today()),
            "time" => time_error(value.trim(), self.config.business_hours()),
            "party_size" => party_size_error(
                value,
                self.config.min_party_size,
                self.config.max_party_size,
            ),
            "table_number" => table_number_error(value),
            "capacity" => capacity_error(value),
            "description" => description_error(value),
            "category" => category_error(value),
            "price" => price_error(value),
            other => return Err(to_invalid_params(format!("Unknown field: {}", other))),
        };

        json_result(&ValidationOutcome::from(error))
    }

    /// Run the booking form validators without storing anything.
    #[tool(
        description = "Validate a reservation form without saving it. Returns per-field error messages."
    )]
    async fn validate_reservation(
        &self,
        params: Parameters<ReservationParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = ReservationRequest::from(params.0);
        let validation = self.services.reservations.validate_reservation(&request);
        json_result(&validation)
    }

    /// Create a reservation.
    #[tool(
        description = "Create a reservation. The phone number is stored in the country's display format; an optional table must exist, seat the party and be free at that time."
    )]
    async fn create_reservation(
        &self,
        params: Parameters<ReservationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: create_reservation called");
        tracing::debug!(
            "Parameters: date={}, time={}, party_size={}, table={:?}",
            params.date,
            params.time,
            params.party_size,
            params.table_number
        );

        let reservation = self
            .services
            .reservations
            .create_reservation(params.into())
            .await
            .map_err(|e| {
                tracing::error!("Failed to create reservation: {:?}", e);
                to_mcp_error(e)
            })?;

        tracing::info!("Reservation created successfully: id={}", reservation.id);
        json_result(&reservation)
    }

    /// List reservations in service order.
    #[tool(
        description = "List reservations in service order, optionally filtered by date (YYYY-MM-DD) and status (pending, confirmed, seated, completed, cancelled)"
    )]
    async fn list_reservations(
        &self,
        params: Parameters<ListReservationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let status = parse_status::<ReservationStatus>(params.status.as_deref())?;

        let reservations = self
            .services
            .reservations
            .list_reservations(params.date, status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&reservations)
    }

    /// Move a reservation to a new status.
    #[tool(
        description = "Move a reservation to a new status. Seating occupies its table and completing marks it for cleaning. Cancelling frees the table only if the party was already seated. Completed and cancelled reservations are final."
    )]
    async fn update_reservation_status(
        &self,
        params: Parameters<UpdateReservationStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let status = params
            .status
            .parse::<ReservationStatus>()
            .map_err(to_invalid_params)?;

        let reservation = self
            .services
            .reservations
            .update_status(&params.reservation_id, status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&reservation)
    }

    /// Create an order.
    #[tool(
        description = "Create an order for a table. Prep time defaults to the slowest item; orders linked to a reservation get a warning when prep may not finish in time."
    )]
    async fn create_order(
        &self,
        params: Parameters<CreateOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: create_order called");
        tracing::debug!(
            "Parameters: table={}, lines={}, reservation_id={:?}",
            params.table_number,
            params.items.len(),
            params.reservation_id
        );

        let request = OrderRequest {
            table_number: params.table_number,
            customer_name: params.customer_name,
            items: params
                .items
                .into_iter()
                .map(|line| OrderLineRequest {
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                })
                .collect(),
            estimated_prep_time: params.estimated_prep_time,
            reservation_id: params.reservation_id,
        };

        let order = self
            .services
            .orders
            .create_order(request)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create order: {:?}", e);
                to_mcp_error(e)
            })?;

        tracing::info!("Order created successfully: id={}", order.id);
        json_result(&serde_json::json!({
            "order": order,
            "total": format!("{}.{:02}", order.total_cents() / 100, order.total_cents() % 100),
        }))
    }

    /// List orders.
    #[tool(
        description = "List orders, optionally filtered by status (pending, preparing, ready, served, cancelled) and table number"
    )]
    async fn list_orders(
        &self,
        params: Parameters<ListOrdersParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let status = parse_status::<OrderStatus>(params.status.as_deref())?;

        let orders = self
            .services
            .orders
            .list_orders(status, params.table_number)
            .await
            .map_err(to_mcp_error)?;

        json_result(&orders)
    }

    /// Move an order to a new status.
    #[tool(description = "Move an order to a new status. Served and cancelled orders are final.")]
    async fn update_order_status(
        &self,
        params: Parameters<UpdateOrderStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let status = params
            .status
            .parse::<OrderStatus>()
            .map_err(to_invalid_params)?;

        let order = self
            .services
            .orders
            .update_status(&params.order_id, status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&order)
    }

    /// Re-check prep feasibility for an order linked to a reservation.
    #[tool(
        description = "Re-check whether an order linked to a reservation can be prepared in time, measured from `start_time` (HH:MM) or the suggested prep start"
    )]
    async fn check_order_feasibility(
        &self,
        params: Parameters<CheckOrderFeasibilityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let feasibility = self
            .services
            .orders
            .check_feasibility(&params.order_id, params.start_time)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "order_id": params.order_id,
            "feasibility": feasibility,
            "warning": feasibility.warning(),
        }))
    }

    /// List menu items.
    #[tool(description = "List menu items sorted by category and name, optionally for one category")]
    async fn list_menu_items(
        &self,
        params: Parameters<ListMenuItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let items = self
            .services
            .menu
            .list_items(params.0.category)
            .await
            .map_err(to_mcp_error)?;

        json_result(&items)
    }

    /// Add a menu item.
    #[tool(
        description = "Add a menu item. Price is a decimal amount such as \"12.50\"; prep time is in minutes."
    )]
    async fn create_menu_item(
        &self,
        params: Parameters<CreateMenuItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let item = self
            .services
            .menu
            .create_item(MenuItemRequest {
                name: params.name,
                description: params.description,
                category: params.category,
                price: params.price,
                prep_time_minutes: params.prep_time_minutes,
                available: params.available,
            })
            .await
            .map_err(to_mcp_error)?;

        json_result(&item)
    }

    /// List tables.
    #[tool(
        description = "List tables by number, optionally filtered by status (available, occupied, reserved, cleaning)"
    )]
    async fn list_tables(
        &self,
        params: Parameters<ListTablesParams>,
    ) -> Result<CallToolResult, McpError> {
        let status = parse_status::<TableStatus>(params.0.status.as_deref())?;

        let tables = self
            .services
            .tables
            .list_tables(status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&tables)
    }

    /// Add a table to the floor plan.
    #[tool(description = "Add a table to the floor plan. Table numbers are unique.")]
    async fn create_table(
        &self,
        params: Parameters<CreateTableParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let table = self
            .services
            .tables
            .create_table(TableRequest {
                number: params.number.to_string(),
                capacity: params.capacity.to_string(),
                location: params.location,
            })
            .await
            .map_err(to_mcp_error)?;

        json_result(&table)
    }

    /// Change a table's floor status.
    #[tool(description = "Change a table's status (available, occupied, reserved, cleaning)")]
    async fn update_table_status(
        &self,
        params: Parameters<UpdateTableStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let status = params
            .status
            .parse::<TableStatus>()
            .map_err(to_invalid_params)?;

        let table = self
            .services
            .tables
            .update_status(params.table_number, status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&table)
    }

    /// Find free tables for a party.
    #[tool(
        description = "Find available tables that seat a party, smallest suitable table first"
    )]
    async fn find_available_tables(
        &self,
        params: Parameters<FindAvailableTablesParams>,
    ) -> Result<CallToolResult, McpError> {
        let party_size = params.0.party_size;

        let tables = self
            .services
            .tables
            .find_available(&party_size.to_string())
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "party_size": party_size,
            "table_count": tables.len(),
            "tables": tables,
        }))
    }
}
