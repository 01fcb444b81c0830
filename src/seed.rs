//! Demo data for a freshly started desk.
//!
//! Everything goes through the services so records pass the same validation
//! and receive the same generated IDs as live input.

use crate::error::DeskResult;
use crate::services::{
    DeskServices, MenuItemRequest, OrderLineRequest, OrderRequest, ReservationRequest,
    TableRequest,
};
use chrono::{Days, NaiveDate};

/// Counts of seeded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub menu_items: usize,
    pub tables: usize,
    pub reservations: usize,
    pub orders: usize,
}

const MENU: &[(&str, &str, &str, &str, u32)] = &[
    ("Burrata", "Burrata, heirloom tomatoes, basil oil", "Starters", "12.50", 10),
    ("Mushroom Risotto", "Carnaroli rice, porcini, parmesan", "Mains", "21.00", 25),
    ("Short Rib", "Slow-braised beef, polenta, gremolata", "Mains", "28.00", 35),
    ("Tiramisu", "Mascarpone, espresso-soaked savoiardi", "Desserts", "9.00", 5),
];

const TABLES: &[(&str, &str, &str)] = &[
    ("1", "2", "Window"),
    ("2", "2", "Window"),
    ("4", "4", "Main room"),
    ("6", "6", "Main room"),
    ("8", "8", "Patio"),
];

/// Populate empty stores with a small menu, floor plan and bookings for `today`.
pub async fn seed_demo_data(
    services: &DeskServices,
    today: NaiveDate,
) -> DeskResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut menu_ids = Vec::with_capacity(MENU.len());
    for (name, description, category, price, prep) in MENU {
        let item = services
            .menu
            .create_item(MenuItemRequest {
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                price: price.to_string(),
                prep_time_minutes: *prep,
                available: None,
            })
            .await?;
        menu_ids.push(item.id);
        summary.menu_items += 1;
    }

    for (number, capacity, location) in TABLES {
        services
            .tables
            .create_table(TableRequest {
                number: number.to_string(),
                capacity: capacity.to_string(),
                location: location.to_string(),
            })
            .await?;
        summary.tables += 1;
    }

    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let bookings = [
        ("Ana Lima", "+1-US", "5551234567", today, "19:30", "4", 4),
        ("Camille Durand", "+33-FR", "612345678", today, "20:00", "2", 2),
        ("Oliver Brown", "+44-GB", "7700900123", tomorrow, "18:45", "6", 6),
    ];

    let mut first_reservation = None;
    for (name, country, phone, date, time, party, table) in bookings {
        let reservation = services
            .reservations
            .create_reservation(ReservationRequest {
                customer_name: name.to_string(),
                email: None,
                phone: phone.to_string(),
                country_code: Some(country.to_string()),
                date: date.format("%Y-%m-%d").to_string(),
                time: time.to_string(),
                party_size: party.to_string(),
                table_number: Some(table),
                special_requests: None,
            })
            .await?;
        first_reservation.get_or_insert(reservation);
        summary.reservations += 1;
    }

    if let Some(reservation) = first_reservation {
        if let Some(table_number) = reservation.table_number {
            let items = menu_ids
                .iter()
                .take(2)
                .map(|id| OrderLineRequest {
                    menu_item_id: id.clone(),
                    quantity: 2,
                })
                .collect();

            services
                .orders
                .create_order(OrderRequest {
                    table_number,
                    customer_name: reservation.customer_name,
                    items,
                    estimated_prep_time: None,
                    reservation_id: Some(reservation.id),
                })
                .await?;
            summary.orders += 1;
        }
    }

    tracing::info!(
        "Seeded demo data: {} menu items, {} tables, {} reservations, {} orders",
        summary.menu_items,
        summary.tables,
        summary.reservations,
        summary.orders
    );
    Ok(summary)
}
