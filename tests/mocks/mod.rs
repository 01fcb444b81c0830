//! Hand-written mock stores with call counting.

mod mock_menu_store;
mod mock_order_store;
mod mock_reservation_store;
mod mock_table_store;

#[allow(unused_imports)]
pub use mock_menu_store::MockMenuStore;
#[allow(unused_imports)]
pub use mock_order_store::MockOrderStore;
#[allow(unused_imports)]
pub use mock_reservation_store::MockReservationStore;
#[allow(unused_imports)]
pub use mock_table_store::MockTableStore;
