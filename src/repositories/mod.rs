mod in_memory;
mod traits;

pub use in_memory::{
    InMemoryMenuStore, InMemoryOrderStore, InMemoryReservationStore, InMemoryTableStore, Record,
};
pub use traits::{MenuStore, OrderStore, ReservationStore, TableStore};
