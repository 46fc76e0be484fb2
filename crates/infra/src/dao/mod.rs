//! Record-access contracts and their backends.
//!
//! The traits are synchronous: each call is one round trip to the backing store.
//! In-memory backends serve tests/dev; the Postgres backend persists tables.

pub mod in_memory;
pub mod menu;
pub mod order;
pub mod order_table;
pub mod postgres;

pub use in_memory::{
    InMemoryMenuCatalog, InMemoryOrderDao, InMemoryOrderLineItemDao, InMemoryOrderTableDao,
};
pub use menu::MenuCatalog;
pub use order::{OrderDao, OrderLineItemDao};
pub use order_table::OrderTableDao;
pub use postgres::PostgresOrderTableDao;
