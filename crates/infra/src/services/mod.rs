//! Application services: orchestrate domain rules over the record-access traits.
//!
//! Services contain no IO themselves; every read/write goes through an injected
//! DAO, so they run unchanged against in-memory or Postgres backends.

pub mod order;
pub mod table_group;

pub use order::OrderService;
pub use table_group::TableGroupService;
