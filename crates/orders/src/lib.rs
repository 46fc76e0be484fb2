//! Orders domain module.
//!
//! This crate contains the business rules for restaurant orders: the order
//! aggregate, its line items, and the status workflow. It is implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod line_item;
pub mod order;
pub mod status;

pub use line_item::OrderLineItem;
pub use order::{Order, OrderHeader};
pub use status::OrderStatus;
