//! `kitchenpos-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the entity/aggregate traits shared by
//! the order and table modules.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{LineItemSeq, MenuId, OrderId, OrderTableId, TableGroupId};
