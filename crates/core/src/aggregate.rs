//! Aggregate root trait for domain models that guard their own invariants.

use crate::entity::Entity;

/// Aggregate root marker.
///
/// An aggregate root is the only entry point for mutating the entities it owns
/// (e.g. an order owns its line items). Mutation happens through named domain
/// operations, never through public fields.
pub trait AggregateRoot: Entity {
    /// Name used for logging and error context.
    const AGGREGATE_TYPE: &'static str;
}
