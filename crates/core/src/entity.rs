//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the persistence layer after a successful insert, so a
/// freshly constructed entity has none.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if it has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// True until the entity has been assigned an identity.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
