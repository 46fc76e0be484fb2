use std::sync::Arc;

use kitchenpos_core::MenuId;

use crate::error::StoreError;

/// Menu existence lookup owned by the catalog.
pub trait MenuCatalog: Send + Sync {
    /// Number of distinct menus among `ids` that exist (SQL `COUNT ... WHERE id IN`).
    fn count_by_id_in(&self, ids: &[MenuId]) -> Result<usize, StoreError>;
}

impl<D> MenuCatalog for Arc<D>
where
    D: MenuCatalog + ?Sized,
{
    fn count_by_id_in(&self, ids: &[MenuId]) -> Result<usize, StoreError> {
        (**self).count_by_id_in(ids)
    }
}
