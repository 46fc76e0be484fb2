use std::sync::Arc;

use kitchenpos_core::{OrderTableId, TableGroupId};
use kitchenpos_tables::OrderTable;

use crate::error::StoreError;

/// Read/write access to persisted `order_table` rows.
///
/// ## Save Semantics
///
/// - A table without identity is inserted and returned with its generated id.
/// - A table with identity updates the row with that id in place and is returned
///   unchanged. Updating an id with no row is a no-op, as with SQL `UPDATE`.
pub trait OrderTableDao: Send + Sync {
    fn save(&self, table: OrderTable) -> Result<OrderTable, StoreError>;

    /// `Ok(None)` when no row has this id.
    fn find_by_id(&self, id: OrderTableId) -> Result<Option<OrderTable>, StoreError>;

    fn find_all(&self) -> Result<Vec<OrderTable>, StoreError>;

    /// The existing subset of `ids`; unknown ids are skipped.
    fn find_all_by_id_in(&self, ids: &[OrderTableId]) -> Result<Vec<OrderTable>, StoreError>;

    fn find_all_by_table_group_id(
        &self,
        table_group_id: TableGroupId,
    ) -> Result<Vec<OrderTable>, StoreError>;
}

impl<D> OrderTableDao for Arc<D>
where
    D: OrderTableDao + ?Sized,
{
    fn save(&self, table: OrderTable) -> Result<OrderTable, StoreError> {
        (**self).save(table)
    }

    fn find_by_id(&self, id: OrderTableId) -> Result<Option<OrderTable>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<OrderTable>, StoreError> {
        (**self).find_all()
    }

    fn find_all_by_id_in(&self, ids: &[OrderTableId]) -> Result<Vec<OrderTable>, StoreError> {
        (**self).find_all_by_id_in(ids)
    }

    fn find_all_by_table_group_id(
        &self,
        table_group_id: TableGroupId,
    ) -> Result<Vec<OrderTable>, StoreError> {
        (**self).find_all_by_table_group_id(table_group_id)
    }
}
