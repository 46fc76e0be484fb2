use tracing::{info, instrument, warn};

use kitchenpos_core::TableGroupId;
use kitchenpos_tables::{OrderTable, TableGroupMembers};

use crate::dao::{OrderDao, OrderTableDao};
use crate::error::ServiceError;

/// Table-group use cases. Group formation lives elsewhere; this only ungroups.
pub struct TableGroupService<T, O> {
    tables: T,
    orders: O,
}

impl<T, O> TableGroupService<T, O>
where
    T: OrderTableDao,
    O: OrderDao,
{
    pub fn new(tables: T, orders: O) -> Self {
        Self { tables, orders }
    }

    /// Detach every member table from `table_group_id`.
    ///
    /// Refused while any order at a member table is still `Cooking` or `Meal`;
    /// in that case no table is modified.
    #[instrument(skip(self), fields(table_group_id = %table_group_id), err)]
    pub fn ungroup(&self, table_group_id: TableGroupId) -> Result<Vec<OrderTable>, ServiceError> {
        let tables = self.tables.find_all_by_table_group_id(table_group_id)?;
        let members = TableGroupMembers::new(table_group_id, tables)?;

        let orders = self
            .orders
            .find_all_by_order_table_id_in(&members.table_ids())?;
        if let Err(err) = members.ensure_ungroupable(&orders) {
            warn!(error = %err, "ungroup rejected");
            return Err(err.into());
        }

        let ungrouped = members
            .ungroup()
            .into_iter()
            .map(|table| self.tables.save(table))
            .collect::<Result<Vec<_>, _>>()?;

        info!(tables = ungrouped.len(), "table group dissolved");
        Ok(ungrouped)
    }
}
