//! Table-group membership and the ungroup rule.

use kitchenpos_core::{DomainError, DomainResult, Entity, OrderTableId, TableGroupId};
use kitchenpos_orders::OrderHeader;

use crate::table::OrderTable;

/// The tables currently belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGroupMembers {
    group_id: TableGroupId,
    tables: Vec<OrderTable>,
}

impl TableGroupMembers {
    /// Every table must be persisted and belong to `group_id`.
    pub fn new(group_id: TableGroupId, tables: Vec<OrderTable>) -> DomainResult<Self> {
        for table in &tables {
            if table.is_new() {
                return Err(DomainError::validation(
                    "table group members must be persisted tables",
                ));
            }
            if table.table_group_id() != Some(group_id) {
                return Err(DomainError::invariant(format!(
                    "table {:?} does not belong to group {group_id}",
                    table.id()
                )));
            }
        }
        Ok(Self { group_id, tables })
    }

    pub fn table_ids(&self) -> Vec<OrderTableId> {
        self.tables.iter().filter_map(Entity::id).collect()
    }

    /// Fails if any order placed at a member table is still active.
    ///
    /// Orders for tables outside the group are ignored.
    pub fn ensure_ungroupable<'a, I>(&self, orders: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = &'a OrderHeader>,
    {
        let member_ids = self.table_ids();
        let blocked = orders
            .into_iter()
            .filter(|order| member_ids.contains(&order.order_table_id()))
            .find(|order| order.is_ungroup_blocked());

        match blocked {
            Some(order) => Err(DomainError::invariant(format!(
                "table {} in group {} still has an active order ({})",
                order.order_table_id(),
                self.group_id,
                order.status()
            ))),
            None => Ok(()),
        }
    }

    /// Detach every member table from the group.
    pub fn ungroup(self) -> Vec<OrderTable> {
        self.tables
            .into_iter()
            .map(|mut table| {
                table.ungroup();
                table
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kitchenpos_core::OrderId;
    use kitchenpos_orders::OrderStatus;

    fn group() -> TableGroupId {
        TableGroupId::new(10)
    }

    fn member(id: i64) -> OrderTable {
        OrderTable::rehydrate(OrderTableId::new(id), Some(group()), 2, false)
    }

    fn order_at(order_id: i64, table_id: i64, status: OrderStatus) -> OrderHeader {
        OrderHeader::rehydrate(
            OrderId::new(order_id),
            OrderTableId::new(table_id),
            status,
            Utc::now(),
        )
    }

    #[test]
    fn rejects_tables_from_another_group() {
        let stranger =
            OrderTable::rehydrate(OrderTableId::new(3), Some(TableGroupId::new(99)), 2, false);
        let err = TableGroupMembers::new(group(), vec![member(1), stranger]).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn rejects_unsaved_tables() {
        let unsaved = OrderTable::new(Some(group()), 2, false);
        let err = TableGroupMembers::new(group(), vec![unsaved]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn completed_orders_allow_ungroup() {
        let members = TableGroupMembers::new(group(), vec![member(1), member(2)]).unwrap();
        let orders = vec![
            order_at(1, 1, OrderStatus::Completion),
            order_at(2, 2, OrderStatus::Completion),
        ];
        assert!(members.ensure_ungroupable(&orders).is_ok());
    }

    #[test]
    fn any_active_member_order_blocks_ungroup() {
        let members = TableGroupMembers::new(group(), vec![member(1), member(2)]).unwrap();
        for status in [OrderStatus::Cooking, OrderStatus::Meal] {
            let orders = vec![
                order_at(1, 1, OrderStatus::Completion),
                order_at(2, 2, status),
            ];
            assert!(matches!(
                members.ensure_ungroupable(&orders),
                Err(DomainError::InvariantViolation(_))
            ));
        }
    }

    #[test]
    fn blocked_ungroup_names_table_and_group() {
        let members = TableGroupMembers::new(group(), vec![member(4)]).unwrap();
        let orders = vec![order_at(1, 4, OrderStatus::Meal)];
        let err = members.ensure_ungroupable(&orders).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invariant violated: table 4 in group 10 still has an active order (MEAL)"
        );
    }

    #[test]
    fn active_orders_elsewhere_are_ignored() {
        let members = TableGroupMembers::new(group(), vec![member(1)]).unwrap();
        let orders = vec![order_at(1, 7, OrderStatus::Cooking)];
        assert!(members.ensure_ungroupable(&orders).is_ok());
    }

    #[test]
    fn ungroup_detaches_every_member() {
        let members = TableGroupMembers::new(group(), vec![member(1), member(2)]).unwrap();
        let tables = members.ungroup();
        assert_eq!(tables.len(), 2);
        assert!(tables.iter().all(|t| !t.is_grouped()));
    }
}
