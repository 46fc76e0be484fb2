use serde::{Deserialize, Serialize};

use kitchenpos_core::{DomainError, DomainResult, Entity, OrderTableId, TableGroupId};

/// A seating unit, optionally part of a table group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTable {
    id: Option<OrderTableId>,
    table_group_id: Option<TableGroupId>,
    number_of_guests: u32,
    empty: bool,
}

impl OrderTable {
    /// New, not-yet-persisted table.
    pub fn new(table_group_id: Option<TableGroupId>, number_of_guests: u32, empty: bool) -> Self {
        Self {
            id: None,
            table_group_id,
            number_of_guests,
            empty,
        }
    }

    /// Rebuild a persisted `order_table` row.
    pub fn rehydrate(
        id: OrderTableId,
        table_group_id: Option<TableGroupId>,
        number_of_guests: u32,
        empty: bool,
    ) -> Self {
        Self {
            id: Some(id),
            table_group_id,
            number_of_guests,
            empty,
        }
    }

    pub fn table_group_id(&self) -> Option<TableGroupId> {
        self.table_group_id
    }

    pub fn number_of_guests(&self) -> u32 {
        self.number_of_guests
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn is_grouped(&self) -> bool {
        self.table_group_id.is_some()
    }

    pub fn change_empty(&mut self, empty: bool) -> DomainResult<()> {
        if self.is_grouped() {
            return Err(DomainError::invariant(
                "cannot change occupancy of a grouped table",
            ));
        }
        self.empty = empty;
        Ok(())
    }

    pub fn change_number_of_guests(&mut self, number_of_guests: u32) -> DomainResult<()> {
        if self.empty {
            return Err(DomainError::validation(
                "cannot seat guests at an empty table",
            ));
        }
        self.number_of_guests = number_of_guests;
        Ok(())
    }

    /// Leave the current group. The caller is responsible for checking
    /// eligibility first (see [`crate::TableGroupMembers`]).
    pub fn ungroup(&mut self) {
        self.table_group_id = None;
    }
}

impl Entity for OrderTable {
    type Id = OrderTableId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}
