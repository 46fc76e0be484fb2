//! In-memory record stores.
//!
//! Intended for tests/dev. Identities come from a per-store counter, mimicking
//! `BIGSERIAL` columns: they start at 1 and are never reused.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use tracing::debug;

use kitchenpos_core::{Entity, LineItemSeq, MenuId, OrderId, OrderTableId, TableGroupId};
use kitchenpos_orders::{OrderHeader, OrderLineItem};
use kitchenpos_tables::OrderTable;

use super::menu::MenuCatalog;
use super::order::{OrderDao, OrderLineItemDao};
use super::order_table::OrderTableDao;
use crate::error::StoreError;

#[derive(Debug)]
struct Rows<K, V> {
    rows: BTreeMap<K, V>,
    last_id: i64,
}

impl<K, V> Default for Rows<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<K, V> Rows<K, V> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory `order_table` store.
#[derive(Debug, Default)]
pub struct InMemoryOrderTableDao {
    inner: RwLock<Rows<OrderTableId, OrderTable>>,
}

impl InMemoryOrderTableDao {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderTableDao for InMemoryOrderTableDao {
    fn save(&self, table: OrderTable) -> Result<OrderTable, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        if let Some(id) = table.id() {
            if let Some(row) = inner.rows.get_mut(&id) {
                *row = table.clone();
                debug!(order_table_id = %id, "updated order table");
            }
            return Ok(table);
        }

        let id = OrderTableId::new(inner.next_id());
        let saved = OrderTable::rehydrate(
            id,
            table.table_group_id(),
            table.number_of_guests(),
            table.is_empty(),
        );
        inner.rows.insert(id, saved.clone());
        debug!(order_table_id = %id, "inserted order table");
        Ok(saved)
    }

    fn find_by_id(&self, id: OrderTableId) -> Result<Option<OrderTable>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<OrderTable>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    fn find_all_by_id_in(&self, ids: &[OrderTableId]) -> Result<Vec<OrderTable>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .rows
            .iter()
            .filter(|(id, _)| ids.contains(*id))
            .map(|(_, table)| table.clone())
            .collect())
    }

    fn find_all_by_table_group_id(
        &self,
        table_group_id: TableGroupId,
    ) -> Result<Vec<OrderTable>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .rows
            .values()
            .filter(|table| table.table_group_id() == Some(table_group_id))
            .cloned()
            .collect())
    }
}

/// In-memory `orders` store.
#[derive(Debug, Default)]
pub struct InMemoryOrderDao {
    inner: RwLock<Rows<OrderId, OrderHeader>>,
}

impl InMemoryOrderDao {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderDao for InMemoryOrderDao {
    fn save(&self, order: OrderHeader) -> Result<OrderHeader, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        if let Some(id) = order.id() {
            if let Some(row) = inner.rows.get_mut(&id) {
                *row = order.clone();
                debug!(order_id = %id, status = %order.status(), "updated order");
            }
            return Ok(order);
        }

        let id = OrderId::new(inner.next_id());
        let saved = OrderHeader::rehydrate(
            id,
            order.order_table_id(),
            order.status(),
            order.ordered_time(),
        );
        inner.rows.insert(id, saved.clone());
        debug!(order_id = %id, "inserted order");
        Ok(saved)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<OrderHeader>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<OrderHeader>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    fn find_all_by_order_table_id_in(
        &self,
        order_table_ids: &[OrderTableId],
    ) -> Result<Vec<OrderHeader>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .rows
            .values()
            .filter(|order| order_table_ids.contains(&order.order_table_id()))
            .cloned()
            .collect())
    }
}

/// In-memory `order_line_item` store.
#[derive(Debug, Default)]
pub struct InMemoryOrderLineItemDao {
    inner: RwLock<Rows<LineItemSeq, OrderLineItem>>,
}

impl InMemoryOrderLineItemDao {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderLineItemDao for InMemoryOrderLineItemDao {
    fn save(&self, item: OrderLineItem) -> Result<OrderLineItem, StoreError> {
        if item.seq().is_some() {
            return Ok(item);
        }
        let Some(order_id) = item.order_id() else {
            return Err(StoreError::Database {
                operation: "save_order_line_item",
                message: "order_id must not be null".to_string(),
            });
        };

        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let seq = LineItemSeq::new(inner.next_id());
        let saved = OrderLineItem::rehydrate(seq, order_id, item.menu_id(), item.quantity());
        inner.rows.insert(seq, saved.clone());
        Ok(saved)
    }

    fn find_all_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderLineItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .rows
            .values()
            .filter(|item| item.order_id() == Some(order_id))
            .cloned()
            .collect())
    }
}

/// In-memory menu catalog: a set of existing menu ids.
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    menus: RwLock<BTreeSet<MenuId>>,
}

impl InMemoryMenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menus(ids: impl IntoIterator<Item = MenuId>) -> Self {
        Self {
            menus: RwLock::new(ids.into_iter().collect()),
        }
    }

    pub fn add(&self, id: MenuId) -> Result<(), StoreError> {
        let mut menus = self.menus.write().map_err(|_| StoreError::LockPoisoned)?;
        menus.insert(id);
        Ok(())
    }
}

impl MenuCatalog for InMemoryMenuCatalog {
    fn count_by_id_in(&self, ids: &[MenuId]) -> Result<usize, StoreError> {
        let menus = self.menus.read().map_err(|_| StoreError::LockPoisoned)?;
        let wanted: BTreeSet<&MenuId> = ids.iter().collect();
        Ok(wanted.into_iter().filter(|id| menus.contains(*id)).count())
    }
}
