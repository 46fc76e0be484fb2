use tracing::{debug, instrument, warn};

use kitchenpos_core::{AggregateRoot, DomainError, Entity, OrderId, OrderTableId};
use kitchenpos_orders::{Order, OrderHeader, OrderLineItem, OrderStatus};

use crate::dao::{MenuCatalog, OrderDao, OrderLineItemDao, OrderTableDao};
use crate::error::{ServiceError, StoreError};

/// Order use cases: placing orders and moving them through the status workflow.
pub struct OrderService<T, O, L, M> {
    tables: T,
    orders: O,
    line_items: L,
    menus: M,
}

impl<T, O, L, M> OrderService<T, O, L, M>
where
    T: OrderTableDao,
    O: OrderDao,
    L: OrderLineItemDao,
    M: MenuCatalog,
{
    pub fn new(tables: T, orders: O, line_items: L, menus: M) -> Self {
        Self {
            tables,
            orders,
            line_items,
            menus,
        }
    }

    /// Place a `Cooking` order at an occupied table.
    ///
    /// Every referenced menu must exist, so repeating a menu across line items is
    /// rejected as a count mismatch.
    #[instrument(
        skip(self, line_items),
        fields(
            aggregate = Order::AGGREGATE_TYPE,
            order_table_id = %order_table_id,
            line_items = line_items.len()
        ),
        err
    )]
    pub fn create(
        &self,
        order_table_id: OrderTableId,
        line_items: Vec<OrderLineItem>,
    ) -> Result<Order, ServiceError> {
        let order = Order::create(order_table_id, line_items)?;

        let existing_menus = self.menus.count_by_id_in(&order.menu_ids())?;
        order.check_actual_order_line_items(existing_menus)?;

        let table = self
            .tables
            .find_by_id(order_table_id)?
            .ok_or_else(DomainError::not_found)?;
        if table.is_empty() {
            return Err(DomainError::validation("cannot order at an empty table").into());
        }

        let (header, line_items) = order.into_parts();
        let saved = self.orders.save(header)?;
        let order_id = saved.id().ok_or(StoreError::MissingIdentity)?;

        let saved_items = line_items
            .into_iter()
            .map(|item| self.line_items.save(item.with_order_id(order_id)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(order_id = %order_id, "order created");
        Ok(saved.attach_line_items(saved_items)?)
    }

    /// Every order, hydrated with its line items.
    pub fn list(&self) -> Result<Vec<Order>, ServiceError> {
        self.orders
            .find_all()?
            .into_iter()
            .map(|header| self.hydrate(header))
            .collect()
    }

    #[instrument(
        skip(self),
        fields(aggregate = Order::AGGREGATE_TYPE, order_id = %order_id, status = %status),
        err
    )]
    pub fn change_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ServiceError> {
        let header = self
            .orders
            .find_by_id(order_id)?
            .ok_or_else(DomainError::not_found)?;
        let mut order = self.hydrate(header)?;

        if let Err(err) = order.change_status(status) {
            warn!(order_id = %order_id, error = %err, "status change rejected");
            return Err(err.into());
        }

        self.orders.save(order.header().clone())?;
        Ok(order)
    }

    fn hydrate(&self, header: OrderHeader) -> Result<Order, ServiceError> {
        let order_id = header.id().ok_or(StoreError::MissingIdentity)?;
        let line_items = self.line_items.find_all_by_order_id(order_id)?;
        Ok(header.attach_line_items(line_items)?)
    }
}
