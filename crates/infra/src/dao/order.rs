use std::sync::Arc;

use kitchenpos_core::{OrderId, OrderTableId};
use kitchenpos_orders::{OrderHeader, OrderLineItem};

use crate::error::StoreError;

/// Read/write access to `orders` rows (line items live in [`OrderLineItemDao`]).
pub trait OrderDao: Send + Sync {
    /// Insert when the header has no id, otherwise update status in place.
    fn save(&self, order: OrderHeader) -> Result<OrderHeader, StoreError>;

    fn find_by_id(&self, id: OrderId) -> Result<Option<OrderHeader>, StoreError>;

    fn find_all(&self) -> Result<Vec<OrderHeader>, StoreError>;

    fn find_all_by_order_table_id_in(
        &self,
        order_table_ids: &[OrderTableId],
    ) -> Result<Vec<OrderHeader>, StoreError>;
}

/// Read/write access to `order_line_item` rows.
pub trait OrderLineItemDao: Send + Sync {
    /// Insert when the item has no seq, otherwise leave the row as is.
    fn save(&self, item: OrderLineItem) -> Result<OrderLineItem, StoreError>;

    /// Line items of one order, in insertion order.
    fn find_all_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderLineItem>, StoreError>;
}

impl<D> OrderDao for Arc<D>
where
    D: OrderDao + ?Sized,
{
    fn save(&self, order: OrderHeader) -> Result<OrderHeader, StoreError> {
        (**self).save(order)
    }

    fn find_by_id(&self, id: OrderId) -> Result<Option<OrderHeader>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<OrderHeader>, StoreError> {
        (**self).find_all()
    }

    fn find_all_by_order_table_id_in(
        &self,
        order_table_ids: &[OrderTableId],
    ) -> Result<Vec<OrderHeader>, StoreError> {
        (**self).find_all_by_order_table_id_in(order_table_ids)
    }
}

impl<D> OrderLineItemDao for Arc<D>
where
    D: OrderLineItemDao + ?Sized,
{
    fn save(&self, item: OrderLineItem) -> Result<OrderLineItem, StoreError> {
        (**self).save(item)
    }

    fn find_all_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderLineItem>, StoreError> {
        (**self).find_all_by_order_id(order_id)
    }
}
