use serde::{Deserialize, Serialize};

use kitchenpos_core::{Entity, LineItemSeq, MenuId, OrderId};

/// Order line: menu reference and quantity.
///
/// Immutable once built. Menu existence is checked by the caller against the
/// catalog, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    seq: Option<LineItemSeq>,
    order_id: Option<OrderId>,
    menu_id: MenuId,
    quantity: u64,
}

impl OrderLineItem {
    pub fn new(menu_id: MenuId, quantity: u64) -> Self {
        Self {
            seq: None,
            order_id: None,
            menu_id,
            quantity,
        }
    }

    pub fn for_order(order_id: OrderId, menu_id: MenuId, quantity: u64) -> Self {
        Self {
            order_id: Some(order_id),
            ..Self::new(menu_id, quantity)
        }
    }

    /// Rebuild a persisted line item.
    pub fn rehydrate(
        seq: LineItemSeq,
        order_id: OrderId,
        menu_id: MenuId,
        quantity: u64,
    ) -> Self {
        Self {
            seq: Some(seq),
            order_id: Some(order_id),
            menu_id,
            quantity,
        }
    }

    /// Copy of this line item bound to `order_id`, identity unchanged.
    pub fn with_order_id(self, order_id: OrderId) -> Self {
        Self {
            order_id: Some(order_id),
            ..self
        }
    }

    pub fn seq(&self) -> Option<LineItemSeq> {
        self.seq
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

impl Entity for OrderLineItem {
    type Id = LineItemSeq;

    fn id(&self) -> Option<Self::Id> {
        self.seq
    }
}
