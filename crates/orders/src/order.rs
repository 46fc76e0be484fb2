use chrono::{DateTime, Utc};

use kitchenpos_core::{
    AggregateRoot, DomainError, DomainResult, Entity, MenuId, OrderId, OrderTableId,
};

use crate::line_item::OrderLineItem;
use crate::status::OrderStatus;

/// Order row without its line items.
///
/// This is what storage hands back for an `orders` row. Line items are loaded
/// separately and joined through [`OrderHeader::attach_line_items`], which is the
/// only way to obtain a hydrated [`Order`] from a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    id: Option<OrderId>,
    order_table_id: OrderTableId,
    status: OrderStatus,
    ordered_time: DateTime<Utc>,
}

impl OrderHeader {
    /// Rebuild a persisted order row.
    pub fn rehydrate(
        id: OrderId,
        order_table_id: OrderTableId,
        status: OrderStatus,
        ordered_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            order_table_id,
            status,
            ordered_time,
        }
    }

    /// Join line items onto the header. Fails if `line_items` is empty.
    pub fn attach_line_items(self, line_items: Vec<OrderLineItem>) -> DomainResult<Order> {
        Order::from_header(self, line_items)
    }

    pub fn order_table_id(&self) -> OrderTableId {
        self.order_table_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn ordered_time(&self) -> DateTime<Utc> {
        self.ordered_time
    }

    pub fn is_ungroup_blocked(&self) -> bool {
        self.status.is_active()
    }
}

impl Entity for OrderHeader {
    type Id = OrderId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Aggregate root: Order.
///
/// Always holds at least one line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    header: OrderHeader,
    line_items: Vec<OrderLineItem>,
}

impl Order {
    pub fn new(
        id: Option<OrderId>,
        order_table_id: OrderTableId,
        status: OrderStatus,
        ordered_time: DateTime<Utc>,
        line_items: Vec<OrderLineItem>,
    ) -> DomainResult<Self> {
        let header = OrderHeader {
            id,
            order_table_id,
            status,
            ordered_time,
        };
        Self::from_header(header, line_items)
    }

    /// New, not-yet-persisted order with an explicit status and time.
    pub fn create_at(
        order_table_id: OrderTableId,
        status: OrderStatus,
        ordered_time: DateTime<Utc>,
        line_items: Vec<OrderLineItem>,
    ) -> DomainResult<Self> {
        Self::new(None, order_table_id, status, ordered_time, line_items)
    }

    /// New order for a table: `Cooking`, ordered now.
    pub fn create(
        order_table_id: OrderTableId,
        line_items: Vec<OrderLineItem>,
    ) -> DomainResult<Self> {
        Self::create_at(order_table_id, OrderStatus::Cooking, Utc::now(), line_items)
    }

    fn from_header(header: OrderHeader, line_items: Vec<OrderLineItem>) -> DomainResult<Self> {
        if line_items.is_empty() {
            return Err(DomainError::EmptyLineItems);
        }
        Ok(Self { header, line_items })
    }

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn into_parts(self) -> (OrderHeader, Vec<OrderLineItem>) {
        (self.header, self.line_items)
    }

    pub fn order_table_id(&self) -> OrderTableId {
        self.header.order_table_id
    }

    pub fn status(&self) -> OrderStatus {
        self.header.status
    }

    pub fn ordered_time(&self) -> DateTime<Utc> {
        self.header.ordered_time
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    /// Cross-check the held line items against a count fetched independently,
    /// e.g. the number of referenced menus that actually exist.
    pub fn check_actual_order_line_items(&self, expected: usize) -> DomainResult<()> {
        let actual = self.line_items.len();
        if actual != expected {
            return Err(DomainError::LineItemCountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Menu ids in line-item order.
    pub fn menu_ids(&self) -> Vec<MenuId> {
        self.line_items.iter().map(OrderLineItem::menu_id).collect()
    }

    pub fn change_status(&mut self, next: OrderStatus) -> DomainResult<()> {
        let current = self.header.status;
        if !current.can_transition_to(next) {
            return Err(DomainError::IllegalStatusTransition {
                from: current.as_str(),
                to: next.as_str(),
            });
        }
        self.header.status = next;
        Ok(())
    }

    /// True while the order keeps its table in use (`Cooking` or `Meal`).
    pub fn is_ungroup_blocked(&self) -> bool {
        self.header.is_ungroup_blocked()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Option<Self::Id> {
        self.header.id
    }
}

impl AggregateRoot for Order {
    const AGGREGATE_TYPE: &'static str = "order";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn table() -> OrderTableId {
        OrderTableId::new(1)
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn items(menu_ids: &[i64]) -> Vec<OrderLineItem> {
        menu_ids
            .iter()
            .map(|id| OrderLineItem::new(MenuId::new(*id), 1))
            .collect()
    }

    fn order_with_status(status: OrderStatus) -> Order {
        Order::new(Some(OrderId::new(1)), table(), status, fixed_time(), items(&[1])).unwrap()
    }

    #[test]
    fn aggregate_type_names_orders() {
        assert_eq!(Order::AGGREGATE_TYPE, "order");
    }

    #[test]
    fn create_defaults_to_cooking_without_identity() {
        let order = Order::create(table(), items(&[1, 2])).unwrap();
        assert_eq!(order.status(), OrderStatus::Cooking);
        assert_eq!(order.id(), None);
        assert_eq!(order.order_table_id(), table());
        assert_eq!(order.line_items().len(), 2);
    }

    #[test]
    fn create_rejects_empty_line_items() {
        let err = Order::create(table(), vec![]).unwrap_err();
        assert_eq!(err, DomainError::EmptyLineItems);
    }

    #[test]
    fn new_rejects_empty_line_items_even_with_identity() {
        let err = Order::new(
            Some(OrderId::new(3)),
            table(),
            OrderStatus::Completion,
            fixed_time(),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::EmptyLineItems);
    }

    #[test]
    fn check_actual_order_line_items_matches_count() {
        let order = Order::create(table(), items(&[1, 2])).unwrap();
        assert!(order.check_actual_order_line_items(2).is_ok());

        let err = order.check_actual_order_line_items(1).unwrap_err();
        assert_eq!(
            err,
            DomainError::LineItemCountMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn menu_ids_preserve_line_item_order() {
        let order = Order::create(table(), items(&[3, 1, 2, 1])).unwrap();
        let ids: Vec<i64> = order.menu_ids().into_iter().map(MenuId::get).collect();
        assert_eq!(ids, vec![3, 1, 2, 1]);
    }

    #[test]
    fn change_status_from_cooking_to_meal() {
        let mut order = order_with_status(OrderStatus::Cooking);
        order.change_status(OrderStatus::Meal).unwrap();
        assert_eq!(order.status(), OrderStatus::Meal);
    }

    #[test]
    fn change_status_allows_meal_back_to_cooking() {
        let mut order = order_with_status(OrderStatus::Meal);
        order.change_status(OrderStatus::Cooking).unwrap();
        assert_eq!(order.status(), OrderStatus::Cooking);
    }

    #[test]
    fn change_status_allows_self_transition() {
        let mut order = order_with_status(OrderStatus::Cooking);
        order.change_status(OrderStatus::Cooking).unwrap();
        assert_eq!(order.status(), OrderStatus::Cooking);
    }

    #[test]
    fn completed_order_cannot_change_status() {
        let mut order = order_with_status(OrderStatus::Completion);
        let err = order.change_status(OrderStatus::Completion).unwrap_err();
        assert_eq!(
            err,
            DomainError::IllegalStatusTransition {
                from: "COMPLETION",
                to: "COMPLETION"
            }
        );
        assert_eq!(order.status(), OrderStatus::Completion);
    }

    #[test]
    fn ungroup_is_blocked_only_while_active() {
        assert!(order_with_status(OrderStatus::Cooking).is_ungroup_blocked());
        assert!(order_with_status(OrderStatus::Meal).is_ungroup_blocked());
        assert!(!order_with_status(OrderStatus::Completion).is_ungroup_blocked());
    }

    #[test]
    fn ungroup_unblocks_after_completing() {
        let mut order = order_with_status(OrderStatus::Meal);
        order.change_status(OrderStatus::Completion).unwrap();
        assert!(!order.is_ungroup_blocked());
    }

    #[test]
    fn header_rehydrates_without_line_items() {
        let header =
            OrderHeader::rehydrate(OrderId::new(7), table(), OrderStatus::Meal, fixed_time());
        assert_eq!(header.id(), Some(OrderId::new(7)));
        assert_eq!(header.status(), OrderStatus::Meal);
        assert_eq!(header.ordered_time(), fixed_time());
        assert!(header.is_ungroup_blocked());
    }

    #[test]
    fn attaching_line_items_hydrates_the_order() {
        let header =
            OrderHeader::rehydrate(OrderId::new(7), table(), OrderStatus::Meal, fixed_time());
        let order = header.clone().attach_line_items(items(&[4])).unwrap();
        assert_eq!(order.header(), &header);
        assert_eq!(order.menu_ids(), vec![MenuId::new(4)]);
    }

    #[test]
    fn attaching_no_line_items_fails() {
        let header =
            OrderHeader::rehydrate(OrderId::new(7), table(), OrderStatus::Cooking, fixed_time());
        assert_eq!(
            header.attach_line_items(vec![]).unwrap_err(),
            DomainError::EmptyLineItems
        );
    }

    #[test]
    fn into_parts_splits_header_and_items() {
        let order = Order::create(table(), items(&[1, 2])).unwrap();
        let (header, line_items) = order.into_parts();
        assert_eq!(header.status(), OrderStatus::Cooking);
        assert_eq!(line_items.len(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Cooking),
                Just(OrderStatus::Meal),
                Just(OrderStatus::Completion),
            ]
        }

        fn arb_active_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![Just(OrderStatus::Cooking), Just(OrderStatus::Meal)]
        }

        fn arb_line_items() -> impl Strategy<Value = Vec<OrderLineItem>> {
            prop::collection::vec((any::<i64>(), any::<u64>()), 1..32).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(menu, qty)| OrderLineItem::new(MenuId::new(menu), qty))
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: menu ids come back in the order the line items were given.
            #[test]
            fn menu_ids_follow_input_order(
                line_items in arb_line_items(),
                status in arb_status(),
            ) {
                let expected: Vec<MenuId> = line_items.iter().map(OrderLineItem::menu_id).collect();
                let order = Order::create_at(table(), status, fixed_time(), line_items).unwrap();
                prop_assert_eq!(order.menu_ids(), expected);
            }

            /// Property: no line items means no order, whatever the other fields are.
            #[test]
            fn empty_line_items_always_rejected(
                id in proptest::option::of(any::<i64>()),
                table_id in any::<i64>(),
                status in arb_status(),
            ) {
                let result = Order::new(
                    id.map(OrderId::new),
                    OrderTableId::new(table_id),
                    status,
                    fixed_time(),
                    vec![],
                );
                prop_assert_eq!(result, Err(DomainError::EmptyLineItems));
            }

            /// Property: a completed order rejects every status change.
            #[test]
            fn completion_is_absorbing(next in arb_status()) {
                let mut order = order_with_status(OrderStatus::Completion);
                let is_illegal = matches!(
                    order.change_status(next),
                    Err(DomainError::IllegalStatusTransition { .. })
                );
                prop_assert!(is_illegal);
                prop_assert_eq!(order.status(), OrderStatus::Completion);
            }

            /// Property: an active order accepts every status change.
            #[test]
            fn active_orders_accept_any_status(
                current in arb_active_status(),
                next in arb_status(),
            ) {
                let mut order = order_with_status(current);
                prop_assert!(order.change_status(next).is_ok());
                prop_assert_eq!(order.status(), next);
                prop_assert_eq!(order.is_ungroup_blocked(), next != OrderStatus::Completion);
            }

            /// Property: the count check passes exactly at the held count.
            #[test]
            fn count_check_matches_only_held_count(
                line_items in arb_line_items(),
                expected in 0usize..40,
            ) {
                let held = line_items.len();
                let order = Order::create(table(), line_items).unwrap();
                prop_assert_eq!(
                    order.check_actual_order_line_items(expected).is_ok(),
                    expected == held
                );
            }
        }
    }
}
