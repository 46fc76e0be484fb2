//! Order status workflow.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use kitchenpos_core::DomainError;

/// Order status lifecycle.
///
/// `Cooking` is the initial state and `Completion` is terminal. Persisted and
/// serialized as the upper-case name (`"COOKING"`, `"MEAL"`, `"COMPLETION"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Cooking,
    Meal,
    Completion,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Cooking,
        OrderStatus::Meal,
        OrderStatus::Completion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Meal => "MEAL",
            OrderStatus::Completion => "COMPLETION",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completion)
    }

    /// Active orders keep their table in use (e.g. block ungrouping).
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Cooking | OrderStatus::Meal)
    }

    /// Any non-terminal status may move to any status, itself included.
    pub fn can_transition_to(self, _next: OrderStatus) -> bool {
        !self.is_terminal()
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown order status: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_cooking() {
        assert_eq!(OrderStatus::default(), OrderStatus::Cooking);
    }

    #[test]
    fn only_completion_is_terminal() {
        assert!(!OrderStatus::Cooking.is_terminal());
        assert!(!OrderStatus::Meal.is_terminal());
        assert!(OrderStatus::Completion.is_terminal());
    }

    #[test]
    fn name_round_trips_through_from_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!(matches!(
            "cooking".parse::<OrderStatus>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn serializes_as_upper_case_name() {
        let json = serde_json::to_string(&OrderStatus::Meal).unwrap();
        assert_eq!(json, "\"MEAL\"");

        let parsed: OrderStatus = serde_json::from_str("\"COMPLETION\"").unwrap();
        assert_eq!(parsed, OrderStatus::Completion);
    }
}
