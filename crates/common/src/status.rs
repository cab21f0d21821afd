//! Order lifecycle status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The status of an order.
///
/// State transitions:
/// ```text
/// CREATED ──► CANCELLED ──┐
///                 ▲       │ (idempotent)
///                 └───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Freshly created order.
    #[default]
    Created,

    /// Cancelled order (terminal state).
    Cancelled,
}

/// Returned when a string is not one of the known status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl OrderStatus {
    /// All statuses, in declaration order.
    pub const ALL: [OrderStatus; 2] = [OrderStatus::Created, OrderStatus::Cancelled];

    /// Returns true if the order can be cancelled in this state.
    ///
    /// Cancelling a cancelled order is allowed and changes nothing.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Created | OrderStatus::Cancelled)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Returns the wire/database name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_created() {
        assert_eq!(OrderStatus::default(), OrderStatus::Created);
    }

    #[test]
    fn test_can_cancel() {
        assert!(OrderStatus::Created.can_cancel());
        assert!(OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Created.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(OrderStatus::Created.to_string(), "CREATED");
        assert_eq!(OrderStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("CREATED".parse::<OrderStatus>(), Ok(OrderStatus::Created));
        assert_eq!(
            "CANCELLED".parse::<OrderStatus>(),
            Ok(OrderStatus::Cancelled)
        );
        assert!("cancelled".parse::<OrderStatus>().is_err());
        assert!("BOGUS".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
        let parsed: OrderStatus = serde_json::from_str("\"CREATED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Created);
        assert!(serde_json::from_str::<OrderStatus>("\"BOGUS\"").is_err());
    }
}
