//! Order status machine and order request payloads

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Transition graph:
///
/// ```text
/// pending ──► accepted ──► preparing ──► ready ──► delivering ──► delivered
///    │            │            │           │            │
///    ├──► rejected│            │           │            │
///    └────────────┴────────────┴───────────┴────────────┴──► cancelled
/// ```
///
/// `rejected`, `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Preparing,
    Ready,
    Delivering,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses reachable from this one in a single transition
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted => &[Preparing, Cancelled],
            Preparing => &[Ready, Cancelled],
            Ready => &[Delivering, Cancelled],
            Delivering => &[Delivered, Cancelled],
            Rejected | Delivered | Cancelled => &[],
        }
    }

    /// Whether `next` is a legal one-step transition from this status
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Terminal statuses have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Wire/storage name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Name of the order column stamped when this status is first reached
    ///
    /// `pending` is the creation status and `cancelled` carries no dedicated
    /// column; both return `None`.
    pub fn timestamp_field(&self) -> Option<&'static str> {
        match self {
            OrderStatus::Accepted => Some("accepted_at"),
            OrderStatus::Rejected => Some("rejected_at"),
            OrderStatus::Preparing => Some("preparing_started_at"),
            OrderStatus::Ready => Some("ready_at"),
            OrderStatus::Delivering => Some("delivering_started_at"),
            OrderStatus::Delivered => Some("delivered_at"),
            OrderStatus::Pending | OrderStatus::Cancelled => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a checkout cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Dish reference (String ID)
    pub dish_id: String,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    pub items: Vec<OrderItemInput>,
    pub voucher_code: Option<String>,
    pub customer_notes: Option<String>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub new_status: OrderStatus,
    pub notes: Option<String>,
}

/// Reject order payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RejectOrderRequest {
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_happy_path_chain() {
        use OrderStatus::*;
        let chain = [Pending, Accepted, Preparing, Ready, Delivering, Delivered];
        for pair in chain.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_cancel_allowed_from_every_active_status() {
        use OrderStatus::*;
        for status in [Pending, Accepted, Preparing, Ready, Delivering] {
            assert!(status.can_transition_to(Cancelled), "{} -> cancelled", status);
        }
    }

    #[test]
    fn test_terminal_states_have_no_transitions() {
        use OrderStatus::*;
        for terminal in [Rejected, Delivered, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [
                Pending, Accepted, Rejected, Preparing, Ready, Delivering, Delivered, Cancelled,
            ] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_no_backward_transitions() {
        use OrderStatus::*;
        assert!(!Accepted.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Accepted));
        assert!(!Delivering.can_transition_to(Ready));
    }

    #[test]
    fn test_timestamp_fields() {
        assert_eq!(OrderStatus::Accepted.timestamp_field(), Some("accepted_at"));
        assert_eq!(
            OrderStatus::Delivering.timestamp_field(),
            Some("delivering_started_at")
        );
        assert_eq!(OrderStatus::Pending.timestamp_field(), None);
        assert_eq!(OrderStatus::Cancelled.timestamp_field(), None);
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");

        let status: OrderStatus = serde_json::from_str("\"delivering\"").unwrap();
        assert_eq!(status, OrderStatus::Delivering);
    }
}
