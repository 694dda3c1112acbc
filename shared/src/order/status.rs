//! Order and ticket state machines

use serde::{Deserialize, Serialize};

/// Order lifecycle (订单状态)
///
/// ```text
/// InProgress → Ready → Delivered → Paid
///      └──────────┴→ Cancelled
/// ```
///
/// Cancellation after Delivered is not legal; Paid and Cancelled are
/// terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    InProgress,
    Ready,
    Delivered,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (InProgress, Ready)
                | (InProgress, Cancelled)
                | (Ready, Delivered)
                | (Ready, Cancelled)
                | (Delivered, Paid)
        )
    }

    /// Terminal states release the table and end the aggregate's life
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

/// Station ticket / ticket item lifecycle (区域工单状态)
///
/// Strictly sequential, no skipping:
/// Pending → InProgress → Ready → Delivered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Delivered,
}

impl TicketStatus {
    pub fn can_transition(self, to: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, to),
            (Pending, InProgress) | (InProgress, Ready) | (Ready, Delivered)
        )
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
        };
        write!(f, "{s}")
    }
}
