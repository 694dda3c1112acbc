//! Fulfillment event broadcast
//!
//! Every state change of an order or a station ticket is published on a
//! broadcast channel so that UI clients (kitchen displays, cashier
//! screens, table maps) can react in real time. Delivery is
//! fire-and-forget; a lagging subscriber never blocks the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{OrderStatus, TicketStatus};

/// 履约事件（广播给所有订阅者）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentEvent {
    /// 订单创建成功，区域工单已生成
    OrderCreated {
        order_id: i64,
        table_id: i64,
        total: Decimal,
        /// 生成的区域工单 id 列表
        ticket_ids: Vec<i64>,
    },
    /// 订单生命周期推进
    OrderStatusChanged {
        order_id: i64,
        table_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// 区域工单（或其明细）状态推进
    TicketStatusChanged {
        ticket_id: i64,
        order_id: i64,
        station_id: String,
        status: TicketStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_tagged_screaming_snake_case() {
        let event = FulfillmentEvent::OrderStatusChanged {
            order_id: 7,
            table_id: 3,
            from: OrderStatus::InProgress,
            to: OrderStatus::Ready,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ORDER_STATUS_CHANGED");
        assert_eq!(json["from"], "IN_PROGRESS");
        assert_eq!(json["to"], "READY");
    }
}
