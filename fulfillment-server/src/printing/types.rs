//! Print job types
//!
//! 值对象，从不持久化——按需构建，交给打印桥后即忘。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{Order, StationTicket};

/// 票面一行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketLine {
    pub quantity: i32,
    pub name: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// 票面快照（构建瞬间的订单/工单数据）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSnapshot {
    pub order_id: i64,
    pub table_name: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<TicketLine>,
    pub total: Decimal,
}

impl TicketSnapshot {
    /// 收银小票：整单全部行 + 订单总额
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            table_name: order.table_name.clone(),
            timestamp: order.created_at,
            items: order
                .lines
                .iter()
                .map(|line| TicketLine {
                    quantity: line.quantity,
                    name: line.name.clone(),
                    unit_price: line.unit_price,
                    line_total: line.subtotal,
                })
                .collect(),
            total: order.total,
        }
    }

    /// 区域票：只含该工单的明细，总额为明细合计
    pub fn from_station_ticket(order: &Order, ticket: &StationTicket) -> Self {
        let items: Vec<TicketLine> = ticket
            .items
            .iter()
            .map(|item| TicketLine {
                quantity: item.quantity,
                name: item.name.clone(),
                unit_price: item.unit_price,
                line_total: item.unit_price * Decimal::from(item.quantity),
            })
            .collect();
        let total = items
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.line_total);
        Self {
            order_id: order.id,
            table_name: order.table_name.clone(),
            timestamp: ticket.created_at,
            items,
            total,
        }
    }
}

/// 票种
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    /// 收银小票
    Cashier,
    /// 区域工单票
    Station,
}

/// 打印任务 - 交给打印桥的完整指令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub printer_type: String,
    pub printer_target: String,
    pub ticket_type: TicketType,
    /// 区域票携带区域 id，收银票为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    pub ticket: TicketSnapshot,
}
