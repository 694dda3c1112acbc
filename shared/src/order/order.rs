//! Order aggregate

use crate::error::InvalidTransition;
use crate::order::status::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One order line (订单行)
///
/// `unit_price` is copied from the menu item at order time, never looked
/// up live afterwards. `parent_line_id` links extra/add-on lines to the
/// line they extend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: i64,
    pub menu_item_id: i64,
    /// Name snapshot for tickets and receipts
    pub name: String,
    /// Positive quantity
    pub quantity: i32,
    /// Price per unit at the time of order
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_line_id: Option<i64>,
    /// unit_price × quantity, fixed at creation
    pub subtotal: Decimal,
}

impl OrderLine {
    pub fn new(
        id: i64,
        menu_item_id: i64,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
        parent_line_id: Option<i64>,
    ) -> Self {
        let subtotal = unit_price * Decimal::from(quantity);
        Self {
            id,
            menu_item_id,
            name: name.into(),
            quantity,
            unit_price,
            parent_line_id,
            subtotal,
        }
    }
}

/// Exact amount deducted from one ingredient when the order was created
///
/// 取消订单时按快照原额归还库存，而不是按（可能已被修改的）配方重算。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockDeduction {
    pub ingredient_id: i64,
    pub amount: Decimal,
}

/// Order aggregate (订单)
///
/// Owns its lines by value; linkage to station tickets is by id only,
/// never by back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    /// Table name snapshot for tickets
    pub table_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    /// Σ line.subtotal, computed once at creation and immutable
    pub total: Decimal,
    /// Per-ingredient deduction snapshot taken at creation
    pub deductions: Vec<StockDeduction>,
}

impl Order {
    /// Assemble a new In-Progress order; the total is derived from the
    /// lines here and never recomputed afterwards.
    pub fn new(
        id: i64,
        table_id: i64,
        table_name: impl Into<String>,
        lines: Vec<OrderLine>,
        deductions: Vec<StockDeduction>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.subtotal);
        Self {
            id,
            table_id,
            table_name: table_name.into(),
            created_at,
            status: OrderStatus::InProgress,
            lines,
            total,
            deductions,
        }
    }

    /// Transition to a new status, rejecting illegal moves
    pub fn transition(&mut self, to: OrderStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition(to) {
            return Err(InvalidTransition::new("order", self.status, to));
        }
        self.status = to;
        Ok(())
    }
}
