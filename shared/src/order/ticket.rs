//! Station tickets
//!
//! One ticket per {order, station} pair, each with its own lifecycle,
//! independent of every other ticket of the same order. Ticket items run
//! the same state machine shape one level down.

use crate::error::InvalidTransition;
use crate::order::status::TicketStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One routed line inside a station ticket (区域工单明细)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTicketItem {
    pub id: i64,
    /// Source order line; quantity always equals that line's quantity
    pub order_line_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl StationTicketItem {
    pub fn new(
        id: i64,
        order_line_id: i64,
        menu_item_id: i64,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id,
            order_line_id,
            menu_item_id,
            name: name.into(),
            quantity,
            unit_price,
            status: TicketStatus::Pending,
            started_at: None,
            completed_at: None,
        }
    }

    /// Pending → InProgress, stamping `started_at`
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.transition(TicketStatus::InProgress)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// InProgress → Ready, stamping `completed_at`
    pub fn mark_ready(&mut self, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.transition(TicketStatus::Ready)?;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Ready → Delivered
    pub fn mark_delivered(&mut self) -> Result<(), InvalidTransition> {
        self.transition(TicketStatus::Delivered)
    }

    fn transition(&mut self, to: TicketStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition(to) {
            return Err(InvalidTransition::new("ticket_item", self.status, to));
        }
        self.status = to;
        Ok(())
    }
}

/// Station ticket (区域工单)
///
/// Owns its items by value. Linkage back to the order is the `order_id`
/// foreign key only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTicket {
    pub id: i64,
    pub order_id: i64,
    /// Station key, lower-case ("kitchen", "bar", ...)
    pub station_id: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<StationTicketItem>,
}

impl StationTicket {
    pub fn new(
        id: i64,
        order_id: i64,
        station_id: impl Into<String>,
        estimated_minutes: Option<i32>,
        items: Vec<StationTicketItem>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            station_id: station_id.into(),
            status: TicketStatus::Pending,
            assigned_to: None,
            notes: None,
            estimated_minutes,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
            items,
        }
    }

    /// Recomputed on every check, never cached
    pub fn all_items_ready(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.status == TicketStatus::Ready)
    }

    pub fn ready_items(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == TicketStatus::Ready)
            .count()
    }

    /// Pending → InProgress, stamping `started_at`
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.transition(TicketStatus::InProgress, now)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// InProgress → Ready, only when every item is Ready
    pub fn mark_ready(&mut self, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        if !self.all_items_ready() {
            return Err(InvalidTransition::new("ticket", self.status, TicketStatus::Ready));
        }
        self.transition(TicketStatus::Ready, now)?;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Ready → Delivered
    pub fn mark_delivered(&mut self, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        self.transition(TicketStatus::Delivered, now)
    }

    fn transition(&mut self, to: TicketStatus, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        if !self.status.can_transition(to) {
            return Err(InvalidTransition::new("ticket", self.status, to));
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }
}
