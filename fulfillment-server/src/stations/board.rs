//! Station Board - 区域工单看板
//!
//! 持有全部区域工单并推进其状态机。不同区域（以及同一订单的不同
//! 工单）互相独立，可并发推进；唯一需要互斥的是单张工单内部的
//! "全部明细就绪" 重算，它在该工单的 DashMap entry 独占引用内完成。
//!
//! 注意：任何操作都不会在持有一个 entry 引用的同时去取另一个 entry，
//! 跨工单的 "订单是否全部就绪" 检查在释放当前工单后只读遍历。

use chrono::Utc;
use dashmap::DashMap;
use shared::error::InvalidTransition;
use shared::order::{StationTicket, TicketStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Station ticket not found: {0}")]
    TicketNotFound(i64),

    #[error("Ticket item {item_id} not found in ticket {ticket_id}")]
    ItemNotFound { ticket_id: i64, item_id: i64 },

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

pub type BoardResult<T> = Result<T, BoardError>;

/// 工单看板
#[derive(Debug, Default)]
pub struct StationBoard {
    tickets: DashMap<i64, StationTicket>,
    /// order_id → ticket ids（建单时写入，之后只读）
    order_index: DashMap<i64, Vec<i64>>,
}

impl StationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一张订单的全部工单（建单事务的最后一步）
    pub fn insert_tickets(&self, tickets: Vec<StationTicket>) {
        for ticket in tickets {
            self.order_index
                .entry(ticket.order_id)
                .or_default()
                .push(ticket.id);
            self.tickets.insert(ticket.id, ticket);
        }
    }

    pub fn get(&self, ticket_id: i64) -> Option<StationTicket> {
        self.tickets.get(&ticket_id).map(|t| t.clone())
    }

    /// 一张订单的全部工单
    pub fn tickets_for_order(&self, order_id: i64) -> Vec<StationTicket> {
        let ids: Vec<i64> = match self.order_index.get(&order_id) {
            Some(entry) => entry.clone(),
            None => return Vec::new(),
        };
        ids.iter()
            .filter_map(|id| self.tickets.get(id).map(|t| t.clone()))
            .collect()
    }

    /// 某区域仍需处理的工单（排除 READY / DELIVERED）
    pub fn open_tickets_for_station(&self, station_id: &str) -> Vec<StationTicket> {
        self.tickets
            .iter()
            .filter(|t| {
                t.station_id == station_id
                    && matches!(t.status, TicketStatus::Pending | TicketStatus::InProgress)
            })
            .map(|t| t.clone())
            .collect()
    }

    // --- ticket-level operations ---

    /// PENDING → IN_PROGRESS
    pub fn start_ticket(&self, ticket_id: i64) -> BoardResult<StationTicket> {
        self.with_ticket(ticket_id, |ticket| {
            ticket.start(Utc::now()).map_err(BoardError::from)
        })
    }

    /// IN_PROGRESS → READY，要求所有明细已 READY（每次都重算，不缓存）
    ///
    /// 返回 (工单, 该订单的全部工单是否都已 READY)，供管理器把订单
    /// 整体推进到 READY。
    pub fn mark_ticket_ready(&self, ticket_id: i64) -> BoardResult<(StationTicket, bool)> {
        let ticket = self.with_ticket(ticket_id, |ticket| {
            ticket.mark_ready(Utc::now()).map_err(BoardError::from)
        })?;
        let order_ready = self.all_tickets_ready(ticket.order_id);
        Ok((ticket, order_ready))
    }

    /// READY → DELIVERED
    pub fn deliver_ticket(&self, ticket_id: i64) -> BoardResult<StationTicket> {
        self.with_ticket(ticket_id, |ticket| {
            ticket.mark_delivered(Utc::now()).map_err(BoardError::from)
        })
    }

    pub fn assign(&self, ticket_id: i64, assignee: Option<String>) -> BoardResult<StationTicket> {
        self.with_ticket(ticket_id, |ticket| {
            ticket.assigned_to = assignee.clone();
            ticket.updated_at = Utc::now();
            Ok(())
        })
    }

    pub fn set_notes(&self, ticket_id: i64, notes: Option<String>) -> BoardResult<StationTicket> {
        self.with_ticket(ticket_id, |ticket| {
            ticket.notes = notes.clone();
            ticket.updated_at = Utc::now();
            Ok(())
        })
    }

    // --- item-level operations ---

    /// 明细 PENDING → IN_PROGRESS
    pub fn start_item(&self, ticket_id: i64, item_id: i64) -> BoardResult<StationTicket> {
        self.with_item(ticket_id, item_id, |item| {
            item.start(Utc::now()).map_err(BoardError::from)
        })
    }

    /// 明细 IN_PROGRESS → READY
    ///
    /// 返回 (工单, 工单的全部明细是否都已 READY)。工单本身仍需显式
    /// mark_ticket_ready 才会推进。
    pub fn mark_item_ready(
        &self,
        ticket_id: i64,
        item_id: i64,
    ) -> BoardResult<(StationTicket, bool)> {
        let ticket = self.with_item(ticket_id, item_id, |item| {
            item.mark_ready(Utc::now()).map_err(BoardError::from)
        })?;
        let all_ready = ticket.all_items_ready();
        Ok((ticket, all_ready))
    }

    /// 明细 READY → DELIVERED
    pub fn deliver_item(&self, ticket_id: i64, item_id: i64) -> BoardResult<StationTicket> {
        self.with_item(ticket_id, item_id, |item| {
            item.mark_delivered().map_err(BoardError::from)
        })
    }

    // --- internal helpers ---

    fn with_ticket(
        &self,
        ticket_id: i64,
        op: impl FnOnce(&mut StationTicket) -> BoardResult<()>,
    ) -> BoardResult<StationTicket> {
        let mut entry = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(BoardError::TicketNotFound(ticket_id))?;
        op(&mut entry)?;
        Ok(entry.clone())
    }

    fn with_item(
        &self,
        ticket_id: i64,
        item_id: i64,
        op: impl FnOnce(&mut shared::order::StationTicketItem) -> BoardResult<()>,
    ) -> BoardResult<StationTicket> {
        let mut entry = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(BoardError::TicketNotFound(ticket_id))?;
        let item = entry
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(BoardError::ItemNotFound { ticket_id, item_id })?;
        op(item)?;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// 该订单的全部工单是否都已 READY（只读遍历，不持有任何 entry）
    fn all_tickets_ready(&self, order_id: i64) -> bool {
        let ids: Vec<i64> = match self.order_index.get(&order_id) {
            Some(entry) => entry.clone(),
            None => return false,
        };
        ids.iter().all(|id| {
            self.tickets
                .get(id)
                .map(|t| t.status == TicketStatus::Ready)
                .unwrap_or(false)
        })
    }
}
