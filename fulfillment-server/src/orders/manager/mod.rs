//! OrderManager - 履约编排与订单生命周期
//!
//! # Create Flow
//!
//! ```text
//! create_order(req)
//!     ├─ 1. 桌台查询，必须 FREE
//!     ├─ 2. 逐行：菜品查询 → 账本 check_and_deduct
//!     │      （任一行失败 → 归还本次已扣的全部库存，整体中止）
//!     ├─ 3. 行小计 = 下单瞬间单价 × 数量，总额 = Σ 小计
//!     ├─ 4. 桌台 FREE → OCCUPIED (CAS；输掉竞争同样全额回滚)
//!     ├─ 5. 订单落库 (IN_PROGRESS，携带扣减快照)
//!     ├─ 6. 分单路由 → 工单上看板
//!     └─ 7. 广播 OrderCreated
//! ```
//!
//! 整个序列对外全或无：任何一步失败后，桌台、库存、订单存储都与
//! 调用前完全一致。

mod error;
pub use error::*;

use crate::catalog::{MenuCatalog, TableStore, TableStoreError};
use crate::core::{FulfillmentEvent, IdGen};
use crate::inventory::InventoryLedger;
use crate::stations::{StationBoard, StationRouter};
use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, TableStatus};
use shared::order::{Order, OrderLine, OrderStatus, StationTicket, StockDeduction};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// 一行下单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub menu_item_id: i64,
    pub quantity: i32,
    /// 加料/加项行：指向同一请求里更早的一行（下标）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_index: Option<usize>,
}

impl OrderLineRequest {
    pub fn new(menu_item_id: i64, quantity: i32) -> Self {
        Self {
            menu_item_id,
            quantity,
            parent_index: None,
        }
    }
}

/// 下单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub table_id: i64,
    pub lines: Vec<OrderLineRequest>,
}

/// 订单管理器
pub struct OrderManager {
    tables: Arc<dyn TableStore>,
    catalog: Arc<dyn MenuCatalog>,
    ledger: Arc<InventoryLedger>,
    board: Arc<StationBoard>,
    router: StationRouter,
    orders: DashMap<i64, Order>,
    ids: Arc<IdGen>,
    event_tx: broadcast::Sender<FulfillmentEvent>,
}

impl std::fmt::Debug for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderManager")
            .field("orders", &self.orders.len())
            .finish()
    }
}

impl OrderManager {
    pub fn new(
        tables: Arc<dyn TableStore>,
        catalog: Arc<dyn MenuCatalog>,
        ledger: Arc<InventoryLedger>,
        board: Arc<StationBoard>,
        router: StationRouter,
        event_channel_capacity: usize,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(event_channel_capacity);
        Self {
            tables,
            catalog,
            ledger,
            board,
            router,
            orders: DashMap::new(),
            ids: Arc::new(IdGen::new()),
            event_tx,
        }
    }

    /// 订阅履约事件流
    pub fn subscribe(&self) -> broadcast::Receiver<FulfillmentEvent> {
        self.event_tx.subscribe()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// 创建订单（全或无）
    pub fn create_order(&self, req: CreateOrderRequest) -> ManagerResult<Order> {
        // 1. 桌台必须存在且 FREE（快速失败，此时还没有碰过库存）
        let table = self
            .tables
            .get(req.table_id)
            .ok_or(ManagerError::TableNotFound(req.table_id))?;
        if table.status != TableStatus::Free {
            return Err(ManagerError::TableNotAvailable {
                id: table.id,
                status: table.status,
            });
        }

        let now = Utc::now();
        let mut deductions: Vec<StockDeduction> = Vec::new();
        let mut lines: Vec<OrderLine> = Vec::new();
        let mut item_snapshots: HashMap<i64, MenuItem> = HashMap::new();

        // 2. 逐行校验并扣减；任何失败都归还之前各行已扣的库存
        for line_req in &req.lines {
            match self.prepare_line(line_req, &lines) {
                Ok(item) => {
                    match self.ledger.check_and_deduct(&item, line_req.quantity) {
                        Ok(line_deductions) => deductions.extend(line_deductions),
                        Err(e) => {
                            self.ledger.restore(&deductions);
                            return Err(e.into());
                        }
                    }
                    let parent_line_id = line_req.parent_index.map(|idx| lines[idx].id);
                    lines.push(OrderLine::new(
                        self.ids.next(),
                        item.id,
                        item.name.clone(),
                        line_req.quantity,
                        item.price,
                        parent_line_id,
                    ));
                    item_snapshots.entry(item.id).or_insert(item);
                }
                Err(e) => {
                    self.ledger.restore(&deductions);
                    return Err(e);
                }
            }
        }

        // 4. 占台。CAS 失败说明输掉了并发竞争，全额回滚
        if let Err(e) =
            self.tables
                .compare_and_set_status(req.table_id, TableStatus::Free, TableStatus::Occupied)
        {
            self.ledger.restore(&deductions);
            return Err(match e {
                TableStoreError::NotFound(id) => ManagerError::TableNotFound(id),
                TableStoreError::StatusConflict { id, actual, .. } => {
                    ManagerError::TableNotAvailable { id, status: actual }
                }
            });
        }

        // 5-6. 落单、分单（内存写入，不再失败）
        let order = Order::new(
            self.ids.next(),
            table.id,
            table.name.clone(),
            lines,
            deductions,
            now,
        );
        let tickets = self.router.route_order(&order, &item_snapshots, &self.ids, now);
        let ticket_ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        self.board.insert_tickets(tickets);
        self.orders.insert(order.id, order.clone());

        info!(
            order_id = order.id,
            table_id = order.table_id,
            total = %order.total,
            ticket_count = ticket_ids.len(),
            "Order created"
        );
        let _ = self.event_tx.send(FulfillmentEvent::OrderCreated {
            order_id: order.id,
            table_id: order.table_id,
            total: order.total,
            ticket_ids,
        });
        Ok(order)
    }

    /// 校验一行请求并加载菜品快照（不碰库存）
    fn prepare_line(
        &self,
        line_req: &OrderLineRequest,
        earlier_lines: &[OrderLine],
    ) -> ManagerResult<MenuItem> {
        if line_req.quantity <= 0 {
            return Err(ManagerError::InvalidQuantity {
                menu_item_id: line_req.menu_item_id,
                quantity: line_req.quantity,
            });
        }
        if let Some(idx) = line_req.parent_index
            && idx >= earlier_lines.len()
        {
            return Err(ManagerError::InvalidParentLine(idx));
        }
        let item = self
            .catalog
            .menu_item(line_req.menu_item_id)
            .ok_or(ManagerError::ItemNotFound(line_req.menu_item_id))?;
        if !item.is_active {
            return Err(ManagerError::ItemInactive {
                id: item.id,
                name: item.name,
            });
        }
        Ok(item)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// 推进订单状态
    ///
    /// PAID / CANCELLED 释放桌台；CANCELLED 同时按建单时的扣减快照
    /// 原额归还库存。
    pub fn advance_order_state(&self, order_id: i64, to: OrderStatus) -> ManagerResult<Order> {
        let (from, order) = {
            let mut entry = self
                .orders
                .get_mut(&order_id)
                .ok_or(ManagerError::OrderNotFound(order_id))?;
            let from = entry.status;
            entry.transition(to)?;
            (from, entry.clone())
        };

        if to == OrderStatus::Cancelled {
            self.ledger.restore(&order.deductions);
        }
        if to.is_terminal()
            && let Err(e) = self.tables.compare_and_set_status(
                order.table_id,
                TableStatus::Occupied,
                TableStatus::Free,
            )
        {
            // 桌台可能已被周边系统改过状态；记录但不让终态失败
            warn!(
                table_id = order.table_id,
                order_id,
                error = %e,
                "Could not free table on terminal order"
            );
        }

        info!(order_id, from = %from, to = %to, "Order state advanced");
        let _ = self.event_tx.send(FulfillmentEvent::OrderStatusChanged {
            order_id,
            table_id: order.table_id,
            from,
            to,
        });
        Ok(order)
    }

    // ------------------------------------------------------------------
    // Ticket operations (pass-through to the board + event emission)
    // ------------------------------------------------------------------

    pub fn start_ticket(&self, ticket_id: i64) -> ManagerResult<StationTicket> {
        let ticket = self.board.start_ticket(ticket_id)?;
        self.emit_ticket_event(&ticket);
        Ok(ticket)
    }

    /// 工单就绪；若该订单的全部工单都已就绪，订单整体推进到 READY
    pub fn ticket_ready(&self, ticket_id: i64) -> ManagerResult<StationTicket> {
        let (ticket, order_ready) = self.board.mark_ticket_ready(ticket_id)?;
        self.emit_ticket_event(&ticket);
        if order_ready {
            self.promote_order_ready(ticket.order_id);
        }
        Ok(ticket)
    }

    pub fn deliver_ticket(&self, ticket_id: i64) -> ManagerResult<StationTicket> {
        let ticket = self.board.deliver_ticket(ticket_id)?;
        self.emit_ticket_event(&ticket);
        Ok(ticket)
    }

    pub fn start_item(&self, ticket_id: i64, item_id: i64) -> ManagerResult<StationTicket> {
        let ticket = self.board.start_item(ticket_id, item_id)?;
        self.emit_ticket_event(&ticket);
        Ok(ticket)
    }

    pub fn item_ready(&self, ticket_id: i64, item_id: i64) -> ManagerResult<StationTicket> {
        let (ticket, _all_ready) = self.board.mark_item_ready(ticket_id, item_id)?;
        self.emit_ticket_event(&ticket);
        Ok(ticket)
    }

    pub fn deliver_item(&self, ticket_id: i64, item_id: i64) -> ManagerResult<StationTicket> {
        let ticket = self.board.deliver_item(ticket_id, item_id)?;
        self.emit_ticket_event(&ticket);
        Ok(ticket)
    }

    /// 两张工单并发就绪时两边都可能走到这里；
    /// 晚到者看到订单已不在 IN_PROGRESS，直接跳过。
    fn promote_order_ready(&self, order_id: i64) {
        let promoted = {
            let Some(mut entry) = self.orders.get_mut(&order_id) else {
                return;
            };
            if entry.status == OrderStatus::InProgress && entry.transition(OrderStatus::Ready).is_ok()
            {
                Some(entry.table_id)
            } else {
                None
            }
        };
        if let Some(table_id) = promoted {
            info!(order_id, "All station tickets ready, order promoted to READY");
            let _ = self.event_tx.send(FulfillmentEvent::OrderStatusChanged {
                order_id,
                table_id,
                from: OrderStatus::InProgress,
                to: OrderStatus::Ready,
            });
        }
    }

    fn emit_ticket_event(&self, ticket: &StationTicket) {
        let _ = self.event_tx.send(FulfillmentEvent::TicketStatusChanged {
            ticket_id: ticket.id,
            order_id: ticket.order_id,
            station_id: ticket.station_id.clone(),
            status: ticket.status,
        });
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get_order(&self, order_id: i64) -> Option<Order> {
        self.orders.get(&order_id).map(|o| o.clone())
    }

    /// 未到终态的订单
    pub fn active_orders(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| !o.status.is_terminal())
            .map(|o| o.clone())
            .collect()
    }

    /// 某桌台当前未到终态的订单
    pub fn active_order_for_table(&self, table_id: i64) -> Option<Order> {
        self.orders
            .iter()
            .find(|o| o.table_id == table_id && !o.status.is_terminal())
            .map(|o| o.clone())
    }
}

#[cfg(test)]
mod tests;
