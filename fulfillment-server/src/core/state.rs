//! EngineState - 引擎组合根
//!
//! 按配置装配全部组件并持有它们。嵌入方（HTTP 层、桌面端、测试）
//! 只需要一个 `EngineState`，所有操作从这里出发。

use crate::catalog::{
    InMemoryMenuCatalog, InMemoryPrinterRegistry, InMemoryTableStore, MenuCatalog,
};
use crate::core::config::Config;
use crate::core::error::{EngineError, EngineResult};
use crate::core::events::FulfillmentEvent;
use crate::inventory::{InventoryLedger, StockProjector};
use crate::orders::OrderManager;
use crate::printing::{PrintDispatcher, PrintJob};
use crate::stations::{StationBoard, StationRouter};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// 引擎状态
///
/// 字段是公开的：目录面（桌台/菜品/食材/打印机登记）直接操作
/// 对应的存储，履约面走 `manager` / `dispatcher`。
pub struct EngineState {
    pub config: Config,
    pub tables: Arc<InMemoryTableStore>,
    pub catalog: Arc<InMemoryMenuCatalog>,
    pub printers: Arc<InMemoryPrinterRegistry>,
    pub ledger: Arc<InventoryLedger>,
    pub projector: StockProjector,
    pub board: Arc<StationBoard>,
    pub manager: Arc<OrderManager>,
    pub dispatcher: Arc<PrintDispatcher>,
}

impl std::fmt::Debug for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineState")
            .field("environment", &self.config.environment)
            .finish()
    }
}

impl EngineState {
    /// 装配引擎
    pub fn initialize(config: &Config) -> Self {
        let tables = Arc::new(InMemoryTableStore::new());
        let catalog = Arc::new(InMemoryMenuCatalog::new());
        let printers = Arc::new(InMemoryPrinterRegistry::new());
        let ledger = Arc::new(InventoryLedger::new());
        let board = Arc::new(StationBoard::new());

        let manager = Arc::new(OrderManager::new(
            tables.clone(),
            catalog.clone(),
            ledger.clone(),
            board.clone(),
            StationRouter::new(config.default_prep_minutes),
            config.event_channel_capacity,
        ));
        let dispatcher = Arc::new(PrintDispatcher::new(
            printers.clone(),
            config.print_channel_capacity,
        ));

        info!(environment = %config.environment, "Fulfillment engine initialized");
        Self {
            config: config.clone(),
            tables,
            catalog,
            printers,
            projector: StockProjector::new(ledger.clone()),
            ledger,
            board,
            manager,
            dispatcher,
        }
    }

    /// 履约事件流（订单/工单状态变化）
    pub fn subscribe_events(&self) -> broadcast::Receiver<FulfillmentEvent> {
        self.manager.subscribe()
    }

    /// 打印任务流（打印桥接入点）
    pub fn subscribe_print_jobs(&self) -> broadcast::Receiver<PrintJob> {
        self.dispatcher.subscribe()
    }

    /// 当前库存下某菜品最多可制作的份数
    pub fn available_units(&self, menu_item_id: i64) -> EngineResult<i64> {
        let item = self
            .catalog
            .menu_item(menu_item_id)
            .ok_or_else(|| EngineError::NotFound(format!("menu item {menu_item_id}")))?;
        Ok(self.projector.available_units(&item))
    }

    /// 为订单派发收银小票
    pub fn print_cashier_ticket(&self, order_id: i64) -> EngineResult<PrintJob> {
        let order = self
            .manager
            .get_order(order_id)
            .ok_or_else(|| EngineError::NotFound(format!("order {order_id}")))?;
        Ok(self.dispatcher.dispatch_cashier_ticket(&order)?)
    }

    /// 为一张区域工单派发工单票
    pub fn print_station_ticket(&self, ticket_id: i64) -> EngineResult<PrintJob> {
        let ticket = self
            .board
            .get(ticket_id)
            .ok_or_else(|| EngineError::NotFound(format!("station ticket {ticket_id}")))?;
        let order = self
            .manager
            .get_order(ticket.order_id)
            .ok_or_else(|| EngineError::NotFound(format!("order {}", ticket.order_id)))?;
        Ok(self.dispatcher.dispatch_station_ticket(&order, &ticket)?)
    }
}
