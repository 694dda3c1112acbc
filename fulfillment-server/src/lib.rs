//! Fulfillment Server - 订单履约与区域分单引擎
//!
//! # 架构概述
//!
//! 本 crate 把一张已下的订单变成：
//!
//! - **库存账本** (`inventory`): 按配方原子扣减/归还食材库存
//! - **订单聚合** (`orders`): 订单创建事务与生命周期状态机
//! - **区域分单** (`stations`): 按制作区域拆分工单并独立推进
//! - **打印派发** (`printing`): 工单快照 → 打印任务广播
//! - **目录协作者** (`catalog`): 桌台/菜品/打印机的同步查询接口
//!
//! # 模块结构
//!
//! ```text
//! fulfillment-server/src/
//! ├── core/          # 配置、状态、错误、事件、日志
//! ├── catalog/       # 协作者 trait 与内存实现
//! ├── inventory/     # 库存账本与可售量投影
//! ├── orders/        # 订单管理器（履约编排）
//! ├── stations/      # 分单路由与区域工单看板
//! └── printing/      # 打印任务构建与广播派发
//! ```
//!
//! # Control Flow
//!
//! ```text
//! create_order
//!     ├─ table lookup (must be FREE)
//!     ├─ per line: menu item lookup → ledger check_and_deduct
//!     ├─ table FREE → OCCUPIED (CAS)
//!     ├─ persist order (IN_PROGRESS, deduction snapshot)
//!     ├─ router: fan out one ticket per station
//!     └─ broadcast OrderCreated
//! ```

pub mod catalog;
pub mod core;
pub mod inventory;
pub mod orders;
pub mod printing;
pub mod stations;

// Re-export 公共类型
pub use crate::core::{Config, EngineError, EngineResult, EngineState, FulfillmentEvent};
pub use crate::core::logging::init_logger;
pub use inventory::{InventoryLedger, StockProjector};
pub use orders::{CreateOrderRequest, OrderLineRequest, OrderManager};
pub use printing::{PrintDispatcher, PrintJob, TicketSnapshot};
pub use stations::{StationBoard, StationRouter};
