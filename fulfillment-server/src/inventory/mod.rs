//! Inventory - 库存账本与可售量投影
//!
//! - **ledger**: 原子的配方校验+扣减 / 归还
//! - **projector**: 只读的可制作份数计算

pub mod ledger;
pub mod projector;

pub use ledger::{InventoryLedger, LedgerError};
pub use projector::StockProjector;
