//! Stations - 区域分单与工单推进
//!
//! - **router**: 按菜品的区域分配把订单行拆成每区域一张工单
//! - **board**: 工单看板，持有工单并推进其独立生命周期

pub mod board;
pub mod router;

pub use board::{BoardError, StationBoard};
pub use router::StationRouter;
