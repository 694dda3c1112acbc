//! Printing - 打印任务构建与派发
//!
//! 打印是尽力而为的：派发失败只记录并上报，绝不回滚订单/工单状态。

pub mod dispatcher;
pub mod types;

pub use dispatcher::{DispatchError, PrintDispatcher};
pub use types::{PrintJob, TicketLine, TicketSnapshot};
