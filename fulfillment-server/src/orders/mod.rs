//! Orders - 订单聚合与履约编排
//!
//! `OrderManager` 是用例协调者：校验桌台、扣减库存、落单、分单、
//! 推进生命周期。所有操作对外都是全或无的。

pub mod manager;

pub use manager::{CreateOrderRequest, ManagerError, OrderLineRequest, OrderManager};
