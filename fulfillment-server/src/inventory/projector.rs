//! Stock Projector - 按配方计算可制作份数
//!
//! 纯读投影，不做任何变更。结果仅供展示/参考：真正下单时以账本的
//! check-and-deduct 为准，调用方不得把这里的读数当作事务性保证。

use crate::inventory::InventoryLedger;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::MenuItem;
use std::sync::Arc;

/// 可售量投影
#[derive(Debug, Clone)]
pub struct StockProjector {
    ledger: Arc<InventoryLedger>,
}

impl StockProjector {
    pub fn new(ledger: Arc<InventoryLedger>) -> Self {
        Self { ledger }
    }

    /// 当前库存下最多可制作的份数
    ///
    /// 每个配方行取 `floor(库存 / 单份用量)`，忽略用量 <= 0 的行，
    /// 结果取所有行的最小值。没有配方行的菜品返回 0：未配配方的
    /// 菜品不做动态库存计算，其库存由周边系统另行管理。
    pub fn available_units(&self, item: &MenuItem) -> i64 {
        let mut max_units: Option<i64> = None;
        for line in &item.recipe {
            if line.quantity_per_unit <= Decimal::ZERO {
                continue;
            }
            let stock = self.ledger.stock_of(line.ingredient_id);
            let units = (stock / line.quantity_per_unit)
                .floor()
                .to_i64()
                .unwrap_or(0);
            max_units = Some(match max_units {
                Some(current) => current.min(units),
                None => units,
            });
        }
        max_units.unwrap_or(0)
    }
}
