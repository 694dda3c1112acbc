//! Station Router - 把订单行按制作区域拆成工单
//!
//! 每个有 ≥1 行的区域得到一张 PENDING 工单；菜品分配到几个区域就
//! 出现在几张工单上，且都是整量（多区域协作制作同一道菜时，每个
//! 区域都要看到全量）。没有任何区域分配的菜品不参与分单，但仍然
//! 计入订单账单。

use crate::core::IdGen;
use chrono::{DateTime, Utc};
use shared::models::MenuItem;
use shared::order::{Order, StationTicket, StationTicketItem};
use std::collections::{BTreeMap, HashMap};

/// 分单路由器
#[derive(Debug, Clone)]
pub struct StationRouter {
    /// 区域分配未给出制作时长时的估算值（分钟）
    default_prep_minutes: i32,
}

impl StationRouter {
    pub fn new(default_prep_minutes: i32) -> Self {
        Self {
            default_prep_minutes,
        }
    }

    /// 拆分一张订单
    ///
    /// `items` 是建单时已加载的菜品快照（按 id 索引），分单用它查
    /// 区域分配，不再回目录二次查询。
    pub fn route_order(
        &self,
        order: &Order,
        items: &HashMap<i64, MenuItem>,
        ids: &IdGen,
        now: DateTime<Utc>,
    ) -> Vec<StationTicket> {
        // BTreeMap: 工单生成顺序按区域名稳定
        let mut buckets: BTreeMap<String, Vec<(StationTicketItem, i32)>> = BTreeMap::new();

        for line in &order.lines {
            let Some(item) = items.get(&line.menu_item_id) else {
                // 建单时已校验过菜品存在；防御性跳过而不是 panic
                tracing::warn!(
                    menu_item_id = line.menu_item_id,
                    "Menu item snapshot missing during routing, line skipped"
                );
                continue;
            };
            for assignment in &item.stations {
                let prep = assignment.prep_minutes.unwrap_or(self.default_prep_minutes);
                let ticket_item = StationTicketItem::new(
                    ids.next(),
                    line.id,
                    line.menu_item_id,
                    line.name.clone(),
                    line.quantity,
                    line.unit_price,
                );
                buckets
                    .entry(assignment.station_id.clone())
                    .or_default()
                    .push((ticket_item, prep));
            }
        }

        buckets
            .into_iter()
            .map(|(station_id, entries)| {
                let estimated = entries.iter().map(|(_, prep)| *prep).max();
                let items = entries.into_iter().map(|(item, _)| item).collect();
                let ticket =
                    StationTicket::new(ids.next(), order.id, station_id, estimated, items, now);
                tracing::info!(
                    ticket_id = ticket.id,
                    order_id = order.id,
                    station_id = %ticket.station_id,
                    item_count = ticket.items.len(),
                    "Station ticket routed"
                );
                ticket
            })
            .collect()
    }
}
