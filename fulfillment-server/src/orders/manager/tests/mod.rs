use super::*;
use crate::catalog::{InMemoryMenuCatalog, InMemoryTableStore};
use crate::inventory::ledger::LedgerError;
use rust_decimal::Decimal;
use shared::models::{DiningTable, Ingredient, RecipeLine, StationAssignment};
use shared::order::TicketStatus;

mod test_flows;

// Ingredient ids used by the seeded menu
const BUN: i64 = 1;
const PATTY: i64 = 2;

// Menu item ids
const BURGER: i64 = 1;
const SODA: i64 = 2;
const BEER: i64 = 3;

struct Fixture {
    tables: Arc<InMemoryTableStore>,
    catalog: Arc<InMemoryMenuCatalog>,
    ledger: Arc<InventoryLedger>,
    board: Arc<StationBoard>,
    manager: Arc<OrderManager>,
}

fn station(station_id: &str, prep: i32) -> StationAssignment {
    StationAssignment {
        station_id: station_id.to_string(),
        prep_minutes: Some(prep),
    }
}

fn recipe_line(ingredient_id: i64, qty: i64) -> RecipeLine {
    RecipeLine {
        ingredient_id,
        quantity_per_unit: Decimal::from(qty),
    }
}

/// 种子数据：
/// - 桌台 1 (cap 2), 3 (cap 4)，都 FREE
/// - 食材 bun=10, patty=10
/// - Burger 12.50：1×bun + 1×patty，kitchen
/// - Soda 3.00：无配方、无区域
/// - Beer 3.50：无配方，bar
fn fixture() -> Fixture {
    let tables = Arc::new(InMemoryTableStore::new());
    tables.insert(DiningTable::new(1, "Table 1", 2));
    tables.insert(DiningTable::new(3, "Table 3", 4));

    let ledger = Arc::new(InventoryLedger::new());
    ledger.put(Ingredient::new(BUN, "bun", Decimal::from(10), "unit"));
    ledger.put(Ingredient::new(PATTY, "patty", Decimal::from(10), "unit"));

    let catalog = Arc::new(InMemoryMenuCatalog::new());
    catalog.insert(
        MenuItem::new(BURGER, "Burger", Decimal::new(1250, 2))
            .with_recipe(vec![recipe_line(BUN, 1), recipe_line(PATTY, 1)])
            .with_stations(vec![station("kitchen", 12)]),
    );
    catalog.insert(MenuItem::new(SODA, "Soda", Decimal::new(300, 2)));
    catalog.insert(
        MenuItem::new(BEER, "Beer", Decimal::new(350, 2)).with_stations(vec![station("bar", 2)]),
    );

    let board = Arc::new(StationBoard::new());
    let manager = Arc::new(OrderManager::new(
        tables.clone(),
        catalog.clone(),
        ledger.clone(),
        board.clone(),
        StationRouter::new(15),
        256,
    ));

    Fixture {
        tables,
        catalog,
        ledger,
        board,
        manager,
    }
}

fn request(table_id: i64, lines: &[(i64, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        table_id,
        lines: lines
            .iter()
            .map(|&(menu_item_id, quantity)| OrderLineRequest::new(menu_item_id, quantity))
            .collect(),
    }
}

/// 推进一张工单到 READY（启动 + 全部明细就绪 + 工单就绪）
fn drive_ticket_to_ready(manager: &OrderManager, ticket: &StationTicket) {
    manager.start_ticket(ticket.id).unwrap();
    for item in &ticket.items {
        manager.start_item(ticket.id, item.id).unwrap();
        manager.item_ready(ticket.id, item.id).unwrap();
    }
    manager.ticket_ready(ticket.id).unwrap();
}
