//! 端到端流程：装配好的引擎从建单到结账/取消的完整闭环

use fulfillment_server::catalog::TableStore;
use fulfillment_server::{
    Config, CreateOrderRequest, EngineState, FulfillmentEvent, OrderLineRequest,
};
use rust_decimal::Decimal;
use shared::models::{
    DiningTable, Ingredient, MenuItem, PrinterConfig, RecipeLine, StationAssignment, TableStatus,
};
use shared::order::{OrderStatus, TicketStatus};

const BUN: i64 = 1;
const PATTY: i64 = 2;
const BURGER: i64 = 1;
const SODA: i64 = 2;
const BEER: i64 = 3;

fn seeded_engine() -> EngineState {
    let engine = EngineState::initialize(&Config::default());

    engine.tables.insert(DiningTable::new(3, "Table 3", 4));
    engine
        .ledger
        .put(Ingredient::new(BUN, "bun", Decimal::from(10), "unit"));
    engine
        .ledger
        .put(Ingredient::new(PATTY, "patty", Decimal::from(10), "unit"));

    engine.catalog.insert(
        MenuItem::new(BURGER, "Burger", Decimal::new(1250, 2))
            .with_recipe(vec![
                RecipeLine {
                    ingredient_id: BUN,
                    quantity_per_unit: Decimal::ONE,
                },
                RecipeLine {
                    ingredient_id: PATTY,
                    quantity_per_unit: Decimal::ONE,
                },
            ])
            .with_stations(vec![StationAssignment {
                station_id: "kitchen".to_string(),
                prep_minutes: Some(12),
            }]),
    );
    engine
        .catalog
        .insert(MenuItem::new(SODA, "Soda", Decimal::new(300, 2)));
    engine.catalog.insert(
        MenuItem::new(BEER, "Beer", Decimal::new(350, 2)).with_stations(vec![StationAssignment {
            station_id: "bar".to_string(),
            prep_minutes: Some(2),
        }]),
    );

    engine
        .printers
        .register(PrinterConfig::new(1, "cashier", "ESCPOS", "/dev/usb/lp0"));
    engine.printers.register(PrinterConfig::new(
        2,
        "kitchen",
        "ESCPOS",
        "192.168.1.50:9100",
    ));

    engine
}

fn request(table_id: i64, lines: &[(i64, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        table_id,
        lines: lines
            .iter()
            .map(|&(id, qty)| OrderLineRequest::new(id, qty))
            .collect(),
    }
}

#[tokio::test]
async fn test_full_service_cycle() {
    let engine = seeded_engine();
    let mut jobs = engine.subscribe_print_jobs();

    // 建单：2 汉堡 + 1 可乐
    let order = engine
        .manager
        .create_order(request(3, &[(BURGER, 2), (SODA, 1)]))
        .unwrap();
    assert_eq!(order.total, Decimal::new(2800, 2));
    assert_eq!(engine.ledger.stock_of(BUN), Decimal::from(8));
    assert_eq!(engine.tables.get(3).unwrap().status, TableStatus::Occupied);

    // 厨房工单打印
    let tickets = engine.board.tickets_for_order(order.id);
    assert_eq!(tickets.len(), 1);
    let ticket = &tickets[0];
    let job = engine.print_station_ticket(ticket.id).unwrap();
    assert_eq!(job.printer_target, "192.168.1.50:9100");
    assert_eq!(job.station_id.as_deref(), Some("kitchen"));
    // 工单票只有厨房的行，总额只含汉堡
    assert_eq!(job.ticket.items.len(), 1);
    assert_eq!(job.ticket.total, Decimal::new(2500, 2));

    // 厨房推进：工单就绪后订单整体晋升 READY
    engine.manager.start_ticket(ticket.id).unwrap();
    for item in &ticket.items {
        engine.manager.start_item(ticket.id, item.id).unwrap();
        engine.manager.item_ready(ticket.id, item.id).unwrap();
    }
    engine.manager.ticket_ready(ticket.id).unwrap();
    assert_eq!(
        engine.manager.get_order(order.id).unwrap().status,
        OrderStatus::Ready
    );

    engine.manager.deliver_ticket(ticket.id).unwrap();
    assert_eq!(
        engine.board.get(ticket.id).unwrap().status,
        TicketStatus::Delivered
    );

    // 上菜 → 结账：收银小票含全单，桌台释放，库存不归还
    engine
        .manager
        .advance_order_state(order.id, OrderStatus::Delivered)
        .unwrap();
    let job = engine.print_cashier_ticket(order.id).unwrap();
    assert_eq!(job.printer_target, "/dev/usb/lp0");
    assert_eq!(job.ticket.items.len(), 2);
    assert_eq!(job.ticket.total, Decimal::new(2800, 2));

    engine
        .manager
        .advance_order_state(order.id, OrderStatus::Paid)
        .unwrap();
    assert_eq!(engine.tables.get(3).unwrap().status, TableStatus::Free);
    assert_eq!(engine.ledger.stock_of(BUN), Decimal::from(8));

    // 打印桥收到两个任务：先厨房工单，后收银小票
    let first = jobs.recv().await.unwrap();
    assert_eq!(first.station_id.as_deref(), Some("kitchen"));
    let second = jobs.recv().await.unwrap();
    assert_eq!(second.station_id, None);
}

#[test]
fn test_cancellation_restores_inventory_and_table() {
    let engine = seeded_engine();

    let order = engine
        .manager
        .create_order(request(3, &[(BURGER, 2), (SODA, 1)]))
        .unwrap();
    assert_eq!(engine.ledger.stock_of(BUN), Decimal::from(8));
    assert_eq!(engine.ledger.stock_of(PATTY), Decimal::from(8));

    engine
        .manager
        .advance_order_state(order.id, OrderStatus::Cancelled)
        .unwrap();

    assert_eq!(engine.ledger.stock_of(BUN), Decimal::from(10));
    assert_eq!(engine.ledger.stock_of(PATTY), Decimal::from(10));
    assert_eq!(engine.tables.get(3).unwrap().status, TableStatus::Free);

    // 桌台已释放，可以立刻重新开单
    engine
        .manager
        .create_order(request(3, &[(SODA, 1)]))
        .unwrap();
}

#[test]
fn test_rejected_order_leaves_engine_untouched() {
    let engine = seeded_engine();

    // 10 个 bun 做不了 11 个汉堡
    let err = engine.manager.create_order(request(3, &[(BURGER, 11)]));
    assert!(err.is_err());

    assert_eq!(engine.ledger.stock_of(BUN), Decimal::from(10));
    assert_eq!(engine.ledger.stock_of(PATTY), Decimal::from(10));
    assert_eq!(engine.tables.get(3).unwrap().status, TableStatus::Free);
    assert!(engine.manager.active_orders().is_empty());
    assert_eq!(engine.available_units(BURGER).unwrap(), 10);
}

#[test]
fn test_projection_tracks_ledger() {
    let engine = seeded_engine();
    assert_eq!(engine.available_units(BURGER).unwrap(), 10);

    engine
        .manager
        .create_order(request(3, &[(BURGER, 4)]))
        .unwrap();
    assert_eq!(engine.available_units(BURGER).unwrap(), 6);

    // 未配配方的菜品不做动态库存计算
    assert_eq!(engine.available_units(SODA).unwrap(), 0);
}

#[tokio::test]
async fn test_station_without_printer_fails_dispatch_only() {
    let engine = seeded_engine();
    let _jobs = engine.subscribe_print_jobs();

    let order = engine
        .manager
        .create_order(request(3, &[(BEER, 1)]))
        .unwrap();
    let ticket = &engine.board.tickets_for_order(order.id)[0];

    // bar 没有登记打印机：派发失败，但订单与工单完好无损
    let err = engine.print_station_ticket(ticket.id).unwrap_err();
    assert_eq!(err.code(), shared::ErrorCode::PrinterNotConfigured);
    assert_eq!(
        engine.manager.get_order(order.id).unwrap().status,
        OrderStatus::InProgress
    );
    assert_eq!(
        engine.board.get(ticket.id).unwrap().status,
        TicketStatus::Pending
    );
}

#[test]
fn test_events_cover_the_whole_cycle() {
    let engine = seeded_engine();
    let mut events = engine.subscribe_events();

    let order = engine
        .manager
        .create_order(request(3, &[(BEER, 1)]))
        .unwrap();
    engine
        .manager
        .advance_order_state(order.id, OrderStatus::Cancelled)
        .unwrap();

    assert!(matches!(
        events.try_recv().unwrap(),
        FulfillmentEvent::OrderCreated { .. }
    ));
    match events.try_recv().unwrap() {
        FulfillmentEvent::OrderStatusChanged { from, to, .. } => {
            assert_eq!(from, OrderStatus::InProgress);
            assert_eq!(to, OrderStatus::Cancelled);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
