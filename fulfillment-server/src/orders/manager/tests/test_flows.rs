//! 生命周期流转：工单推进、订单晋升、支付与取消

use super::*;

#[test]
fn test_cancel_restores_stock_and_frees_table() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 2), (SODA, 1)]))
        .unwrap();
    assert_eq!(fx.ledger.stock_of(BUN), Decimal::from(8));

    let cancelled = fx
        .manager
        .advance_order_state(order.id, OrderStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // 按建单时的扣减快照原额归还
    assert_eq!(fx.ledger.stock_of(BUN), Decimal::from(10));
    assert_eq!(fx.ledger.stock_of(PATTY), Decimal::from(10));
    assert_eq!(fx.tables.get(3).unwrap().status, TableStatus::Free);
}

#[test]
fn test_paid_frees_table_without_restoring_stock() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1)]))
        .unwrap();

    let ticket = &fx.board.tickets_for_order(order.id)[0];
    drive_ticket_to_ready(&fx.manager, ticket);
    fx.manager
        .advance_order_state(order.id, OrderStatus::Delivered)
        .unwrap();
    let paid = fx
        .manager
        .advance_order_state(order.id, OrderStatus::Paid)
        .unwrap();

    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(fx.tables.get(3).unwrap().status, TableStatus::Free);
    // 已消耗的食材不随支付归还
    assert_eq!(fx.ledger.stock_of(BUN), Decimal::from(9));
}

#[test]
fn test_last_ticket_ready_promotes_order() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1), (BEER, 2)]))
        .unwrap();

    let tickets = fx.board.tickets_for_order(order.id);
    assert_eq!(tickets.len(), 2);

    drive_ticket_to_ready(&fx.manager, &tickets[0]);
    // 还有一张工单未就绪，订单保持 IN_PROGRESS
    assert_eq!(
        fx.manager.get_order(order.id).unwrap().status,
        OrderStatus::InProgress
    );

    drive_ticket_to_ready(&fx.manager, &tickets[1]);
    assert_eq!(
        fx.manager.get_order(order.id).unwrap().status,
        OrderStatus::Ready
    );
    // 订单 READY 不释放桌台，要等支付或取消
    assert_eq!(fx.tables.get(3).unwrap().status, TableStatus::Occupied);
}

#[test]
fn test_tickets_run_independent_lifecycles() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1), (BEER, 1)]))
        .unwrap();

    let tickets = fx.board.tickets_for_order(order.id);
    let bar = tickets.iter().find(|t| t.station_id == "bar").unwrap();
    let kitchen = tickets.iter().find(|t| t.station_id == "kitchen").unwrap();

    // bar 一路走到 DELIVERED，kitchen 还没开工
    drive_ticket_to_ready(&fx.manager, bar);
    let delivered = fx.manager.deliver_ticket(bar.id).unwrap();
    assert_eq!(delivered.status, TicketStatus::Delivered);
    assert_eq!(
        fx.board.get(kitchen.id).unwrap().status,
        TicketStatus::Pending
    );
    assert_eq!(
        fx.manager.get_order(order.id).unwrap().status,
        OrderStatus::InProgress
    );
}

#[test]
fn test_ticket_ready_requires_all_items_ready() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1), (BURGER, 1)]))
        .unwrap();

    let ticket = &fx.board.tickets_for_order(order.id)[0];
    assert_eq!(ticket.items.len(), 2);

    fx.manager.start_ticket(ticket.id).unwrap();
    fx.manager.start_item(ticket.id, ticket.items[0].id).unwrap();
    fx.manager.item_ready(ticket.id, ticket.items[0].id).unwrap();

    // 第二条明细还没就绪
    let err = fx.manager.ticket_ready(ticket.id).unwrap_err();
    assert!(matches!(err, ManagerError::Board(_)));

    fx.manager.start_item(ticket.id, ticket.items[1].id).unwrap();
    fx.manager.item_ready(ticket.id, ticket.items[1].id).unwrap();
    let ready = fx.manager.ticket_ready(ticket.id).unwrap();
    assert_eq!(ready.status, TicketStatus::Ready);
}

#[test]
fn test_cancel_allowed_until_delivered() {
    let fx = fixture();

    // READY 的订单仍可取消
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1)]))
        .unwrap();
    let ticket = &fx.board.tickets_for_order(order.id)[0];
    drive_ticket_to_ready(&fx.manager, ticket);
    assert_eq!(
        fx.manager.get_order(order.id).unwrap().status,
        OrderStatus::Ready
    );
    fx.manager
        .advance_order_state(order.id, OrderStatus::Cancelled)
        .unwrap();
    assert_eq!(fx.ledger.stock_of(BUN), Decimal::from(10));

    // DELIVERED 之后不可取消
    let order = fx
        .manager
        .create_order(request(3, &[(BURGER, 1)]))
        .unwrap();
    let ticket = &fx.board.tickets_for_order(order.id)[0];
    drive_ticket_to_ready(&fx.manager, ticket);
    fx.manager
        .advance_order_state(order.id, OrderStatus::Delivered)
        .unwrap();
    let err = fx
        .manager
        .advance_order_state(order.id, OrderStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, ManagerError::Transition(_)));
}

#[test]
fn test_status_change_events_are_broadcast() {
    let fx = fixture();
    let order = fx
        .manager
        .create_order(request(3, &[(BEER, 1)]))
        .unwrap();
    let ticket = &fx.board.tickets_for_order(order.id)[0];

    let mut rx = fx.manager.subscribe();
    drive_ticket_to_ready(&fx.manager, ticket);

    let mut ticket_events = 0;
    let mut saw_order_ready = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            FulfillmentEvent::TicketStatusChanged { ticket_id, .. } => {
                assert_eq!(ticket_id, ticket.id);
                ticket_events += 1;
            }
            FulfillmentEvent::OrderStatusChanged { from, to, .. } => {
                assert_eq!(from, OrderStatus::InProgress);
                assert_eq!(to, OrderStatus::Ready);
                saw_order_ready = true;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    // start_ticket + start_item + item_ready + ticket_ready
    assert_eq!(ticket_events, 4);
    assert!(saw_order_ready);
}
