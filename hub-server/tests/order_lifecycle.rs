//! End-to-end lifecycle flows against the in-memory store.
//!
//! Drives the manager the way the HTTP layer does: seed orders and
//! agents, then walk real command sequences and check what lands in
//! the store.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use hub_server::orders::OrdersManager;
use hub_server::store::{MemoryStore, OrderStore};
use shared::models::{
    AgentStatus, DeliveryAgent, DeliveryType, Order, OrderItem, OrderStatus, PaymentMethod,
    StatusFilter,
};
use shared::order::{CommandErrorCode, OrderCommand, OrderCommandPayload};

fn order(id: &str, branch_id: &str) -> Order {
    Order {
        id: id.to_string(),
        order_number: format!("FC-{id}"),
        branch_id: branch_id.to_string(),
        customer_id: "c1".into(),
        customer_name: Some("Cliente Prueba".into()),
        customer_phone: Some("99887766".into()),
        delivery_address: Some("Col. Centro, casa 12".into()),
        delivery_type: DeliveryType::Delivery,
        items: vec![OrderItem {
            product_name: "Combo 1".into(),
            quantity: 2,
            price: 120.50,
        }],
        total: 241.00,
        status: OrderStatus::Pending,
        payment_method: PaymentMethod::Cash,
        receipt_image: None,
        transfer_authorized: false,
        transfer_authorized_by: None,
        transfer_authorized_at: None,
        admin_approved: true,
        admin_approved_by: Some("admin-1".into()),
        admin_approved_at: Some(Utc.with_ymd_and_hms(2026, 8, 30, 10, 0, 0).unwrap()),
        delivery_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 8, 30, 11, 0, 0).unwrap(),
    }
}

fn agent(id: &str, branch_id: &str) -> DeliveryAgent {
    DeliveryAgent {
        id: id.to_string(),
        name: format!("Agent {id}"),
        phone: "99001122".into(),
        branch_id: branch_id.to_string(),
        status: AgentStatus::Approved,
    }
}

async fn setup(orders: Vec<Order>, agents: Vec<DeliveryAgent>) -> (Arc<MemoryStore>, OrdersManager) {
    let store = Arc::new(MemoryStore::new());
    for o in orders {
        store.put_order(o).await.unwrap();
    }
    for a in agents {
        store.put_agent(a).await.unwrap();
    }
    let manager = OrdersManager::new(store.clone());
    (store, manager)
}

fn cmd(payload: OrderCommandPayload) -> OrderCommand {
    OrderCommand::new("staff-1", "Test Staff", payload)
}

#[tokio::test]
async fn test_full_delivery_flow() {
    let (store, manager) = setup(vec![order("o1", "b1")], vec![agent("a1", "b1")]).await;

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::StartPreparing {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success, "start preparing failed: {:?}", resp.error);
    assert_eq!(resp.order.unwrap().status, OrderStatus::Preparing);

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::MarkReady {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "a1".into(),
        }))
        .await;
    assert!(resp.success, "dispatch failed: {:?}", resp.error);
    let dispatched = resp.order.unwrap();
    assert_eq!(dispatched.status, OrderStatus::Dispatched);
    assert_eq!(dispatched.delivery_id.as_deref(), Some("a1"));

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::MarkDelivered {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);

    let stored = store.get_order("o1").await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);
    assert_eq!(stored.delivery_id.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_unapproved_order_blocked_until_approval() {
    let mut o = order("o1", "b1");
    o.admin_approved = false;
    o.admin_approved_by = None;
    o.admin_approved_at = None;
    let (_store, manager) = setup(vec![o], vec![]).await;

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::StartPreparing {
            order_id: "o1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(
        resp.error.unwrap().code,
        CommandErrorCode::UnauthorizedTransition
    );

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::ApproveOrder {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);
    let approved = resp.order.unwrap();
    assert!(approved.admin_approved);
    assert_eq!(approved.admin_approved_by.as_deref(), Some("staff-1"));

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::StartPreparing {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);
}

#[tokio::test]
async fn test_transfer_gate_and_idempotent_authorization() {
    let mut o = order("o1", "b1");
    o.payment_method = PaymentMethod::Transfer;
    o.receipt_image = Some("receipts/o1.jpg".into());
    let (store, manager) = setup(vec![o], vec![]).await;

    // Approved but the receipt is not authorized yet
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::StartPreparing {
            order_id: "o1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(
        resp.error.unwrap().code,
        CommandErrorCode::UnauthorizedTransition
    );

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::AuthorizeTransfer {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);
    let first = resp.order.unwrap();
    assert!(first.transfer_authorized);
    let first_at = first.transfer_authorized_at;

    // Second authorization succeeds but keeps the first stamp
    let resp = manager
        .execute_command(OrderCommand::new(
            "staff-2",
            "Second Staff",
            OrderCommandPayload::AuthorizeTransfer {
                order_id: "o1".into(),
            },
        ))
        .await;
    assert!(resp.success);
    let stored = store.get_order("o1").await.unwrap().unwrap();
    assert_eq!(stored.transfer_authorized_by.as_deref(), Some("staff-1"));
    assert_eq!(stored.transfer_authorized_at, first_at);

    let resp = manager
        .execute_command(cmd(OrderCommandPayload::StartPreparing {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);
}

#[tokio::test]
async fn test_rejection_bypasses_gates_but_not_terminal_states() {
    let mut o = order("o1", "b1");
    o.admin_approved = false;
    o.admin_approved_by = None;
    o.admin_approved_at = None;
    let (store, manager) = setup(vec![o], vec![]).await;

    // Unapproved order can still be rejected
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::RejectOrder {
            order_id: "o1".into(),
        }))
        .await;
    assert!(resp.success);
    assert_eq!(
        store.get_order("o1").await.unwrap().unwrap().status,
        OrderStatus::Rejected
    );

    // Rejected is terminal
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::RejectOrder {
            order_id: "o1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::InvalidTransition);
}

#[tokio::test]
async fn test_dispatch_requires_eligible_agent() {
    let mut ready = order("o1", "b1");
    ready.status = OrderStatus::Ready;
    let mut pending_agent = agent("a2", "b1");
    pending_agent.status = AgentStatus::Pending;
    let (_store, manager) = setup(
        vec![ready],
        vec![agent("a1", "b2"), pending_agent],
    )
    .await;

    // Unknown agent
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "ghost".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::AgentNotFound);

    // Wrong branch
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "a1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::ValidationFailed);

    // Not yet approved as an agent
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "a2".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::ValidationFailed);

    // Blank selection never reaches the store
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "  ".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_skipping_stages_is_rejected() {
    let (_store, manager) = setup(vec![order("o1", "b1")], vec![agent("a1", "b1")]).await;

    // Pending straight to dispatched
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "a1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::InvalidTransition);

    // Pending straight to delivered
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::MarkDelivered {
            order_id: "o1".into(),
        }))
        .await;
    assert!(!resp.success);
    assert_eq!(resp.error.unwrap().code, CommandErrorCode::InvalidTransition);
}

#[tokio::test]
async fn test_board_listing_sorted_and_filtered() {
    let mut preparing = order("o1", "b1");
    preparing.status = OrderStatus::Preparing;
    let mut ready_old = order("o2", "b1");
    ready_old.status = OrderStatus::Ready;
    let mut ready_new = order("o3", "b1");
    ready_new.status = OrderStatus::Ready;
    ready_new.created_at = ready_old.created_at + Duration::minutes(30);
    let other_branch = order("o4", "b2");

    let (_store, manager) = setup(
        vec![preparing, ready_old, ready_new, other_branch],
        vec![],
    )
    .await;

    let board = manager
        .list_orders(Some("b1"), StatusFilter::All)
        .await
        .unwrap();
    let ids: Vec<&str> = board.iter().map(|o| o.id.as_str()).collect();
    // Preparing outranks ready; older ready first within the rank
    assert_eq!(ids, vec!["o1", "o2", "o3"]);

    let ready_only = manager
        .list_orders(Some("b1"), StatusFilter::Ready)
        .await
        .unwrap();
    assert_eq!(ready_only.len(), 2);
}

#[tokio::test]
async fn test_dispatch_candidates_report_load() {
    let mut ready = order("o1", "b1");
    ready.status = OrderStatus::Ready;
    let mut out_for_delivery = order("o2", "b1");
    out_for_delivery.status = OrderStatus::Dispatched;
    out_for_delivery.delivery_id = Some("a1".into());

    let (_store, manager) = setup(
        vec![ready, out_for_delivery],
        vec![agent("a1", "b1"), agent("a2", "b1")],
    )
    .await;

    let mut candidates = manager.dispatch_candidates("o1").await.unwrap();
    candidates.sort_by(|a, b| a.agent.id.cmp(&b.agent.id));
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].active_orders, 1);
    assert!(!candidates[0].available);
    assert_eq!(candidates[1].active_orders, 0);
    assert!(candidates[1].available);

    // A busy agent is still assignable
    let resp = manager
        .execute_command(cmd(OrderCommandPayload::DispatchOrder {
            order_id: "o1".into(),
            delivery_id: "a1".into(),
        }))
        .await;
    assert!(resp.success, "busy agent dispatch failed: {:?}", resp.error);
}

#[tokio::test]
async fn test_branch_reset_only_touches_selected_branches() {
    let (store, manager) = setup(
        vec![order("o1", "b1"), order("o2", "b1"), order("o3", "b2")],
        vec![],
    )
    .await;

    let removed = manager
        .delete_orders_by_branches(&["b1".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert!(store.get_order("o1").await.unwrap().is_none());
    assert!(store.get_order("o3").await.unwrap().is_some());

    let err = manager.delete_orders_by_branches(&[]).await.unwrap_err();
    assert!(err.to_string().contains("at least one branch"));
}
