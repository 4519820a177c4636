//! Shared helpers for orders unit tests

use chrono::{TimeZone, Utc};

use crate::orders::traits::CommandMetadata;
use shared::models::{
    AgentStatus, DeliveryAgent, DeliveryType, Order, OrderItem, OrderStatus, PaymentMethod,
};

pub fn metadata() -> CommandMetadata {
    CommandMetadata {
        command_id: "cmd-1".to_string(),
        actor_id: "staff-1".to_string(),
        actor_name: "Test Staff".to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
    }
}

fn base_order(id: &str, branch_id: &str) -> Order {
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
        admin_approved: false,
        admin_approved_by: None,
        admin_approved_at: None,
        delivery_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 8, 30, 11, 0, 0).unwrap(),
    }
}

/// Cash order already approved by head office, in Pending
pub fn approved_order(id: &str, branch_id: &str) -> Order {
    let mut order = base_order(id, branch_id);
    order.admin_approved = true;
    order.admin_approved_by = Some("admin-1".into());
    order.admin_approved_at = Some(order.created_at);
    order
}

/// Transfer order with neither gate satisfied
pub fn transfer_order(id: &str, branch_id: &str) -> Order {
    let mut order = base_order(id, branch_id);
    order.payment_method = PaymentMethod::Transfer;
    order.receipt_image = Some(format!("receipts/{id}.jpg"));
    order
}

/// Approved agent of the given branch
pub fn agent(id: &str, branch_id: &str) -> DeliveryAgent {
    DeliveryAgent {
        id: id.to_string(),
        name: format!("Agent {id}"),
        phone: "99001122".into(),
        branch_id: branch_id.to_string(),
        status: AgentStatus::Approved,
    }
}
