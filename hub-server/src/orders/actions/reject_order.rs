//! RejectOrder command handler
//!
//! Rejection is allowed from any non-terminal state and bypasses the
//! approval/transfer gates: an order that never got approved must
//! still be rejectable.

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation, check_transition,
};
use shared::models::OrderStatus;
use shared::order::StatusMutation;

/// RejectOrder action
#[derive(Debug, Clone)]
pub struct RejectOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for RejectOrderAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        check_transition(&order, OrderStatus::Rejected)?;

        Ok(Some(OrderMutation::Status(StatusMutation {
            order_id: self.order_id.clone(),
            status: OrderStatus::Rejected,
            delivery_id: None,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testutil::{metadata, transfer_order};
    use crate::store::{MemoryStore, OrderStore};

    #[tokio::test]
    async fn test_reject_bypasses_gates() {
        let store = MemoryStore::new();
        // Unauthorized, unapproved transfer order
        store.put_order(transfer_order("o1", "b1")).await.unwrap();

        let ctx = CommandContext::new(&store);
        let action = RejectOrderAction {
            order_id: "o1".into(),
        };
        let mutation = action.execute(&ctx, &metadata()).await.unwrap().unwrap();

        match mutation {
            OrderMutation::Status(m) => assert_eq!(m.status, OrderStatus::Rejected),
            other => panic!("unexpected mutation: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reject_delivered_is_invalid() {
        let store = MemoryStore::new();
        let mut order = transfer_order("o2", "b1");
        order.status = OrderStatus::Delivered;
        store.put_order(order).await.unwrap();

        let ctx = CommandContext::new(&store);
        let action = RejectOrderAction {
            order_id: "o2".into(),
        };
        assert!(matches!(
            action.execute(&ctx, &metadata()).await.unwrap_err(),
            OrderError::InvalidTransition { .. }
        ));
    }
}
