//! ApproveOrder command handler
//!
//! Head-office sign-off gating branch processing. Same one-way,
//! idempotent semantics as transfer authorization, but applies to
//! every order regardless of payment method.

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
};

/// ApproveOrder action
#[derive(Debug, Clone)]
pub struct ApproveOrderAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for ApproveOrderAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        if order.admin_approved {
            return Ok(None);
        }

        Ok(Some(OrderMutation::ApproveOrder {
            order_id: self.order_id.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::testutil::{metadata, transfer_order};
    use crate::store::{MemoryStore, OrderStore};

    #[tokio::test]
    async fn test_approve_then_noop() {
        let store = MemoryStore::new();
        store.put_order(transfer_order("o1", "b1")).await.unwrap();

        let ctx = CommandContext::new(&store);
        let action = ApproveOrderAction {
            order_id: "o1".into(),
        };

        let first = action.execute(&ctx, &metadata()).await.unwrap();
        assert_eq!(
            first,
            Some(OrderMutation::ApproveOrder {
                order_id: "o1".into()
            })
        );

        // Apply the stamp, then the same command becomes a no-op
        store
            .approve_order("o1", "admin-1", chrono::Utc::now())
            .await
            .unwrap();
        assert_eq!(action.execute(&ctx, &metadata()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let store = MemoryStore::new();
        let ctx = CommandContext::new(&store);
        let action = ApproveOrderAction {
            order_id: "ghost".into(),
        };
        assert!(matches!(
            action.execute(&ctx, &metadata()).await.unwrap_err(),
            OrderError::OrderNotFound(_)
        ));
    }
}
