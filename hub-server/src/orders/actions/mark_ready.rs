//! MarkReady command handler (preparing → ready)

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
    check_branch_gates, check_transition,
};
use shared::models::OrderStatus;
use shared::order::StatusMutation;

/// MarkReady action
#[derive(Debug, Clone)]
pub struct MarkReadyAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for MarkReadyAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        check_transition(&order, OrderStatus::Ready)?;
        // Gates hold for every branch-side progression; the flags are
        // one-way so this cannot regress an order mid-kitchen.
        check_branch_gates(&order)?;

        Ok(Some(OrderMutation::Status(StatusMutation {
            order_id: self.order_id.clone(),
            status: OrderStatus::Ready,
            delivery_id: None,
        })))
    }
}
