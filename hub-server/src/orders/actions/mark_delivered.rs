//! MarkDelivered command handler (dispatched → delivered)

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
    check_branch_gates, check_transition,
};
use shared::models::OrderStatus;
use shared::order::StatusMutation;

/// MarkDelivered action
#[derive(Debug, Clone)]
pub struct MarkDeliveredAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for MarkDeliveredAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        check_transition(&order, OrderStatus::Delivered)?;
        check_branch_gates(&order)?;

        Ok(Some(OrderMutation::Status(StatusMutation {
            order_id: self.order_id.clone(),
            status: OrderStatus::Delivered,
            delivery_id: None,
        })))
    }
}
