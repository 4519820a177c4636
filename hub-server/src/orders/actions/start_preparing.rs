//! StartPreparing command handler
//!
//! Sends an order to the kitchen (pending/confirmed → preparing).
//! First branch-side progression, so both gates are checked here.

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
    check_branch_gates, check_transition,
};
use shared::models::OrderStatus;
use shared::order::StatusMutation;

/// StartPreparing action
#[derive(Debug, Clone)]
pub struct StartPreparingAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for StartPreparingAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        check_transition(&order, OrderStatus::Preparing)?;
        check_branch_gates(&order)?;

        Ok(Some(OrderMutation::Status(StatusMutation {
            order_id: self.order_id.clone(),
            status: OrderStatus::Preparing,
            delivery_id: None,
        })))
    }
}
