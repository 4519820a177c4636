//! DispatchOrder command handler (ready → dispatched)
//!
//! The only transition with a side effect beyond the status write:
//! it records the chosen delivery agent on the order. Selection is
//! always made by staff; the hub never picks an agent by itself.

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
    check_branch_gates, check_transition,
};
use shared::models::OrderStatus;
use shared::order::StatusMutation;

/// DispatchOrder action
#[derive(Debug, Clone)]
pub struct DispatchOrderAction {
    pub order_id: String,
    pub delivery_id: String,
}

#[async_trait]
impl CommandHandler for DispatchOrderAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        if self.delivery_id.trim().is_empty() {
            return Err(OrderError::Validation(
                "a delivery agent must be selected to dispatch".into(),
            ));
        }

        let order = ctx.load_order(&self.order_id).await?;

        check_transition(&order, OrderStatus::Dispatched)?;
        check_branch_gates(&order)?;

        // The assignment list only ever offers approved agents of the
        // order's branch; enforce the same here.
        let agent = ctx.load_agent(&self.delivery_id).await?;
        if !agent.can_serve(&order.branch_id) {
            return Err(OrderError::Validation(format!(
                "agent {} is not an approved agent of branch {}",
                agent.id, order.branch_id
            )));
        }

        Ok(Some(OrderMutation::Status(StatusMutation {
            order_id: self.order_id.clone(),
            status: OrderStatus::Dispatched,
            delivery_id: Some(self.delivery_id.clone()),
        })))
    }
}
