//! AuthorizeTransfer command handler
//!
//! Admin confirmation that a bank-transfer payment receipt is valid.
//! One-way flag: authorizing twice is a success no-op that keeps the
//! first authorizer's stamp.

use async_trait::async_trait;

use crate::orders::traits::{
    CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation,
};
use shared::models::PaymentMethod;

/// AuthorizeTransfer action
#[derive(Debug, Clone)]
pub struct AuthorizeTransferAction {
    pub order_id: String,
}

#[async_trait]
impl CommandHandler for AuthorizeTransferAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        let order = ctx.load_order(&self.order_id).await?;

        if order.payment_method != PaymentMethod::Transfer {
            return Err(OrderError::Validation(format!(
                "order {} was not paid by transfer",
                order.order_number
            )));
        }

        if order.transfer_authorized {
            // Idempotent: nothing to write, first stamp stands
            return Ok(None);
        }

        Ok(Some(OrderMutation::AuthorizeTransfer {
            order_id: self.order_id.clone(),
        }))
    }
}
