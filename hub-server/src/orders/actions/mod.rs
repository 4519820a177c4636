//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles one
//! specific command type.

use async_trait::async_trait;

use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation};
use shared::order::{OrderCommand, OrderCommandPayload};

mod approve_order;
mod authorize_transfer;
mod dispatch_order;
mod mark_delivered;
mod mark_ready;
mod reject_order;
mod start_preparing;

pub use approve_order::ApproveOrderAction;
pub use authorize_transfer::AuthorizeTransferAction;
pub use dispatch_order::DispatchOrderAction;
pub use mark_delivered::MarkDeliveredAction;
pub use mark_ready::MarkReadyAction;
pub use reject_order::RejectOrderAction;
pub use start_preparing::StartPreparingAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    StartPreparing(StartPreparingAction),
    MarkReady(MarkReadyAction),
    DispatchOrder(DispatchOrderAction),
    MarkDelivered(MarkDeliveredAction),
    RejectOrder(RejectOrderAction),
    AuthorizeTransfer(AuthorizeTransferAction),
    ApproveOrder(ApproveOrderAction),
}

#[async_trait]
impl CommandHandler for CommandAction {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError> {
        match self {
            CommandAction::StartPreparing(action) => action.execute(ctx, metadata).await,
            CommandAction::MarkReady(action) => action.execute(ctx, metadata).await,
            CommandAction::DispatchOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::MarkDelivered(action) => action.execute(ctx, metadata).await,
            CommandAction::RejectOrder(action) => action.execute(ctx, metadata).await,
            CommandAction::AuthorizeTransfer(action) => action.execute(ctx, metadata).await,
            CommandAction::ApproveOrder(action) => action.execute(ctx, metadata).await,
        }
    }
}

/// Convert OrderCommand to CommandAction
///
/// This is the ONLY place with a match on OrderCommandPayload.
impl From<&OrderCommand> for CommandAction {
    fn from(cmd: &OrderCommand) -> Self {
        match &cmd.payload {
            OrderCommandPayload::StartPreparing { order_id } => {
                CommandAction::StartPreparing(StartPreparingAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::MarkReady { order_id } => {
                CommandAction::MarkReady(MarkReadyAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::DispatchOrder {
                order_id,
                delivery_id,
            } => CommandAction::DispatchOrder(DispatchOrderAction {
                order_id: order_id.clone(),
                delivery_id: delivery_id.clone(),
            }),
            OrderCommandPayload::MarkDelivered { order_id } => {
                CommandAction::MarkDelivered(MarkDeliveredAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::RejectOrder { order_id } => {
                CommandAction::RejectOrder(RejectOrderAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::AuthorizeTransfer { order_id } => {
                CommandAction::AuthorizeTransfer(AuthorizeTransferAction {
                    order_id: order_id.clone(),
                })
            }
            OrderCommandPayload::ApproveOrder { order_id } => {
                CommandAction::ApproveOrder(ApproveOrderAction {
                    order_id: order_id.clone(),
                })
            }
        }
    }
}
