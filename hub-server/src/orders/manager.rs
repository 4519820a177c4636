//! OrdersManager - command validation and mutation submission
//!
//! The manager is the single write path to the store: actions
//! validate and describe a mutation, the manager applies it, then
//! broadcasts the refreshed order to subscribers (board views).

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use shared::models::{Order, StatusFilter};
use shared::order::{CommandError, CommandErrorCode, CommandResponse, OrderCommand};

use super::actions::CommandAction;
use super::dispatch::{DispatchCandidate, dispatch_candidates};
use super::sorting::{filter_orders, sort_by_priority};
use super::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation};
use crate::store::{OrderStore, StoreError};
use thiserror::Error;

/// Change broadcast capacity. Board clients only need the latest
/// state, so lagging receivers may drop intermediate updates.
const CHANGE_CHANNEL_CAPACITY: usize = 1024;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Delivery agent not found: {0}")]
    AgentNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Unauthorized transition: {0}")]
    UnauthorizedTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

impl From<OrderError> for ManagerError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound(id) => ManagerError::OrderNotFound(id),
            OrderError::AgentNotFound(id) => ManagerError::AgentNotFound(id),
            OrderError::Validation(msg) => ManagerError::Validation(msg),
            OrderError::InvalidTransition { from, to } => {
                ManagerError::InvalidTransition(format!("{from:?} -> {to:?}"))
            }
            OrderError::UnauthorizedTransition(msg) => ManagerError::UnauthorizedTransition(msg),
            OrderError::Store(e) => ManagerError::Store(e),
        }
    }
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        let (code, message) = match err {
            ManagerError::Store(e) => {
                // Store failures surface once, no automatic retry
                tracing::error!(error = %e, "store operation failed");
                (CommandErrorCode::StoreUnavailable, e.to_string())
            }
            ManagerError::OrderNotFound(id) => (
                CommandErrorCode::OrderNotFound,
                format!("Order not found: {}", id),
            ),
            ManagerError::AgentNotFound(id) => (
                CommandErrorCode::AgentNotFound,
                format!("Delivery agent not found: {}", id),
            ),
            ManagerError::Validation(msg) => (CommandErrorCode::ValidationFailed, msg),
            ManagerError::InvalidTransition(msg) => (CommandErrorCode::InvalidTransition, msg),
            ManagerError::UnauthorizedTransition(msg) => {
                (CommandErrorCode::UnauthorizedTransition, msg)
            }
            ManagerError::Internal(msg) => (CommandErrorCode::InternalError, msg),
        };
        CommandError::new(code, message)
    }
}

/// OrdersManager for command processing
pub struct OrdersManager {
    store: Arc<dyn OrderStore>,
    change_tx: broadcast::Sender<Order>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("store", &"<OrderStore>")
            .field("change_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl OrdersManager {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { store, change_tx }
    }

    /// Subscribe to order changes produced by commands
    pub fn subscribe(&self) -> broadcast::Receiver<Order> {
        self.change_tx.subscribe()
    }

    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }

    /// Validate and execute a staff command.
    ///
    /// Guard violations never reach the store; store failures are
    /// reported to the caller and leave the board untouched until the
    /// next refresh.
    pub async fn execute_command(&self, cmd: OrderCommand) -> CommandResponse {
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            actor_id: cmd.actor_id.clone(),
            actor_name: cmd.actor_name.clone(),
            timestamp: Utc::now(),
        };

        let action = CommandAction::from(&cmd);
        let ctx = CommandContext::new(self.store.as_ref());

        let mutation = match action.execute(&ctx, &metadata).await {
            Ok(m) => m,
            Err(e) => {
                let manager_err = ManagerError::from(e);
                tracing::warn!(
                    command_id = %metadata.command_id,
                    actor = %metadata.actor_id,
                    error = %manager_err,
                    "command rejected"
                );
                return CommandResponse::error(cmd.command_id, manager_err.into());
            }
        };

        let target = cmd.payload.order_id().to_string();
        match self.apply_mutation(mutation, &metadata, &target).await {
            Ok(order) => {
                tracing::info!(
                    command_id = %metadata.command_id,
                    order_id = %order.id,
                    status = ?order.status,
                    actor = %metadata.actor_id,
                    "command applied"
                );
                // Only board views listen; a send error just means
                // nobody is subscribed right now
                let _ = self.change_tx.send(order.clone());
                CommandResponse::success(cmd.command_id, Some(order))
            }
            Err(e) => CommandResponse::error(cmd.command_id, e.into()),
        }
    }

    /// Apply the mutation an action produced, or refresh the order
    /// for idempotent no-ops.
    async fn apply_mutation(
        &self,
        mutation: Option<OrderMutation>,
        metadata: &CommandMetadata,
        target: &str,
    ) -> ManagerResult<Order> {
        match mutation {
            Some(OrderMutation::Status(m)) => Ok(self.store.update_order_status(&m).await?),
            Some(OrderMutation::AuthorizeTransfer { order_id }) => Ok(self
                .store
                .authorize_transfer(&order_id, &metadata.actor_id, metadata.timestamp)
                .await?),
            Some(OrderMutation::ApproveOrder { order_id }) => Ok(self
                .store
                .approve_order(&order_id, &metadata.actor_id, metadata.timestamp)
                .await?),
            None => {
                // No-op command: respond with the current order state.
                // The action already confirmed the order exists.
                self.store.get_order(target).await?.ok_or_else(|| {
                    ManagerError::Internal("order vanished between read and response".into())
                })
            }
        }
    }

    /// Sorted, filtered board listing
    pub async fn list_orders(
        &self,
        branch_id: Option<&str>,
        filter: StatusFilter,
    ) -> ManagerResult<Vec<Order>> {
        let orders = self.store.get_orders().await?;
        let mut view = filter_orders(&orders, branch_id, filter);
        sort_by_priority(&mut view);
        Ok(view)
    }

    pub async fn get_order(&self, order_id: &str) -> ManagerResult<Order> {
        self.store
            .get_order(order_id)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    /// Candidate agents for dispatching a ready order
    pub async fn dispatch_candidates(&self, order_id: &str) -> ManagerResult<Vec<DispatchCandidate>> {
        let order = self.get_order(order_id).await?;
        let agents = self.store.get_delivery_agents(&order.branch_id).await?;
        let all_orders = self.store.get_orders().await?;
        Ok(dispatch_candidates(&order, &agents, &all_orders))
    }

    /// Admin: remove a single order
    pub async fn delete_order(&self, order_id: &str) -> ManagerResult<()> {
        self.store.delete_order(order_id).await?;
        tracing::info!(order_id = %order_id, "order deleted");
        Ok(())
    }

    /// Admin reset: purge every order of the named branches
    pub async fn delete_orders_by_branches(&self, branch_ids: &[String]) -> ManagerResult<u64> {
        if branch_ids.is_empty() {
            return Err(ManagerError::Validation(
                "select at least one branch".into(),
            ));
        }
        let removed = self.store.delete_orders_by_branches(branch_ids).await?;
        tracing::info!(branches = ?branch_ids, removed, "branch orders purged");
        Ok(removed)
    }
}
