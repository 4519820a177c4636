//! Command handler traits and shared context
//!
//! Every staff command is handled by one action type implementing
//! [`CommandHandler`]. Actions only read through the
//! [`CommandContext`] and describe the write they want as an
//! [`OrderMutation`]; the manager is the single place that talks to
//! the store for writes. A guard failure therefore always rejects the
//! command before any mutation is attempted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use shared::models::{DeliveryAgent, Order, OrderStatus};
use shared::order::StatusMutation;

use crate::store::{OrderStore, StoreError};

/// Errors produced while validating or executing a command
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Delivery agent not found: {0}")]
    AgentNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Unauthorized transition: {0}")]
    UnauthorizedTransition(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Who issued the command, and when
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Read-only view over the store for command validation
pub struct CommandContext<'a> {
    store: &'a dyn OrderStore,
}

impl<'a> CommandContext<'a> {
    pub fn new(store: &'a dyn OrderStore) -> Self {
        Self { store }
    }

    /// Load the order or fail with OrderNotFound
    pub async fn load_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.store
            .get_order(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Load the delivery agent or fail with AgentNotFound
    pub async fn load_agent(&self, agent_id: &str) -> Result<DeliveryAgent, OrderError> {
        self.store
            .get_agent(agent_id)
            .await?
            .ok_or_else(|| OrderError::AgentNotFound(agent_id.to_string()))
    }
}

/// The write a successful command wants applied.
///
/// `None` from a handler means the command was an idempotent no-op
/// (e.g. re-authorizing an already-authorized transfer) and nothing
/// is written.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderMutation {
    /// Status write, optionally carrying the assigned agent
    Status(StatusMutation),
    /// Stamp the transfer-authorization flag
    AuthorizeTransfer { order_id: String },
    /// Stamp the admin-approval flag
    ApproveOrder { order_id: String },
}

/// One action per command type
#[async_trait]
pub trait CommandHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Option<OrderMutation>, OrderError>;
}

/// Shared guard for branch-side progression.
///
/// The source system only gated these transitions in the UI; here they
/// are hard guards so a crafted request cannot bypass them.
pub fn check_branch_gates(order: &Order) -> Result<(), OrderError> {
    if !order.admin_approved {
        return Err(OrderError::UnauthorizedTransition(format!(
            "order {} is awaiting admin approval",
            order.order_number
        )));
    }
    if order.payment_method == shared::models::PaymentMethod::Transfer
        && !order.transfer_authorized
    {
        return Err(OrderError::UnauthorizedTransition(format!(
            "order {} is awaiting transfer authorization",
            order.order_number
        )));
    }
    Ok(())
}

/// Shared transition-shape guard
pub fn check_transition(order: &Order, to: OrderStatus) -> Result<(), OrderError> {
    if !order.status.can_transition_to(to) {
        return Err(OrderError::InvalidTransition {
            from: order.status,
            to,
        });
    }
    Ok(())
}
