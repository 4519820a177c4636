//! Order command protocol
//!
//! Staff actions on the orders board travel as explicit commands. The
//! hub validates each command against the current order state and, if
//! legal, submits a single [`StatusMutation`] to the document store.
//! The hub itself performs no other I/O for a transition.

use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

/// Staff command against an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Unique command id (idempotency / tracing)
    pub command_id: String,
    /// Acting staff member (String ID, trusted at this layer)
    pub actor_id: String,
    pub actor_name: String,
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    pub fn new(
        actor_id: impl Into<String>,
        actor_name: impl Into<String>,
        payload: OrderCommandPayload,
    ) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            actor_id: actor_id.into(),
            actor_name: actor_name.into(),
            payload,
        }
    }
}

/// Command payload - one variant per staff action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    /// Send the order to the kitchen (pending/confirmed → preparing)
    StartPreparing { order_id: String },
    /// Kitchen finished (preparing → ready)
    MarkReady { order_id: String },
    /// Assign a delivery agent (ready → dispatched)
    DispatchOrder {
        order_id: String,
        delivery_id: String,
    },
    /// Order handed to the customer (dispatched → delivered)
    MarkDelivered { order_id: String },
    /// Reject from any non-terminal state
    RejectOrder { order_id: String },
    /// Admin confirms the bank-transfer receipt is valid
    AuthorizeTransfer { order_id: String },
    /// Head-office sign-off before a branch may act on the order
    ApproveOrder { order_id: String },
}

impl OrderCommandPayload {
    /// The order this command targets
    pub fn order_id(&self) -> &str {
        match self {
            Self::StartPreparing { order_id }
            | Self::MarkReady { order_id }
            | Self::DispatchOrder { order_id, .. }
            | Self::MarkDelivered { order_id }
            | Self::RejectOrder { order_id }
            | Self::AuthorizeTransfer { order_id }
            | Self::ApproveOrder { order_id } => order_id,
        }
    }
}

/// Status write submitted to the document store
///
/// `delivery_id` is only present for dispatch; the store must apply
/// both fields in one write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusMutation {
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<String>,
}

/// Command response returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// The order after the mutation (refreshed from the store)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<crate::models::Order>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, order: Option<crate::models::Order>) -> Self {
        Self {
            command_id,
            success: true,
            order,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            order: None,
            error: Some(error),
        }
    }
}

/// Command error codes (clients localize messages)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    OrderNotFound,
    AgentNotFound,
    /// Missing or malformed transition input (e.g. no agent chosen)
    ValidationFailed,
    /// Illegal from→to pair or terminal state
    InvalidTransition,
    /// Approval or transfer gate not satisfied
    UnauthorizedTransition,
    /// The document store rejected or failed the operation
    StoreUnavailable,
    InternalError,
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}
