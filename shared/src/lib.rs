//! Shared types for Comal Hub
//!
//! Common types used across crates: order/agent/branch models,
//! the order command protocol, error types, response structures,
//! and small utilities.

pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use order::{
    CommandError, CommandErrorCode, CommandResponse, OrderCommand, OrderCommandPayload,
    StatusMutation,
};
pub use response::ApiResponse;
