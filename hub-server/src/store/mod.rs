//! Document-store abstraction
//!
//! All durability lives in an external document store (the production
//! deployment fronts a hosted document database). The hub reaches it
//! only through [`OrderStore`]; the store is the source of truth and
//! applies writes last-write-wins. [`MemoryStore`] backs tests and
//! development mode.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use shared::models::{Branch, DeliveryAgent, Order};
use shared::order::StatusMutation;

/// Store errors (the RemoteError taxonomy)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn order_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "order",
            id: id.into(),
        }
    }

    pub fn agent_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "delivery agent",
            id: id.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Async facade over the external document store.
///
/// Mutating calls return the order as the store sees it after the
/// write, so callers can refresh their view without a second read.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, unordered
    async fn get_orders(&self) -> StoreResult<Vec<Order>>;

    async fn get_order(&self, order_id: &str) -> StoreResult<Option<Order>>;

    /// Apply a validated status write. `delivery_id` (dispatch only)
    /// is written in the same operation as the status.
    async fn update_order_status(&self, mutation: &StatusMutation) -> StoreResult<Order>;

    /// Stamp the transfer-authorization flag. Keeps the first stamp
    /// if the flag is already set.
    async fn authorize_transfer(
        &self,
        order_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Order>;

    /// Stamp the admin-approval flag. Keeps the first stamp if the
    /// flag is already set.
    async fn approve_order(
        &self,
        order_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Order>;

    async fn delete_order(&self, order_id: &str) -> StoreResult<()>;

    /// Purge every order belonging to the given branches. Returns the
    /// number of orders removed.
    async fn delete_orders_by_branches(&self, branch_ids: &[String]) -> StoreResult<u64>;

    async fn get_delivery_agents(&self, branch_id: &str) -> StoreResult<Vec<DeliveryAgent>>;

    async fn get_agent(&self, agent_id: &str) -> StoreResult<Option<DeliveryAgent>>;

    async fn get_branches(&self) -> StoreResult<Vec<Branch>>;

    /// Ingest an order created by the checkout flow. Rejects orders
    /// whose total does not match the item lines.
    async fn put_order(&self, order: Order) -> StoreResult<()>;

    async fn put_agent(&self, agent: DeliveryAgent) -> StoreResult<()>;

    async fn put_branch(&self, branch: Branch) -> StoreResult<()>;
}
