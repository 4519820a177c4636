//! In-memory store backend
//!
//! Mirrors the observed behavior of the hosted document store:
//! last-write-wins, no version checks, no transactions across
//! documents. Used by tests and development mode.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use shared::models::{Branch, DeliveryAgent, Order};
use shared::order::StatusMutation;

use super::{OrderStore, StoreError, StoreResult};

/// DashMap-backed store, keyed by document id
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: DashMap<String, Order>,
    agents: DashMap<String, DeliveryAgent>,
    branches: DashMap<String, Branch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn get_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.iter().map(|e| e.value().clone()).collect())
    }

    async fn get_order(&self, order_id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(order_id).map(|e| e.value().clone()))
    }

    async fn update_order_status(&self, mutation: &StatusMutation) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(&mutation.order_id)
            .ok_or_else(|| StoreError::order_not_found(&mutation.order_id))?;
        entry.status = mutation.status;
        if let Some(delivery_id) = &mutation.delivery_id {
            entry.delivery_id = Some(delivery_id.clone());
        }
        Ok(entry.value().clone())
    }

    async fn authorize_transfer(
        &self,
        order_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::order_not_found(order_id))?;
        // One-way flag: first stamp wins
        if !entry.transfer_authorized {
            entry.transfer_authorized = true;
            entry.transfer_authorized_by = Some(user_id.to_string());
            entry.transfer_authorized_at = Some(at);
        }
        Ok(entry.value().clone())
    }

    async fn approve_order(
        &self,
        order_id: &str,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::order_not_found(order_id))?;
        if !entry.admin_approved {
            entry.admin_approved = true;
            entry.admin_approved_by = Some(user_id.to_string());
            entry.admin_approved_at = Some(at);
        }
        Ok(entry.value().clone())
    }

    async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        self.orders
            .remove(order_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::order_not_found(order_id))
    }

    async fn delete_orders_by_branches(&self, branch_ids: &[String]) -> StoreResult<u64> {
        // Counted inside the closure: the map length can move under a
        // concurrent insert, a before/after diff cannot be trusted
        let mut removed = 0u64;
        self.orders.retain(|_, order| {
            if branch_ids.contains(&order.branch_id) {
                removed += 1;
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    async fn get_delivery_agents(&self, branch_id: &str) -> StoreResult<Vec<DeliveryAgent>> {
        Ok(self
            .agents
            .iter()
            .filter(|e| e.value().branch_id == branch_id)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn get_agent(&self, agent_id: &str) -> StoreResult<Option<DeliveryAgent>> {
        Ok(self.agents.get(agent_id).map(|e| e.value().clone()))
    }

    async fn get_branches(&self) -> StoreResult<Vec<Branch>> {
        Ok(self.branches.iter().map(|e| e.value().clone()).collect())
    }

    async fn put_order(&self, order: Order) -> StoreResult<()> {
        if !order.verify_total() {
            return Err(StoreError::InvalidDocument(format!(
                "order {} total {:.2} does not match item lines",
                order.id, order.total
            )));
        }
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn put_agent(&self, agent: DeliveryAgent) -> StoreResult<()> {
        self.agents.insert(agent.id.clone(), agent);
        Ok(())
    }

    async fn put_branch(&self, branch: Branch) -> StoreResult<()> {
        self.branches.insert(branch.id.clone(), branch);
        Ok(())
    }
}
