//! Dispatch-candidate computation
//!
//! Staff pick the agent; the hub only reports each candidate's
//! current load. There is deliberately no auto-assignment here: the
//! business runs manual dispatch, and the tests pin that down.

use serde::Serialize;

use shared::models::{DeliveryAgent, Order, OrderStatus};

/// A delivery agent offered for assignment, with current load
#[derive(Debug, Clone, Serialize)]
pub struct DispatchCandidate {
    pub agent: DeliveryAgent,
    /// Orders currently out with this agent (status dispatched)
    pub active_orders: usize,
    /// True when the agent has nothing out for delivery
    pub available: bool,
}

/// Compute the candidate list for a ready order.
///
/// Candidates are the approved agents of the order's branch;
/// `active_orders` counts dispatched orders assigned to each agent
/// across the whole board. A busy agent remains assignable.
pub fn dispatch_candidates(
    order: &Order,
    agents: &[DeliveryAgent],
    all_orders: &[Order],
) -> Vec<DispatchCandidate> {
    agents
        .iter()
        .filter(|a| a.can_serve(&order.branch_id))
        .map(|a| {
            let active_orders = active_order_count(all_orders, &a.id);
            DispatchCandidate {
                agent: a.clone(),
                active_orders,
                available: active_orders == 0,
            }
        })
        .collect()
}

/// Count of dispatched orders currently assigned to an agent
pub fn active_order_count(orders: &[Order], agent_id: &str) -> usize {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Dispatched && o.delivery_id.as_deref() == Some(agent_id))
        .count()
}
