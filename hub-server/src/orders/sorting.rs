//! Board sorting policy
//!
//! Orders needing the most urgent attention surface first: fresh
//! (pending/confirmed) before kitchen, kitchen before ready, ready
//! before dispatched. Within a rank, older orders come first. Pure
//! functions, no side effects.

use shared::models::{Order, StatusFilter};

/// Sort orders for display.
///
/// Total order: status priority rank, then ascending `created_at`,
/// then `id` as the final tie-break. Stable and idempotent: sorting
/// an already-sorted list leaves it unchanged.
pub fn sort_by_priority(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        a.status
            .priority_rank()
            .cmp(&b.status.priority_rank())
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Apply the board's branch and status filters.
///
/// `branch_id == None` means the admin view (all branches).
pub fn filter_orders(orders: &[Order], branch_id: Option<&str>, filter: StatusFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| branch_id.is_none_or(|b| o.branch_id == b))
        .filter(|o| filter.matches(o.status))
        .cloned()
        .collect()
}
