//! Delivery Agent Model

use serde::{Deserialize, Serialize};

/// Registration status of a delivery agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Delivery agent attached to a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAgent {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Branch reference (String ID)
    pub branch_id: String,
    pub status: AgentStatus,
}

impl DeliveryAgent {
    /// Only approved agents of the order's branch may be assigned
    pub fn can_serve(&self, branch_id: &str) -> bool {
        self.status == AgentStatus::Approved && self.branch_id == branch_id
    }
}
