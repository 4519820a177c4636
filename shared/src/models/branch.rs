//! Branch Model

use serde::{Deserialize, Serialize};

/// Physical restaurant location with its own order queue and
/// delivery staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    /// WhatsApp contact number for the branch
    pub whatsapp: Option<String>,
    /// Operating hours, "HH:MM" local time. Open/closed state is
    /// computed by the client against these.
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}
