//! Data models
//!
//! One file per entity, payload structs next to the entity they mutate.

pub mod branch;
pub mod delivery_agent;
pub mod order;

pub use branch::Branch;
pub use delivery_agent::{AgentStatus, DeliveryAgent};
pub use order::{DeliveryType, Order, OrderItem, OrderStatus, PaymentMethod, StatusFilter};
