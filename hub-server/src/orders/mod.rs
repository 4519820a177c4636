//! Order lifecycle management
//!
//! - **manager**: command validation and mutation submission
//! - **actions**: one handler per staff command
//! - **sorting**: deterministic board ordering
//! - **dispatch**: dispatch-candidate computation
//! - **refresh**: polling worker keeping a board cache warm
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Resolve action from payload
//!     ├─ 2. Validate against current store state (guards)
//!     ├─ 3. Submit the produced mutation to the store
//!     ├─ 4. Broadcast the refreshed order
//!     └─ 5. Return CommandResponse
//! ```
//!
//! Guard failures stop at step 2; the store is never touched.

pub mod actions;
pub mod dispatch;
pub mod manager;
pub mod refresh;
pub mod sorting;
pub mod traits;

#[cfg(test)]
pub mod testutil;

// Re-exports
pub use dispatch::{DispatchCandidate, dispatch_candidates};
pub use manager::{ManagerError, OrdersManager};
pub use refresh::RefreshWorker;
pub use sorting::{filter_orders, sort_by_priority};
pub use traits::{CommandContext, CommandHandler, CommandMetadata, OrderError, OrderMutation};
