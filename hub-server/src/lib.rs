//! Comal Hub Server - branch order management for a multi-branch
//! restaurant delivery business
//!
//! # Module structure
//!
//! ```text
//! hub-server/src/
//! ├── core/          # Config, state, server
//! ├── store/         # Document-store abstraction + in-memory backend
//! ├── orders/        # Lifecycle state machine, sorting, dispatch, refresh worker
//! ├── routes/        # HTTP routes
//! └── utils/         # Logging and helpers
//! ```
//!
//! The hub holds no durable state of its own: every mutation is an
//! explicit write against the external document store behind
//! [`store::OrderStore`], validated first by the order state machine.

pub mod core;
pub mod orders;
pub mod routes;
pub mod store;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use orders::{OrdersManager, RefreshWorker};
pub use store::{MemoryStore, OrderStore, StoreError};
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______                      __
  / ____/___  ____ ___  ____ _/ /
 / /   / __ \/ __ `__ \/ __ `/ /
/ /___/ /_/ / / / / / / /_/ / /
\____/\____/_/ /_/ /_/\__,_/_/
         H U B   S E R V E R
"#
    );
}

/// Set up process environment: dotenv, then logging.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
