//! Server state - shared service handles

use std::sync::Arc;

use parking_lot::RwLock;

use shared::models::{Order, StatusFilter};

use crate::core::Config;
use crate::orders::sorting::{filter_orders, sort_by_priority};
use crate::orders::{ManagerError, OrdersManager, RefreshWorker};
use crate::store::{MemoryStore, OrderStore};

/// Shared server state.
///
/// Cheap to clone: everything behind `Arc`. The store behind
/// [`OrderStore`] is the production document-store client; development
/// mode and tests run on [`MemoryStore`].
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn OrderStore>,
    pub orders: Arc<OrdersManager>,
    refresh: Arc<RwLock<Option<RefreshWorker>>>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish()
    }
}

impl ServerState {
    pub fn new(config: Config, store: Arc<dyn OrderStore>) -> Self {
        let orders = Arc::new(OrdersManager::new(store.clone()));
        Self {
            config,
            store,
            orders,
            refresh: Arc::new(RwLock::new(None)),
        }
    }

    /// Build the state for the configured environment.
    ///
    /// The hosted document-store client is wired in by the deployment
    /// binary; out of the box the hub runs on the in-memory store.
    pub async fn initialize(config: &Config) -> Self {
        tracing::info!(environment = %config.environment, "initializing state");
        Self::new(config.clone(), Arc::new(MemoryStore::new()))
    }

    /// Start background tasks (board refresh polling)
    pub async fn start_background_tasks(&self) {
        let worker = RefreshWorker::spawn(self.store.clone(), self.config.refresh_interval_secs);
        *self.refresh.write() = Some(worker);
        tracing::info!(
            interval_secs = self.config.refresh_interval_secs,
            "board refresh worker started"
        );
    }

    /// Stop background tasks
    pub fn stop_background_tasks(&self) {
        if let Some(worker) = self.refresh.read().as_ref() {
            worker.stop();
        }
    }

    /// Current board view: the refresh worker's cache when running,
    /// otherwise a direct store read. Sorted and filtered either way.
    pub async fn board_orders(
        &self,
        branch_id: Option<&str>,
        filter: StatusFilter,
    ) -> Result<Vec<Order>, ManagerError> {
        let cached = self.refresh.read().as_ref().map(|w| w.snapshot());
        match cached {
            Some(orders) if !orders.is_empty() => {
                let mut view = filter_orders(&orders, branch_id, filter);
                sort_by_priority(&mut view);
                Ok(view)
            }
            _ => self.orders.list_orders(branch_id, filter).await,
        }
    }
}
