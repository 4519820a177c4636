//! Board refresh worker
//!
//! The store is the source of truth; the board polls it on a fixed
//! interval (the source system refreshed every 3 seconds). The worker
//! keeps the latest listing in a shared cache and notifies listeners
//! after each swap. There is no ordering guarantee between a local
//! mutation and the next poll's observed state.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;

use shared::models::Order;

use crate::store::OrderStore;

/// Handle to the background refresh task
pub struct RefreshWorker {
    cache: Arc<RwLock<Vec<Order>>>,
    stop_tx: watch::Sender<bool>,
    notify_rx: watch::Receiver<u64>,
}

impl RefreshWorker {
    /// Spawn the polling loop.
    pub fn spawn(store: Arc<dyn OrderStore>, interval_secs: u64) -> Self {
        let cache: Arc<RwLock<Vec<Order>>> = Arc::new(RwLock::new(Vec::new()));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let (notify_tx, notify_rx) = watch::channel(0u64);

        let task_cache = cache.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
            let mut generation: u64 = 0;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            tracing::debug!("refresh worker stopping");
                            break;
                        }
                    }
                }

                match store.get_orders().await {
                    Ok(orders) => {
                        *task_cache.write() = orders;
                        generation += 1;
                        let _ = notify_tx.send(generation);
                    }
                    Err(e) => {
                        // Keep the previous listing; the next tick retries
                        tracing::warn!(error = %e, "board refresh failed");
                    }
                }
            }
        });

        Self {
            cache,
            stop_tx,
            notify_rx,
        }
    }

    /// Latest successfully fetched listing (unsorted)
    pub fn snapshot(&self) -> Vec<Order> {
        self.cache.read().clone()
    }

    /// Watch channel ticking on every successful refresh
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.notify_rx.clone()
    }

    /// Ask the task to exit
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }
}
