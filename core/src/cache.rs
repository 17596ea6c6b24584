//! Analytics cache — the only mutable process-wide state.
//!
//! Lifecycle: empty at process start; populated by the first successful
//! aggregation (background refresher, or lazily by the first read); replaced
//! wholesale on every refresh. Readers take the current Arc under a read
//! lock and never wait on an in-flight aggregation — a refresh computes the
//! new snapshot fully before swapping it in, so a reader observes either the
//! prior snapshot or the new one, never a mix.

use crate::{
    analytics::{self, AnalyticsSnapshot},
    error::{AdvisorError, AdvisorResult},
    store::AdvisorStore,
};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use std::time::Duration;

type Slot = Option<Arc<AnalyticsSnapshot>>;

#[derive(Default)]
pub struct AnalyticsCache {
    current: RwLock<Slot>,
}

impl AnalyticsCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The most recent successfully computed snapshot, if any.
    pub fn get(&self) -> Option<Arc<AnalyticsSnapshot>> {
        self.read_slot().clone()
    }

    /// Replace the snapshot wholesale.
    pub fn replace(&self, snapshot: Arc<AnalyticsSnapshot>) {
        *self.write_slot() = Some(snapshot);
    }

    // The slot only ever holds a fully-built Arc, so a poisoned lock cannot
    // expose partial state — recover the guard and keep serving.
    fn read_slot(&self) -> RwLockReadGuard<'_, Slot> {
        self.current.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Slot> {
        self.current.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// One refresh pass: aggregate and swap on success; keep the previous
/// snapshot on failure. Returns whether the pass succeeded.
pub fn refresh_once(cache: &AnalyticsCache, store: &AdvisorStore) -> bool {
    match analytics::aggregate(store) {
        Ok(snapshot) => {
            log::info!(
                "analytics: snapshot refreshed ({} customers, {} recommendations)",
                snapshot.total_customers,
                snapshot.total_recommendations
            );
            cache.replace(Arc::new(snapshot));
            true
        }
        Err(e) => {
            log::warn!("analytics: refresh failed, serving previous snapshot: {e}");
            false
        }
    }
}

/// Spawn the background refresher: one pass immediately, then one per
/// interval, until process exit. The thread owns its own store connection
/// and never exits on aggregation errors — the next interval is the retry.
pub fn spawn_refresher(
    cache: Arc<AnalyticsCache>,
    store: AdvisorStore,
    interval: Duration,
) -> AdvisorResult<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("analytics-refresher".to_string())
        .spawn(move || loop {
            refresh_once(&cache, &store);
            thread::sleep(interval);
        })
        .map_err(|e| AdvisorError::Other(anyhow::anyhow!("cannot spawn refresher: {e}")))
}
