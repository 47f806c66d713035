//! Per-station write locks

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by station id.
///
/// Booking writes for one station run one at a time; different stations
/// never wait on each other. Entries live as long as the registry.
#[derive(Default)]
pub struct StationLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl StationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `station_id`. Released on drop.
    pub async fn acquire(&self, station_id: i64) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the DashMap shard is not held while waiting.
        let lock = self
            .locks
            .entry(station_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_station_is_exclusive() {
        let locks = StationLocks::new();
        let guard = locks.acquire(1).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(1)).await;
        assert!(second.is_err());
        drop(guard);
        assert!(tokio::time::timeout(Duration::from_millis(50), locks.acquire(1))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn different_stations_do_not_block() {
        let locks = StationLocks::new();
        let _a = locks.acquire(1).await;
        assert!(tokio::time::timeout(Duration::from_millis(50), locks.acquire(2))
            .await
            .is_ok());
    }
}
