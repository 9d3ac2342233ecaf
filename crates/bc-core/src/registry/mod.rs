//! The blocked-date registry
//!
//! In-memory ordered set of blocked dates mirrored to SQLite. The durable
//! write happens before the in-memory set is touched, so a failed write
//! never leaves the two out of sync, and the table's primary key settles
//! races between concurrent writers for the same date.

mod store;

pub use store::BlockedDateStore;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::date::NormalizedDate;
use crate::{Error, Result, Snapshot};

/// Authoritative registry of blocked dates.
///
/// Cheap to clone; clones share the same store and in-memory set.
#[derive(Clone)]
pub struct DateRegistry {
    /// Persistent storage (wrapped in Mutex for thread safety)
    store: Arc<Mutex<BlockedDateStore>>,
    /// In-memory mirror, chronologically ordered
    dates: Arc<RwLock<BTreeSet<NormalizedDate>>>,
}

impl DateRegistry {
    pub fn new(store: BlockedDateStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            dates: Arc::new(RwLock::new(BTreeSet::new())),
        }
    }

    /// Replace the in-memory set with a full scan of the store. Called once
    /// at startup before the registry serves any request.
    pub async fn reload(&self) -> Result<usize> {
        let loaded = {
            let store = self.store.lock().unwrap();
            store.select_all()?
        };
        let count = loaded.len();

        let mut dates = self.dates.write().await;
        *dates = loaded.into_iter().collect();
        info!("registry reloaded with {count} blocked dates");
        Ok(count)
    }

    /// Current blocked dates in ascending chronological order.
    pub async fn list(&self) -> Vec<NormalizedDate> {
        let dates = self.dates.read().await;
        dates.iter().copied().collect()
    }

    /// Current blocked dates in wire form (`DD-MM-YYYY`), ascending.
    pub async fn snapshot(&self) -> Snapshot {
        let dates = self.dates.read().await;
        dates.iter().map(NormalizedDate::to_string).collect()
    }

    pub async fn contains(&self, date: &NormalizedDate) -> bool {
        let dates = self.dates.read().await;
        dates.contains(date)
    }

    pub async fn len(&self) -> usize {
        let dates = self.dates.read().await;
        dates.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Block a date. Returns the updated snapshot.
    ///
    /// The in-memory check is only a fast path: two concurrent calls for the
    /// same new date can both pass it, and then the store's primary key
    /// decides the winner. The loser's constraint violation surfaces as
    /// [`Error::AlreadyBlocked`], not a generic persistence error.
    pub async fn block(&self, date: NormalizedDate) -> Result<Snapshot> {
        if self.contains(&date).await {
            return Err(Error::AlreadyBlocked);
        }

        {
            let store = self.store.lock().unwrap();
            store.insert(&date)?;
        }

        let mut dates = self.dates.write().await;
        dates.insert(date);
        debug!("blocked date {date}, registry now holds {}", dates.len());
        Ok(dates.iter().map(NormalizedDate::to_string).collect())
    }

    /// Unblock a date. Returns the updated snapshot.
    pub async fn unblock(&self, date: NormalizedDate) -> Result<Snapshot> {
        if !self.contains(&date).await {
            return Err(Error::NotBlocked);
        }

        {
            let store = self.store.lock().unwrap();
            store.delete(&date)?;
        }

        let mut dates = self.dates.write().await;
        dates.remove(&date);
        debug!("unblocked date {date}, registry now holds {}", dates.len());
        Ok(dates.iter().map(NormalizedDate::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NormalizedDate {
        NormalizedDate::parse(raw).unwrap()
    }

    fn registry() -> DateRegistry {
        DateRegistry::new(BlockedDateStore::in_memory().unwrap())
    }

    #[tokio::test]
    async fn block_then_list_contains_the_date_once() {
        let registry = registry();
        registry.block(date("15-03-2025")).await.unwrap();

        let listed = registry.list().await;
        assert_eq!(listed, vec![date("15-03-2025")]);
    }

    #[tokio::test]
    async fn double_block_fails_and_leaves_size_unchanged() {
        let registry = registry();
        registry.block(date("15-03-2025")).await.unwrap();

        let err = registry.block(date("15-03-2025")).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyBlocked));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unblock_absent_date_fails() {
        let registry = registry();
        let err = registry.unblock(date("15-03-2025")).await.unwrap_err();
        assert!(matches!(err, Error::NotBlocked));
    }

    #[tokio::test]
    async fn unblock_after_block_empties_the_registry() {
        let registry = registry();
        registry.block(date("15-03-2025")).await.unwrap();
        let snapshot = registry.unblock(date("15-03-2025")).await.unwrap();

        assert!(snapshot.is_empty());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn snapshot_is_chronological() {
        let registry = registry();
        registry.block(date("05-01-2025")).await.unwrap();
        registry.block(date("20-12-2024")).await.unwrap();
        registry.block(date("15-03-2025")).await.unwrap();

        assert_eq!(
            registry.snapshot().await,
            vec!["20-12-2024", "05-01-2025", "15-03-2025"]
        );
    }

    #[tokio::test]
    async fn reload_replaces_the_in_memory_set() {
        let registry = registry();
        registry.block(date("15-03-2025")).await.unwrap();

        // Reload must reflect the store exactly, not merge with stale state.
        {
            let store = registry.store.lock().unwrap();
            store.insert(&date("01-01-2025")).unwrap();
            store.delete(&date("15-03-2025")).unwrap();
        }
        registry.reload().await.unwrap();

        assert_eq!(registry.list().await, vec![date("01-01-2025")]);
    }

    #[tokio::test]
    async fn reload_matches_a_fresh_scan() {
        let registry = registry();
        registry.block(date("15-03-2025")).await.unwrap();
        registry.block(date("01-01-2025")).await.unwrap();
        registry.reload().await.unwrap();

        let scanned = {
            let store = registry.store.lock().unwrap();
            store.select_all().unwrap()
        };
        assert_eq!(registry.list().await, scanned);
    }

    #[tokio::test]
    async fn concurrent_blocks_of_the_same_date_admit_exactly_one() {
        let registry = registry();
        let d = date("15-03-2025");

        let (a, b) = tokio::join!(registry.block(d), registry.block(d));

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(loser.unwrap_err(), Error::AlreadyBlocked));
        assert_eq!(registry.list().await, vec![d]);
    }
}
