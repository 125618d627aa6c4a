//! Process-wide favourites shared by both screens.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{FavoriteSet, StationId};

use super::error::StoreError;
use super::favorites_store::FavoritesStore;

/// Shared, write-through favourites container.
///
/// Every mutation updates the in-memory set and overwrites the stored copy
/// while holding the write lock, so in-process writes reach disk in order.
/// File access runs on the blocking pool. Storage failures are logged and
/// never surfaced: the in-memory value stays authoritative.
#[derive(Clone)]
pub struct Favorites {
    inner: Arc<RwLock<FavoriteSet>>,
    store: Arc<FavoritesStore>,
}

impl Favorites {
    /// Open the container, loading the stored set.
    ///
    /// A missing or unreadable store starts with an empty set.
    pub fn open(store: FavoritesStore) -> Self {
        let initial = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load favourites, starting empty");
            FavoriteSet::new()
        });

        Self {
            inner: Arc::new(RwLock::new(initial)),
            store: Arc::new(store),
        }
    }

    /// A copy of the current set.
    pub async fn snapshot(&self) -> FavoriteSet {
        self.inner.read().await.clone()
    }

    pub async fn contains(&self, id: &StationId) -> bool {
        self.inner.read().await.contains(id)
    }

    /// Re-read the set from storage.
    ///
    /// On a read error the previous in-memory value is kept and returned.
    pub async fn reload(&self) -> FavoriteSet {
        let mut guard = self.inner.write().await;

        let store = self.store.clone();
        match blocking(move || store.load()).await {
            Ok(loaded) => *guard = loaded,
            Err(e) => warn!(error = %e, "failed to reload favourites, keeping in-memory set"),
        }

        guard.clone()
    }

    /// Toggle membership of `id` and persist. Returns whether `id` is a
    /// favourite afterwards.
    pub async fn toggle(&self, id: &StationId) -> bool {
        let mut guard = self.inner.write().await;
        let now_favorite = guard.toggle(id);
        debug!(station = %id, favorite = now_favorite, "toggled favourite");
        self.persist(guard.clone()).await;
        now_favorite
    }

    /// Remove `id` and persist. Returns whether anything was removed.
    pub async fn remove(&self, id: &StationId) -> bool {
        let mut guard = self.inner.write().await;
        let removed = guard.remove(id);
        if removed {
            self.persist(guard.clone()).await;
        }
        removed
    }

    /// Empty the set and persist.
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.clear();
        self.persist(guard.clone()).await;
    }

    /// Callers hold the write guard across this call.
    async fn persist(&self, favorites: FavoriteSet) {
        let store = self.store.clone();
        if let Err(e) = blocking(move || store.save(&favorites)).await {
            warn!(error = %e, path = ?self.store.path(), "failed to persist favourites");
        }
    }
}

/// Run a store operation on the blocking pool.
async fn blocking<T, F>(op: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn favs(ids: &[&str]) -> FavoriteSet {
        ids.iter().map(|s| id(s)).collect()
    }

    #[tokio::test]
    async fn toggle_persists_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));

        assert!(favorites.toggle(&id("BikePoints_1")).await);
        assert!(favorites.toggle(&id("BikePoints_2")).await);

        let stored = FavoritesStore::new(&path).load().unwrap();
        assert_eq!(stored, favs(&["BikePoints_1", "BikePoints_2"]));

        assert!(!favorites.toggle(&id("BikePoints_1")).await);
        let stored = FavoritesStore::new(&path).load().unwrap();
        assert_eq!(stored, favs(&["BikePoints_2"]));
    }

    #[tokio::test]
    async fn survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");

        {
            let favorites = Favorites::open(FavoritesStore::new(&path));
            favorites.toggle(&id("BikePoints_1")).await;
            favorites.toggle(&id("BikePoints_2")).await;
        }

        let reopened = Favorites::open(FavoritesStore::new(&path));
        assert_eq!(
            reopened.snapshot().await,
            favs(&["BikePoints_1", "BikePoints_2"])
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let dir = tempdir().unwrap();
        let a = Favorites::open(FavoritesStore::new(dir.path().join("f.json")));
        let b = a.clone();

        a.toggle(&id("BikePoints_7")).await;
        assert!(b.contains(&id("BikePoints_7")).await);
    }

    #[tokio::test]
    async fn clear_persists_empty_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));
        for n in 1..=4 {
            favorites.toggle(&id(&format!("BikePoints_{n}"))).await;
        }

        favorites.clear().await;

        assert!(favorites.snapshot().await.is_empty());
        assert!(FavoritesStore::new(&path).load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reload_picks_up_external_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));

        FavoritesStore::new(&path)
            .save(&favs(&["BikePoints_3"]))
            .unwrap();

        assert_eq!(favorites.reload().await, favs(&["BikePoints_3"]));
    }

    #[tokio::test]
    async fn reload_failure_keeps_in_memory_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));
        favorites.toggle(&id("BikePoints_1")).await;

        std::fs::write(&path, "{ definitely not json").unwrap();

        assert_eq!(favorites.reload().await, favs(&["BikePoints_1"]));
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_value() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let favorites = Favorites::open(FavoritesStore::new(blocker.join("dock_tracker.json")));

        assert!(favorites.toggle(&id("BikePoints_1")).await);
        assert_eq!(favorites.snapshot().await, favs(&["BikePoints_1"]));
    }

    #[tokio::test]
    async fn unreadable_store_opens_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        std::fs::write(&path, "garbage").unwrap();

        let favorites = Favorites::open(FavoritesStore::new(&path));
        assert!(favorites.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn removing_absent_id_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));

        assert!(!favorites.remove(&id("BikePoints_1")).await);
        assert!(!path.exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_toggles_reach_disk_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dock_tracker.json");
        let favorites = Favorites::open(FavoritesStore::new(&path));

        let tasks: Vec<_> = (1..=8)
            .map(|n| {
                let favorites = favorites.clone();
                tokio::spawn(async move { favorites.toggle(&id(&format!("BikePoints_{n}"))).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap());
        }

        let stored = FavoritesStore::new(&path).load().unwrap();
        assert_eq!(stored.len(), 8);
        assert_eq!(stored, favorites.snapshot().await);
    }
}
