//! Durable storage for the favourite station list.

use std::path::{Path, PathBuf};

use crate::domain::FavoriteSet;

use super::error::StoreError;
use super::kv::KvFile;

/// Slot holding the serialized favourites.
pub const FAVORITES_SLOT: &str = "docks";

/// Reads and writes the favourites slot of a [`KvFile`].
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    kv: KvFile,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            kv: KvFile::new(path),
        }
    }

    /// Load the stored favourites, or an empty set if none were saved.
    pub fn load(&self) -> Result<FavoriteSet, StoreError> {
        Ok(self.kv.get(FAVORITES_SLOT)?.unwrap_or_default())
    }

    /// Overwrite the stored favourites.
    pub fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
        self.kv.set(FAVORITES_SLOT, favorites)
    }

    pub fn path(&self) -> &Path {
        self.kv.path()
    }
}
