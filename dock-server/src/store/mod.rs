//! Local persistence.
//!
//! The favourites list is the only durable state. It lives in one named
//! slot of a JSON key-value file and is mirrored in memory by the shared
//! [`Favorites`] container.

mod error;
mod favorites_store;
mod kv;
mod shared;

pub use error::StoreError;
pub use favorites_store::{FAVORITES_SLOT, FavoritesStore};
pub use kv::KvFile;
pub use shared::Favorites;
