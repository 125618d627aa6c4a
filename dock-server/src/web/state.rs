//! Application state for the web layer.

use std::sync::Arc;

use crate::favorites_list::FavoritesList;
use crate::picker::StationPicker;
use crate::store::Favorites;
use crate::tfl::StationSource;

/// Shared application state.
///
/// Both screens share one [`Favorites`] container; there is no other
/// channel between them.
#[derive(Clone)]
pub struct AppState {
    /// Shared favourites, backed by the store
    pub favorites: Favorites,

    /// Map picker view model
    pub picker: Arc<StationPicker>,

    /// Favourites list view model
    pub list: Arc<FavoritesList>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(source: Arc<dyn StationSource>, favorites: Favorites) -> Self {
        Self {
            picker: Arc::new(StationPicker::new(source.clone(), favorites.clone())),
            list: Arc::new(FavoritesList::new(source, favorites.clone())),
            favorites,
        }
    }
}
