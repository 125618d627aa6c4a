//! Favourites list screen.
//!
//! One row per favourite entry. Each row has its own key, hydrates its own
//! occupancy independently, and only accepts the result of its most recent
//! fetch. The same identifier stored twice gives two independent rows.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{FavoriteSet, StationDetail, StationId};
use crate::sequence::{Sequencer, Ticket};
use crate::store::Favorites;
use crate::tfl::StationSource;

/// Lifecycle of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowState {
    /// Waiting for this row's fetch.
    Loading,
    /// Fetched. Occupancy may still be unknown.
    Ready(StationDetail),
    /// The fetch failed; nothing to show.
    Unavailable,
}

/// A row as the screen renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Identifies this row until the list is mounted or refreshed again
    pub key: u64,
    pub id: StationId,
    pub state: RowState,
}

#[derive(Debug)]
struct RowSlot {
    row: Row,
    ticket: Option<Ticket>,
}

/// Confirmation shown before clearing every favourite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

#[derive(Debug, Default)]
struct ListState {
    rows: Vec<RowSlot>,
    seq: Sequencer,
    next_key: u64,
    generation: u64,
}

impl ListState {
    fn loading(&mut self, id: StationId) -> RowSlot {
        self.next_key += 1;
        RowSlot {
            row: Row {
                key: self.next_key,
                id,
                state: RowState::Loading,
            },
            ticket: None,
        }
    }

    /// Rebuild rows in the order of `favorites`, keeping rows whose
    /// identifier survives. Each entry claims at most one old row.
    fn sync(&mut self, favorites: &FavoriteSet) {
        let mut old = std::mem::take(&mut self.rows);

        self.rows = favorites
            .iter()
            .map(|id| match old.iter().position(|slot| &slot.row.id == id) {
                Some(pos) => old.remove(pos),
                None => self.loading(id.clone()),
            })
            .collect();
    }

    /// Replace every row with a fresh `Loading` row. Fetches still in
    /// flight for the old rows find nothing to update.
    fn reset(&mut self, favorites: &FavoriteSet) {
        self.rows = favorites
            .iter()
            .cloned()
            .map(|id| self.loading(id))
            .collect();
    }

    fn snapshot(&self) -> Vec<Row> {
        self.rows.iter().map(|slot| slot.row.clone()).collect()
    }
}

/// View model for the favourites list screen.
pub struct FavoritesList {
    source: Arc<dyn StationSource>,
    favorites: Favorites,
    state: Mutex<ListState>,
}

impl FavoritesList {
    pub fn new(source: Arc<dyn StationSource>, favorites: Favorites) -> Self {
        Self {
            source,
            favorites,
            state: Mutex::new(ListState::default()),
        }
    }

    /// The screen was mounted: one `Loading` row per favourite, so every
    /// row fetches its occupancy again.
    pub async fn mount(&self) -> Vec<Row> {
        let favorites = self.favorites.snapshot().await;
        let mut state = self.state.lock().await;
        state.reset(&favorites);
        state.snapshot()
    }

    /// The screen regained focus: pick up favourites changed elsewhere,
    /// leaving rows that are still listed untouched.
    pub async fn focus(&self) -> Vec<Row> {
        let favorites = self.favorites.snapshot().await;
        let mut state = self.state.lock().await;
        state.sync(&favorites);
        state.snapshot()
    }

    /// Pull-to-refresh: re-read favourites from storage and put every row
    /// back into `Loading`. In-flight fetches are superseded.
    pub async fn refresh(&self) -> Vec<Row> {
        let favorites = self.favorites.reload().await;
        let mut state = self.state.lock().await;

        state.generation += 1;
        state.reset(&favorites);
        debug!(
            generation = state.generation,
            rows = state.rows.len(),
            "refreshed favourites"
        );

        state.snapshot()
    }

    /// Number of refreshes so far.
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    /// Current rows.
    pub async fn rows(&self) -> Vec<Row> {
        self.state.lock().await.snapshot()
    }

    /// Fetch occupancy for the row with `key`.
    ///
    /// Returns the row as it stands after the fetch, or `None` if the row
    /// is not (or no longer) in the list. A result superseded by a newer
    /// fetch of the same row is discarded.
    pub async fn hydrate(&self, key: u64) -> Option<Row> {
        let (id, ticket) = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let slot = state.rows.iter_mut().find(|slot| slot.row.key == key)?;

            let ticket = state.seq.issue();
            slot.row.state = RowState::Loading;
            slot.ticket = Some(ticket);
            (slot.row.id.clone(), ticket)
        };

        debug!(station = %id, key, ticket = ticket.value(), "fetching station detail");
        let result = self.source.station_detail(&id).await;

        let mut state = self.state.lock().await;
        let Some(slot) = state.rows.iter_mut().find(|slot| slot.row.key == key) else {
            debug!(station = %id, key, "row removed while fetching");
            return None;
        };

        if slot.ticket != Some(ticket) {
            debug!(station = %id, ticket = ticket.value(), "discarding stale station detail");
            return Some(slot.row.clone());
        }

        slot.row.state = match result {
            Ok(detail) => RowState::Ready(detail),
            Err(e) => {
                warn!(station = %id, error = %e, "failed to fetch station detail");
                RowState::Unavailable
            }
        };

        Some(slot.row.clone())
    }

    /// Remove a favourite from the list and from storage.
    pub async fn remove(&self, id: &StationId) -> Vec<Row> {
        self.favorites.remove(id).await;
        let favorites = self.favorites.snapshot().await;
        let mut state = self.state.lock().await;
        state.sync(&favorites);
        state.snapshot()
    }

    /// The confirmation to show before [`FavoritesList::clear`].
    pub fn request_clear(&self) -> ConfirmPrompt {
        ConfirmPrompt {
            title: "Clear Docks",
            message: "Are you sure you want to clear all docks?",
            cancel_label: "Cancel",
            confirm_label: "OK",
        }
    }

    /// Remove every favourite, persisting the empty set.
    pub async fn clear(&self) {
        self.favorites.clear().await;
        self.state.lock().await.rows.clear();
    }
}
