//! Map-based station picker.
//!
//! Tracks the visible region, the stations fetched for it, and the
//! location-permission prompt. Each viewport-settle event triggers a region
//! fetch; only the response to the most recent one is applied.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{BoundingBox, Location, Region, StationId, StationSummary};
use crate::sequence::{Sequencer, Ticket};
use crate::store::Favorites;
use crate::tfl::{StationSource, TflError};

/// Marker colour on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Red,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
        }
    }
}

/// A station marker with its favourite status.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: StationId,
    pub name: String,
    pub location: Location,
    pub favorite: bool,
}

impl Marker {
    pub fn color(&self) -> MarkerColor {
        if self.favorite {
            MarkerColor::Green
        } else {
            MarkerColor::Red
        }
    }

    pub fn callout_text(&self) -> &'static str {
        if self.favorite {
            "Tap to remove from your docks"
        } else {
            "Tap to add to your docks"
        }
    }
}

/// Device location permission as last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationPermission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

/// Action offered by the permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Cancel,
    OpenSettings,
}

impl PromptAction {
    pub fn label(&self) -> &'static str {
        match self {
            PromptAction::Cancel => "Cancel",
            PromptAction::OpenSettings => "Open Settings",
        }
    }
}

/// Dismissible prompt shown after the user denies location access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub actions: [PromptAction; 2],
}

impl PermissionPrompt {
    fn denied() -> Self {
        Self {
            title: "Permission not granted",
            message: "You need to allow location services for this app to work fully.",
            actions: [PromptAction::Cancel, PromptAction::OpenSettings],
        }
    }
}

/// An issued region fetch, to be completed with
/// [`StationPicker::complete_region`].
#[derive(Debug, Clone, Copy)]
pub struct RegionRequest {
    pub ticket: Ticket,
    pub bbox: BoundingBox,
}

/// What happened to a region fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    /// The displayed station set was replaced.
    Applied { ticket: Ticket, stations: usize },
    /// A newer fetch was issued; this result was discarded.
    Stale { ticket: Ticket },
    /// The latest fetch failed; the previous stations remain.
    Failed { ticket: Ticket },
}

/// What the page should do when the picker mounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountPlan {
    pub region: Region,
    pub request_permission: bool,
}

#[derive(Debug, Default)]
struct PickerState {
    region: Region,
    stations: Vec<StationSummary>,
    seq: Sequencer,
    pending: Option<Ticket>,
    permission: LocationPermission,
    prompt: Option<PermissionPrompt>,
}

/// View model for the map picker screen.
pub struct StationPicker {
    source: Arc<dyn StationSource>,
    favorites: Favorites,
    state: Mutex<PickerState>,
}

impl StationPicker {
    /// A picker centred on the default region.
    pub fn new(source: Arc<dyn StationSource>, favorites: Favorites) -> Self {
        Self {
            source,
            favorites,
            state: Mutex::new(PickerState::default()),
        }
    }

    /// Screen mount: where to start and whether to ask for location.
    ///
    /// Permission is requested on each mount until it has been granted.
    pub async fn mount(&self) -> MountPlan {
        let state = self.state.lock().await;
        MountPlan {
            region: state.region,
            request_permission: state.permission != LocationPermission::Granted,
        }
    }

    /// The viewport settled on `region`: fetch its stations and apply them
    /// unless a newer fetch has been issued meanwhile.
    pub async fn region_settled(&self, region: Region) -> RegionOutcome {
        let request = self.begin_region(region).await;
        let result = self.source.stations_in_region(request.bbox).await;
        self.complete_region(request, result).await
    }

    /// Record `region` as current and issue a ticket for its fetch.
    pub async fn begin_region(&self, region: Region) -> RegionRequest {
        let mut state = self.state.lock().await;
        state.region = region;
        let ticket = state.seq.issue();
        state.pending = Some(ticket);

        let bbox = region.bounding_box();
        debug!(ticket = ticket.value(), ?bbox, "fetching stations for region");
        RegionRequest { ticket, bbox }
    }

    /// Apply the result of a region fetch if it is still the latest.
    pub async fn complete_region(
        &self,
        request: RegionRequest,
        result: Result<Vec<StationSummary>, TflError>,
    ) -> RegionOutcome {
        let mut state = self.state.lock().await;
        let ticket = request.ticket;

        if !state.seq.is_current(ticket) {
            debug!(ticket = ticket.value(), "discarding stale region response");
            return RegionOutcome::Stale { ticket };
        }

        state.pending = None;

        match result {
            Ok(stations) => {
                let count = stations.len();
                state.stations = stations;
                RegionOutcome::Applied {
                    ticket,
                    stations: count,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch stations for region");
                RegionOutcome::Failed { ticket }
            }
        }
    }

    /// The displayed stations, marked by favourite status.
    pub async fn markers(&self) -> Vec<Marker> {
        let favorites = self.favorites.snapshot().await;
        let state = self.state.lock().await;

        state
            .stations
            .iter()
            .map(|s| Marker {
                id: s.id.clone(),
                name: s.name.clone(),
                location: s.location,
                favorite: favorites.contains(&s.id),
            })
            .collect()
    }

    /// Toggle a station's favourite status and persist it.
    ///
    /// Returns whether the station is a favourite afterwards.
    pub async fn toggle(&self, id: &StationId) -> bool {
        self.favorites.toggle(id).await
    }

    /// Whether the latest region fetch is still outstanding.
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.pending.is_some()
    }

    #[cfg(test)]
    pub async fn region(&self) -> Region {
        self.state.lock().await.region
    }

    /// Record the outcome of the location-permission request.
    ///
    /// Denial yields a prompt pointing to system settings. It never affects
    /// station fetching.
    pub async fn permission_result(&self, granted: bool) -> Option<PermissionPrompt> {
        let mut state = self.state.lock().await;

        if granted {
            state.permission = LocationPermission::Granted;
            state.prompt = None;
        } else {
            state.permission = LocationPermission::Denied;
            state.prompt = Some(PermissionPrompt::denied());
        }

        state.prompt.clone()
    }

    #[cfg(test)]
    pub async fn permission(&self) -> LocationPermission {
        self.state.lock().await.permission
    }

    #[cfg(test)]
    pub async fn prompt(&self) -> Option<PermissionPrompt> {
        self.state.lock().await.prompt.clone()
    }

    pub async fn dismiss_prompt(&self) {
        self.state.lock().await.prompt = None;
    }
}
