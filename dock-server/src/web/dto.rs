//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::favorites_list::{ConfirmPrompt, Row};
use crate::picker::{Marker, PermissionPrompt, RegionOutcome};

/// Viewport reported by the map after a pan or zoom settles.
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    /// Centre latitude
    pub lat: f64,

    /// Centre longitude
    pub lon: f64,

    /// Latitude span of the viewport
    pub lat_delta: f64,

    /// Longitude span of the viewport
    pub lon_delta: f64,
}

/// A station marker.
#[derive(Debug, Serialize)]
pub struct MarkerResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub favorite: bool,

    /// Pin colour ("green" for favourites, "red" otherwise)
    pub color: &'static str,

    /// Text shown in the marker's callout
    pub callout: &'static str,
}

impl MarkerResult {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            id: marker.id.to_string(),
            name: marker.name.clone(),
            lat: marker.location.lat,
            lon: marker.location.lon,
            favorite: marker.favorite,
            color: marker.color().as_str(),
            callout: marker.callout_text(),
        }
    }
}

/// Response for a region fetch.
#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    /// Sequence number of the fetch this response answers
    pub ticket: u64,

    /// "applied", "stale" or "failed"
    pub outcome: &'static str,

    /// Whether a newer fetch is still outstanding
    pub loading: bool,

    /// Markers currently displayed (unchanged for stale and failed fetches)
    pub markers: Vec<MarkerResult>,
}

impl MarkersResponse {
    pub fn new(outcome: RegionOutcome, loading: bool, markers: &[Marker]) -> Self {
        let (ticket, outcome) = match outcome {
            RegionOutcome::Applied { ticket, .. } => (ticket, "applied"),
            RegionOutcome::Stale { ticket } => (ticket, "stale"),
            RegionOutcome::Failed { ticket } => (ticket, "failed"),
        };

        Self {
            ticket: ticket.value(),
            outcome,
            loading,
            markers: markers.iter().map(MarkerResult::from_marker).collect(),
        }
    }
}

/// Response for a favourite toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,

    /// Whether the station is a favourite after the toggle
    pub favorite: bool,
}

/// A list row's key and station.
#[derive(Debug, Serialize)]
pub struct RowRef {
    pub key: u64,
    pub id: String,
}

/// The list's rows after a change.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    /// Refresh generation; rows re-fetch when it changes
    pub generation: u64,

    pub rows: Vec<RowRef>,
}

impl FavoritesResponse {
    pub fn new(generation: u64, rows: &[Row]) -> Self {
        Self {
            generation,
            rows: rows
                .iter()
                .map(|r| RowRef {
                    key: r.key,
                    id: r.id.to_string(),
                })
                .collect(),
        }
    }
}

/// Result of the browser's geolocation request.
#[derive(Debug, Deserialize)]
pub struct PermissionRequest {
    pub granted: bool,
}

/// A prompt with labelled actions.
#[derive(Debug, Serialize)]
pub struct PromptResult {
    pub title: &'static str,
    pub message: &'static str,
    pub actions: Vec<&'static str>,
}

impl PromptResult {
    pub fn from_permission(prompt: &PermissionPrompt) -> Self {
        Self {
            title: prompt.title,
            message: prompt.message,
            actions: prompt.actions.iter().map(|a| a.label()).collect(),
        }
    }

    pub fn from_confirm(prompt: &ConfirmPrompt) -> Self {
        Self {
            title: prompt.title,
            message: prompt.message,
            actions: vec![prompt.cancel_label, prompt.confirm_label],
        }
    }
}

/// Response for a permission report.
#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    /// Present when the user should be pointed to settings
    pub prompt: Option<PromptResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, StationId};
    use crate::sequence::Sequencer;

    fn marker(favorite: bool) -> Marker {
        Marker {
            id: StationId::parse("BikePoints_101").unwrap(),
            name: "Craven Street, Strand".into(),
            location: Location::new(51.50786, -0.12627),
            favorite,
        }
    }

    #[test]
    fn marker_result_colours() {
        let fav = MarkerResult::from_marker(&marker(true));
        assert_eq!(fav.color, "green");
        assert_eq!(fav.callout, "Tap to remove from your docks");

        let other = MarkerResult::from_marker(&marker(false));
        assert_eq!(other.color, "red");
        assert_eq!(other.callout, "Tap to add to your docks");
    }

    #[test]
    fn markers_response_outcome_names() {
        let mut seq = Sequencer::new();
        let ticket = seq.issue();

        let resp = MarkersResponse::new(RegionOutcome::Stale { ticket }, true, &[marker(false)]);
        assert_eq!(resp.outcome, "stale");
        assert!(resp.loading);
        assert_eq!(resp.ticket, 1);
        assert_eq!(resp.markers.len(), 1);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["markers"][0]["id"], "BikePoints_101");
    }
}
