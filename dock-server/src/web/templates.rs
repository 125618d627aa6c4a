//! Askama templates for the web frontend.

use askama::Template;

use crate::favorites_list::{Row, RowState};
use crate::picker::MountPlan;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Favourites list page.
#[derive(Template)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub rows: Vec<RowView>,
    pub generation: u64,
}

/// Map picker page.
#[derive(Template)]
#[template(path = "picker.html")]
pub struct PickerTemplate {
    pub lat: f64,
    pub lon: f64,
    pub lat_delta: f64,
    pub lon_delta: f64,
    pub request_permission: bool,
}

impl PickerTemplate {
    pub fn from_plan(plan: &MountPlan) -> Self {
        Self {
            lat: plan.region.latitude(),
            lon: plan.region.longitude(),
            lat_delta: plan.region.latitude_delta(),
            lon_delta: plan.region.longitude_delta(),
            request_permission: plan.request_permission,
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// A single favourites row.
#[derive(Template)]
#[template(path = "row.html")]
pub struct RowTemplate {
    pub row: RowView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Row view model for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub key: u64,
    pub id: String,
    pub loading: bool,
    pub name: Option<String>,
    /// Occupancy as `"bikes/capacity"`, only when both counts are known
    pub capacity: Option<String>,
    /// Time of the last occupancy update, `HH:MM` UTC
    pub updated: Option<String>,
}

impl RowView {
    pub fn from_row(row: &Row) -> Self {
        let mut view = Self {
            key: row.key,
            id: row.id.to_string(),
            loading: false,
            name: None,
            capacity: None,
            updated: None,
        };

        match &row.state {
            RowState::Loading => view.loading = true,
            RowState::Ready(detail) => {
                view.name = Some(detail.name().to_string());
                if let Some(occupancy) = &detail.occupancy {
                    view.capacity = Some(occupancy.capacity_text());
                    view.updated = occupancy
                        .updated_at
                        .map(|at| at.format("%H:%M").to_string());
                }
            }
            RowState::Unavailable => {}
        }

        view
    }

    /// Fetched but with nothing to show.
    pub fn is_blank(&self) -> bool {
        !self.loading && self.name.is_none()
    }

    /// Fetched, but bikes or empty docks were missing from the feed.
    pub fn occupancy_unknown(&self) -> bool {
        self.name.is_some() && self.capacity.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Occupancy, Region, StationId};
    use crate::testing::detail;
    use chrono::{TimeZone, Utc};

    fn row(state: RowState) -> Row {
        Row {
            key: 7,
            id: StationId::parse("BikePoints_1").unwrap(),
            state,
        }
    }

    #[test]
    fn ready_row_shows_capacity() {
        let view = RowView::from_row(&row(RowState::Ready(detail(
            "BikePoints_1",
            "River Street , Clerkenwell",
            Some((5, 3)),
        ))));

        assert!(!view.loading);
        assert_eq!(view.name.as_deref(), Some("River Street , Clerkenwell"));
        assert_eq!(view.capacity.as_deref(), Some("5/8"));

        let html = RowTemplate { row: view }.render().unwrap();
        assert!(html.contains("Capacity: 5/8"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn unknown_occupancy_shows_name_only() {
        let view = RowView::from_row(&row(RowState::Ready(detail(
            "BikePoints_103",
            "Panton Street, West End",
            None,
        ))));

        assert_eq!(view.capacity, None);
        assert!(view.occupancy_unknown());
        let html = RowTemplate { row: view }.render().unwrap();
        assert!(html.contains("Panton Street, West End"));
        assert!(html.contains("dock-capacity blank"));
        assert!(!html.contains("Capacity:"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn loading_and_unavailable_rows() {
        let loading = RowView::from_row(&row(RowState::Loading));
        assert!(loading.loading);
        assert!(!loading.is_blank());
        let html = RowTemplate { row: loading }.render().unwrap();
        assert!(html.contains("spinner"));

        let blank = RowView::from_row(&row(RowState::Unavailable));
        assert!(blank.is_blank());
        let html = RowTemplate { row: blank }.render().unwrap();
        assert!(!html.contains("spinner"));
        assert!(!html.contains("Capacity"));
    }

    #[test]
    fn updated_time_is_formatted() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 7, 0).unwrap();
        let mut d = detail("BikePoints_1", "River Street", None);
        d.occupancy = Some(Occupancy::new(1, 2).with_updated_at(Some(at)));

        let view = RowView::from_row(&row(RowState::Ready(d)));
        assert_eq!(view.updated.as_deref(), Some("08:07"));
    }

    #[test]
    fn favorites_page_lists_rows() {
        let page = FavoritesTemplate {
            rows: vec![RowView::from_row(&row(RowState::Loading))],
            generation: 2,
        };
        let html = page.render().unwrap();
        assert!(html.contains("data-id=\"BikePoints_1\""));
        assert!(html.contains("data-key=\"7\""));
        assert!(html.contains("data-generation=\"2\""));
        assert!(html.contains("class=\"empty\" hidden"));

        let empty = FavoritesTemplate {
            rows: Vec::new(),
            generation: 0,
        };
        let html = empty.render().unwrap();
        assert!(html.contains("No docks yet"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn picker_page_carries_region() {
        let plan = MountPlan {
            region: Region::london(),
            request_permission: true,
        };
        let html = PickerTemplate::from_plan(&plan).render().unwrap();
        assert!(html.contains("data-lat=\"51.5074\""));
        assert!(html.contains("data-request-permission=\"true\""));
    }
}
