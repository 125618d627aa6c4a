//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{DomainError, InvalidStationId, Region, StationId};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(favorites_page))
        .route("/picker", get(picker_page))
        .route("/health", get(health))
        .route("/favorites/rows/:key", get(favorite_row))
        .route("/api/favorites", get(list_favorites).delete(clear_favorites))
        .route("/api/favorites/:id", delete(remove_favorite))
        .route("/api/favorites/:id/toggle", post(toggle_favorite))
        .route("/api/refresh", post(refresh_favorites))
        .route("/api/clear-prompt", get(clear_prompt))
        .route("/api/stations", get(stations_in_region))
        .route("/api/location-permission", post(location_permission))
        .route("/api/location-permission/prompt", delete(dismiss_prompt))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("template error: {e}"),
    })
}

/// Favourites list page. Every row renders as a spinner and hydrates
/// itself through [`favorite_row`].
async fn favorites_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rows = state.list.mount().await;
    render(&FavoritesTemplate {
        rows: rows.iter().map(RowView::from_row).collect(),
        generation: state.list.generation().await,
    })
}

/// Map picker page.
async fn picker_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let plan = state.picker.mount().await;
    render(&PickerTemplate::from_plan(&plan))
}

async fn not_found_page() -> impl IntoResponse {
    let page = ErrorTemplate {
        title: "Not found".to_string(),
        message: "There is nothing at this address.".to_string(),
    };
    (StatusCode::NOT_FOUND, render(&page))
}

/// Fetch occupancy for one row and return it as an HTML fragment.
async fn favorite_row(
    State(state): State<AppState>,
    Path(key): Path<u64>,
) -> Result<Html<String>, AppError> {
    let row = state.list.hydrate(key).await.ok_or_else(|| AppError::NotFound {
        message: format!("row {key} is not in your docks"),
    })?;

    render(&RowTemplate {
        row: RowView::from_row(&row),
    })
}

/// Current favourites, synced with changes made on the map.
async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let rows = state.list.focus().await;
    Json(FavoritesResponse::new(state.list.generation().await, &rows))
}

/// Re-read favourites from storage and reset every row.
async fn refresh_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let rows = state.list.refresh().await;
    Json(FavoritesResponse::new(state.list.generation().await, &rows))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let id = StationId::parse(&id)?;
    let rows = state.list.remove(&id).await;
    Ok(Json(FavoritesResponse::new(
        state.list.generation().await,
        &rows,
    )))
}

/// Confirmation to show before clearing.
async fn clear_prompt(State(state): State<AppState>) -> Json<PromptResult> {
    Json(PromptResult::from_confirm(&state.list.request_clear()))
}

async fn clear_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    state.list.clear().await;
    Json(FavoritesResponse::new(state.list.generation().await, &[]))
}

/// Stations for the settled viewport.
async fn stations_in_region(
    State(state): State<AppState>,
    Query(req): Query<RegionQuery>,
) -> Result<Json<MarkersResponse>, AppError> {
    let region = Region::new(req.lat, req.lon, req.lat_delta, req.lon_delta)?;
    let outcome = state.picker.region_settled(region).await;
    let loading = state.picker.is_loading().await;
    let markers = state.picker.markers().await;
    Ok(Json(MarkersResponse::new(outcome, loading, &markers)))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let id = StationId::parse(&id)?;
    let favorite = state.picker.toggle(&id).await;
    Ok(Json(ToggleResponse {
        id: id.to_string(),
        favorite,
    }))
}

/// Outcome of the browser's geolocation request.
async fn location_permission(
    State(state): State<AppState>,
    Json(req): Json<PermissionRequest>,
) -> Json<PermissionResponse> {
    let prompt = state.picker.permission_result(req.granted).await;
    Json(PermissionResponse {
        prompt: prompt.as_ref().map(PromptResult::from_permission),
    })
}

async fn dismiss_prompt(State(state): State<AppState>) -> StatusCode {
    state.picker.dismiss_prompt().await;
    StatusCode::NO_CONTENT
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<InvalidStationId> for AppError {
    fn from(e: InvalidStationId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
