use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dock_server::config::AppConfig;
use dock_server::store::{Favorites, FavoritesStore};
use dock_server::tfl::{MockTflClient, StationSource, TflClient};
use dock_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dock_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let source: Arc<dyn StationSource> = match &config.mock_data {
        Some(path) => {
            let mock = MockTflClient::from_file(path)?;
            info!(path = %path.display(), stations = mock.len(), "serving fixture stations");
            Arc::new(mock)
        }
        None => {
            if config.tfl.app_key.is_none() {
                warn!("TFL_APP_KEY not set; requests are subject to anonymous rate limits");
            }
            info!(base_url = %config.tfl.base_url, "using TfL API");
            Arc::new(TflClient::new(config.tfl.clone())?)
        }
    };

    let favorites = Favorites::open(FavoritesStore::new(config.favorites_path.clone()));
    info!(
        path = %config.favorites_path.display(),
        docks = favorites.snapshot().await.len(),
        "loaded favourites"
    );

    let state = AppState::new(source, favorites);
    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Dock tracker listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
