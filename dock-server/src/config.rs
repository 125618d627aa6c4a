//! Startup configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::tfl::TflConfig;

/// Default listen address: loopback only, since the app is single-user.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default favourites file.
const DEFAULT_FAVORITES_PATH: &str = "dock_tracker.json";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors in startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub addr: SocketAddr,
    /// TfL API client settings
    pub tfl: TflConfig,
    /// File holding the favourites
    pub favorites_path: PathBuf,
    /// Serve stations from this fixture file instead of TfL
    pub mock_data: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_raw = get("DOCK_TRACKER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw.parse().map_err(|e| ConfigError::Invalid {
            var: "DOCK_TRACKER_ADDR",
            message: format!("{addr_raw:?}: {e}"),
        })?;

        let mut tfl = TflConfig::new();
        if let Some(url) = get("TFL_BASE_URL") {
            tfl = tfl.with_base_url(url);
        }
        if let Some(key) = get("TFL_APP_KEY") {
            tfl = tfl.with_app_key(key);
        }
        if let Some(raw) = get("TFL_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|e| ConfigError::Invalid {
                var: "TFL_TIMEOUT_SECS",
                message: format!("{raw:?}: {e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "TFL_TIMEOUT_SECS",
                    message: "must be at least 1".to_string(),
                });
            }
            tfl = tfl.with_timeout(secs);
        }

        Ok(Self {
            addr,
            tfl,
            favorites_path: get("DOCK_TRACKER_FAVORITES")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FAVORITES_PATH)),
            mock_data: get("DOCK_TRACKER_MOCK_DATA").map(PathBuf::from),
            static_dir: get("DOCK_TRACKER_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}
