//! TfL BikePoint HTTP client.
//!
//! Every call goes to the network: there is no response cache and no
//! retry. A failed request surfaces as an error with no partial data.

use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{BoundingBox, StationDetail, StationId, StationSummary};

use super::StationSource;
use super::convert::{convert_detail, convert_summary};
use super::error::TflError;
use super::types::BikePointDto;

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Optional application key, sent as the `app_key` query parameter
    pub app_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config pointing at production TfL with no app key.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the TfL BikePoint endpoints.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("dock-server/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_key: config.app_key,
        })
    }

    /// Fetch station metadata for every dock inside `bbox`.
    ///
    /// Stations the API returns outside the box are dropped, so the result
    /// only ever contains docks within it (boundary inclusive).
    pub async fn stations_in_region(
        &self,
        bbox: BoundingBox,
    ) -> Result<Vec<StationSummary>, TflError> {
        let url = format!("{}/BikePoint", self.base_url);
        let query = [
            ("swLat", bbox.south.to_string()),
            ("swLon", bbox.west.to_string()),
            ("neLat", bbox.north.to_string()),
            ("neLon", bbox.east.to_string()),
        ];

        let records: Vec<BikePointDto> = self.get_json(&url, &query).await?.ok_or(
            TflError::Api {
                status: 200,
                message: "empty body for region query".to_string(),
            },
        )?;

        let stations = records
            .iter()
            .map(convert_summary)
            .collect::<Result<Vec<_>, _>>()?;

        let total = stations.len();
        let inside: Vec<StationSummary> = stations
            .into_iter()
            .filter(|s| bbox.contains(&s.location))
            .collect();

        debug!(
            returned = total,
            inside = inside.len(),
            "fetched stations in region"
        );

        Ok(inside)
    }

    /// Fetch one station's full record, including occupancy.
    pub async fn station_detail(&self, id: &StationId) -> Result<StationDetail, TflError> {
        let url = format!("{}/BikePoint/{}", self.base_url, id.as_str());

        let record: BikePointDto = self
            .get_json(&url, &[])
            .await
            .map_err(|e| match e {
                TflError::Api { status: 404, .. } => TflError::NotFound(id.clone()),
                other => other,
            })?
            .ok_or_else(|| TflError::NotFound(id.clone()))?;

        Ok(convert_detail(&record)?)
    }

    /// GET `url` and decode the body. A `null` or empty body yields `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, TflError> {
        let mut request = self.http.get(url).query(query);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| TflError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })
    }
}

impl StationSource for TflClient {
    fn stations_in_region(
        &self,
        bbox: BoundingBox,
    ) -> BoxFuture<'_, Result<Vec<StationSummary>, TflError>> {
        Box::pin(TflClient::stations_in_region(self, bbox))
    }

    fn station_detail<'a>(
        &'a self,
        id: &'a StationId,
    ) -> BoxFuture<'a, Result<StationDetail, TflError>> {
        Box::pin(TflClient::station_detail(self, id))
    }
}
