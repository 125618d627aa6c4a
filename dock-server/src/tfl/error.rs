//! TfL client error types.

use crate::domain::StationId;

use super::convert::ConversionError;

/// Errors that can occur when querying the station API.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No station with this identifier
    #[error("station not found: {0}")]
    NotFound(StationId),

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// A record parsed but did not satisfy the domain invariants
    #[error("invalid station record: {0}")]
    Conversion(#[from] ConversionError),

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
