//! Station identifiers and records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::occupancy::Occupancy;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An opaque, stable docking-station identifier such as `BikePoints_1`.
///
/// Identifiers are embedded in URL paths, so a `StationId` is guaranteed to
/// be non-empty and free of whitespace and `/`. Beyond that the value is
/// treated as opaque.
///
/// # Examples
///
/// ```
/// use dock_server::domain::StationId;
///
/// let id = StationId::parse("BikePoints_1").unwrap();
/// assert_eq!(id.as_str(), "BikePoints_1");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("Bike Points").is_err());
/// assert!(StationId::parse("../BikePoints_1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(InvalidStationId {
                reason: "must not contain whitespace or '/'",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Station metadata as returned by a region query.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub id: StationId,
    pub name: String,
    pub location: Location,
}

/// A single station's full record, including live occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDetail {
    pub summary: StationSummary,

    /// `None` when the feed did not carry both counts.
    pub occupancy: Option<Occupancy>,
}

impl StationDetail {
    pub fn id(&self) -> &StationId {
        &self.summary.id
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }
}
