//! Map viewports and the bounding boxes derived from them.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::station::Location;

/// A map viewport: a centre point plus latitude/longitude spans.
///
/// Always finite with non-negative spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    latitude: f64,
    longitude: f64,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl Region {
    pub fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, DomainError> {
        for (name, value) in [
            ("latitude", latitude),
            ("longitude", longitude),
            ("latitude_delta", latitude_delta),
            ("longitude_delta", longitude_delta),
        ] {
            if !value.is_finite() {
                return Err(DomainError::NonFinite(name));
            }
        }

        if latitude_delta < 0.0 {
            return Err(DomainError::NegativeSpan("latitude_delta"));
        }
        if longitude_delta < 0.0 {
            return Err(DomainError::NegativeSpan("longitude_delta"));
        }

        Ok(Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Central London, the initial viewport of the picker.
    pub fn london() -> Self {
        Self {
            latitude: 51.5074,
            longitude: -0.1278,
            latitude_delta: 0.03,
            longitude_delta: 0.03,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_delta(&self) -> f64 {
        self.latitude_delta
    }

    pub fn longitude_delta(&self) -> f64 {
        self.longitude_delta
    }

    /// The query box `[lat ± latSpan/2] x [lon ± lonSpan/2]`.
    pub fn bounding_box(&self) -> BoundingBox {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;

        BoundingBox {
            south: self.latitude - half_lat,
            west: self.longitude - half_lon,
            north: self.latitude + half_lat,
            east: self.longitude + half_lon,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::london()
    }
}

/// An axis-aligned latitude/longitude box. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Whether `location` lies inside the box, boundary included.
    pub fn contains(&self, location: &Location) -> bool {
        location.lat >= self.south
            && location.lat <= self.north
            && location.lon >= self.west
            && location.lon <= self.east
    }
}
