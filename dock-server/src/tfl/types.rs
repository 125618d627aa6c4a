//! Wire types for the TfL BikePoint endpoints.
//!
//! Only the fields the dock tracker reads are modelled; everything else in
//! the `Place` payload is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A BikePoint `Place` record.
///
/// Region queries and detail lookups return the same shape; region
/// results may omit `additionalProperties`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BikePointDto {
    pub id: String,
    pub common_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub additional_properties: Vec<AdditionalPropertyDto>,
}

/// One entry of the unordered `additionalProperties` list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPropertyDto {
    #[serde(default)]
    pub category: Option<String>,
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}
