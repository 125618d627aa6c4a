//! Mock station source for running without network access.
//!
//! Loads BikePoint records from a JSON fixture file and serves them as if
//! they were live API responses.

use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::{BoundingBox, StationDetail, StationId, StationSummary};

use super::StationSource;
use super::convert::{convert_detail, convert_summary};
use super::error::TflError;
use super::types::BikePointDto;

/// Station source backed by fixture records.
#[derive(Debug, Clone)]
pub struct MockTflClient {
    records: Arc<Vec<BikePointDto>>,
}

impl MockTflClient {
    /// Load records from a JSON file holding an array of BikePoint places.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TflError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| TflError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        let records: Vec<BikePointDto> =
            serde_json::from_str(&json).map_err(|e| TflError::Fixture {
                message: format!("failed to parse {:?}: {}", path, e),
            })?;

        if records.is_empty() {
            return Err(TflError::Fixture {
                message: format!("no stations in {:?}", path),
            });
        }

        Ok(Self::from_records(records))
    }

    /// Build a mock directly from records.
    pub fn from_records(records: Vec<BikePointDto>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Number of fixture stations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StationSource for MockTflClient {
    fn stations_in_region(
        &self,
        bbox: BoundingBox,
    ) -> BoxFuture<'_, Result<Vec<StationSummary>, TflError>> {
        Box::pin(async move {
            let mut inside = Vec::new();
            for record in self.records.iter() {
                let summary = convert_summary(record)?;
                if bbox.contains(&summary.location) {
                    inside.push(summary);
                }
            }
            Ok(inside)
        })
    }

    fn station_detail<'a>(
        &'a self,
        id: &'a StationId,
    ) -> BoxFuture<'a, Result<StationDetail, TflError>> {
        Box::pin(async move {
            let record = self
                .records
                .iter()
                .find(|r| r.id == id.as_str())
                .ok_or_else(|| TflError::NotFound(id.clone()))?;
            Ok(convert_detail(record)?)
        })
    }
}
