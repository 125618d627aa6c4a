//! TfL BikePoint station source.
//!
//! Provides station metadata by bounding box and live occupancy by
//! station identifier, from the TfL Unified API or from fixture data.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use futures::future::BoxFuture;

use crate::domain::{BoundingBox, StationDetail, StationId, StationSummary};

pub use client::{TflClient, TflConfig};
pub use convert::{ConversionError, convert_detail, convert_summary};
pub use error::TflError;
pub use mock::MockTflClient;
pub use types::{AdditionalPropertyDto, BikePointDto};

/// Anything that can answer station queries.
///
/// Implementations must not cache: each call reflects the source's current
/// state.
pub trait StationSource: Send + Sync {
    /// Station metadata for every dock inside `bbox` (boundary inclusive).
    fn stations_in_region(
        &self,
        bbox: BoundingBox,
    ) -> BoxFuture<'_, Result<Vec<StationSummary>, TflError>>;

    /// A single station's full record, including occupancy when known.
    fn station_detail<'a>(
        &'a self,
        id: &'a StationId,
    ) -> BoxFuture<'a, Result<StationDetail, TflError>>;
}
