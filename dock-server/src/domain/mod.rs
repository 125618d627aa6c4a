//! Domain types for the dock tracker.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod favorites;
mod occupancy;
mod region;
mod station;

pub use error::DomainError;
pub use favorites::FavoriteSet;
pub use occupancy::{BIKES_KEY, EMPTY_DOCKS_KEY, Occupancy};
pub use region::{BoundingBox, Region};
pub use station::{InvalidStationId, Location, StationDetail, StationId, StationSummary};
