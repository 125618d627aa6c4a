//! Live dock occupancy.

use std::fmt;

use chrono::{DateTime, Utc};

/// Property key carrying the number of docked bikes.
pub const BIKES_KEY: &str = "NbBikes";

/// Property key carrying the number of free docks.
pub const EMPTY_DOCKS_KEY: &str = "NbEmptyDocks";

/// Bikes available and free docks at one station.
///
/// Only constructed when both counts are known, so a value of this type can
/// always be rendered as a capacity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub bikes: u32,
    pub empty_docks: u32,

    /// When the feed last updated the bike count, if reported.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Occupancy {
    pub fn new(bikes: u32, empty_docks: u32) -> Self {
        Self {
            bikes,
            empty_docks,
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = at;
        self
    }

    /// Extract occupancy from an unordered list of key/value properties.
    ///
    /// Returns `None` unless both [`BIKES_KEY`] and [`EMPTY_DOCKS_KEY`] are
    /// present with non-negative integer values.
    pub fn from_properties<'a, I>(properties: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut bikes = None;
        let mut empty_docks = None;

        for (key, value) in properties {
            match key {
                BIKES_KEY => bikes = parse_count(value),
                EMPTY_DOCKS_KEY => empty_docks = parse_count(value),
                _ => {}
            }
        }

        Some(Self::new(bikes?, empty_docks?))
    }

    /// Total docks: bikes plus empty docks.
    pub fn capacity(&self) -> u32 {
        self.bikes.saturating_add(self.empty_docks)
    }

    /// Display string such as `"5/8"`.
    pub fn capacity_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bikes, self.capacity())
    }
}

fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}
