//! The user's ordered set of favourite stations.

use serde::{Deserialize, Serialize};

use super::station::StationId;

/// Ordered sequence of favourite station identifiers.
///
/// Toggling never introduces a duplicate. A sequence read back from storage
/// is kept exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<StationId>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.0.contains(id)
    }

    /// Remove `id` if present, otherwise append it.
    ///
    /// Returns whether `id` is a favourite afterwards.
    pub fn toggle(&mut self, id: &StationId) -> bool {
        if self.contains(id) {
            self.0.retain(|f| f != id);
            false
        } else {
            self.0.push(id.clone());
            true
        }
    }

    /// Remove every occurrence of `id`. Returns whether anything changed.
    pub fn remove(&mut self, id: &StationId) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f != id);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[StationId] {
        &self.0
    }
}

impl FromIterator<StationId> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = StationId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a StationId;
    type IntoIter = std::slice::Iter<'a, StationId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn set(ids: &[&str]) -> FavoriteSet {
        ids.iter().map(|s| id(s)).collect()
    }

    #[test]
    fn toggle_absent_appends() {
        let mut favs = set(&["BikePoints_1"]);
        assert!(favs.toggle(&id("BikePoints_2")));
        assert_eq!(favs, set(&["BikePoints_1", "BikePoints_2"]));
    }

    #[test]
    fn toggle_present_removes() {
        let mut favs = set(&["BikePoints_1", "BikePoints_2", "BikePoints_3"]);
        assert!(!favs.toggle(&id("BikePoints_2")));
        assert_eq!(favs, set(&["BikePoints_1", "BikePoints_3"]));
    }

    #[test]
    fn remove_reports_change() {
        let mut favs = set(&["BikePoints_1"]);
        assert!(favs.remove(&id("BikePoints_1")));
        assert!(!favs.remove(&id("BikePoints_1")));
        assert!(favs.is_empty());
    }

    #[test]
    fn remove_drops_stored_duplicates() {
        let mut favs = set(&["BikePoints_1", "BikePoints_2", "BikePoints_1"]);
        assert!(favs.remove(&id("BikePoints_1")));
        assert_eq!(favs, set(&["BikePoints_2"]));
    }

    #[test]
    fn clear_empties() {
        let mut favs = set(&["BikePoints_1", "BikePoints_2"]);
        favs.clear();
        assert!(favs.is_empty());
        assert_eq!(favs.len(), 0);
    }

    #[test]
    fn serializes_as_plain_array() {
        let favs = set(&["BikePoints_1", "BikePoints_2"]);
        let json = serde_json::to_string(&favs).unwrap();
        assert_eq!(json, r#"["BikePoints_1","BikePoints_2"]"#);
    }
}
