// Normalized per-station features shared by every selector

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Location, Station, StationId};

/// Dimensionless view of one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Travel cost scaled into [0, 1] by the batch maximum
    pub cost: f64,

    /// Straight-line lower bound on `cost`, same scale
    pub heuristic: f64,

    /// Rating/availability signal in [0, 1], higher is better
    pub quality: f64,

    /// Great-circle distance from the user in kilometres
    pub distance_km: f64,
}

/// Features of one request's candidate set, keyed by station id.
///
/// Iteration is always in ascending id order, which is what every selector
/// relies on for its tie-break.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    user: Location,
    features: BTreeMap<StationId, FeatureVector>,
}

impl FeatureSet {
    pub(crate) fn new(user: Location, features: BTreeMap<StationId, FeatureVector>) -> Self {
        Self { user, features }
    }

    /// Builds a feature set from precomputed vectors, bypassing normalization
    pub fn from_vectors<I, S>(user: Location, vectors: I) -> Self
    where
        I: IntoIterator<Item = (S, FeatureVector)>,
        S: Into<StationId>,
    {
        let features = vectors
            .into_iter()
            .map(|(id, features)| (id.into(), features))
            .collect();
        Self { user, features }
    }

    pub fn user_location(&self) -> Location {
        self.user
    }

    pub fn get(&self, station_id: &str) -> Option<&FeatureVector> {
        self.features.get(station_id)
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.features.contains_key(station_id)
    }

    /// Stations in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &FeatureVector)> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// True when `stations` holds exactly the ids of this set
    pub fn covers(&self, stations: &[Station]) -> bool {
        stations.len() == self.features.len()
            && stations.iter().all(|station| self.contains(&station.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(cost: f64) -> FeatureVector {
        FeatureVector {
            cost,
            heuristic: cost / 2.0,
            quality: 0.5,
            distance_km: 1.0,
        }
    }

    #[test]
    fn test_iteration_is_sorted_by_id() {
        let set = FeatureSet::from_vectors(
            Location::new(0.0, 0.0),
            vec![("c", vector(0.1)), ("a", vector(0.2)), ("b", vector(0.3))],
        );

        let ids: Vec<&str> = set.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("a").map(|f| f.cost), Some(0.2));
        assert!(!set.contains("d"));
    }

    #[test]
    fn test_covers_station_list() {
        let location = Location::new(0.0, 0.0);
        let set = FeatureSet::from_vectors(location, vec![("a", vector(0.5))]);

        assert!(set.covers(&[Station::new("a", "A", location)]));
        assert!(!set.covers(&[Station::new("b", "B", location)]));
    }
}
