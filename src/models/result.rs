// Per-algorithm picks and the final recommendation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Location, Score, Station, StationId};

/// The four decision procedures, declared in the order their results are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Genetic,
    #[serde(rename = "ML")]
    Ml,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Genetic,
        Algorithm::Ml,
    ];

    /// Human readable name shown next to each pick
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::AStar => "A* Search",
            Algorithm::Genetic => "Genetic Algorithm",
            Algorithm::Ml => "Machine Learning",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One selector's pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,

    pub station_id: StationId,

    /// Merit in [0, 1], higher is better, comparable across algorithms
    pub score: Score,

    pub reasoning: String,
}

impl AlgorithmResult {
    pub fn new<S: Into<String>>(
        algorithm: Algorithm,
        station_id: S,
        score: Score,
        reasoning: String,
    ) -> Self {
        Self {
            algorithm,
            station_id: station_id.into(),
            score,
            reasoning,
        }
    }
}

/// The reconciled outcome of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub best_station: Station,

    pub consensus: String,

    /// Always ordered Dijkstra, A*, Genetic, ML
    pub details: Vec<AlgorithmResult>,
}

impl Recommendation {
    /// Google Maps directions from `from` to the recommended station
    pub fn directions_url(&self, from: &Location) -> String {
        format!(
            "https://www.google.com/maps/dir/{},{}/{},{}",
            from.lat, from.lng, self.best_station.location.lat, self.best_station.location.lng
        )
    }

    /// Number of algorithms whose pick is the recommended station
    pub fn agreeing(&self) -> usize {
        self.details
            .iter()
            .filter(|result| result.station_id == self.best_station.id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_order() {
        let mut shuffled = vec![
            Algorithm::Ml,
            Algorithm::Dijkstra,
            Algorithm::Genetic,
            Algorithm::AStar,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_algorithm_serialization() {
        assert_eq!(serde_json::to_string(&Algorithm::Ml).unwrap(), "\"ML\"");
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), "\"AStar\"");
    }

    #[test]
    fn test_directions_url() {
        let station = Station::new("s", "S", Location::new(52.5, 4.75));
        let recommendation = Recommendation {
            best_station: station,
            consensus: "all algorithms agree".to_string(),
            details: Vec::new(),
        };

        assert_eq!(
            recommendation.directions_url(&Location::new(52.25, 4.5)),
            "https://www.google.com/maps/dir/52.25,4.5/52.5,4.75"
        );
    }
}
