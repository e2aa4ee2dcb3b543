// Wire shapes exchanged with the lookup and presentation layers

use serde::{Deserialize, Serialize};

use crate::models::{AlgorithmResult, Location, Recommendation, Score, Station, StationId};

/// Body of a best-station request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub user_location: Location,
    pub stations: Vec<Station>,
}

/// Body of a best-station response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub best_station: Station,
    pub explanation: Explanation,
    pub directions_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub consensus: String,
    pub details: Vec<DetailEntry>,
}

/// One algorithm's pick as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailEntry {
    /// Display label, e.g. "A* Search"
    pub algorithm: String,

    /// Name of the chosen station
    pub choice: String,

    pub station_id: StationId,
    pub score: Score,
    pub reasoning: String,
}

impl SelectionResponse {
    /// Converts an engine recommendation into the response body.
    ///
    /// `stations` resolves each detail's station id into the display name.
    pub fn from_recommendation(
        recommendation: Recommendation,
        user_location: &Location,
        stations: &[Station],
    ) -> Self {
        let directions_url = recommendation.directions_url(user_location);
        let details = recommendation
            .details
            .into_iter()
            .map(|result| DetailEntry::from_result(result, stations))
            .collect();

        Self {
            best_station: recommendation.best_station,
            explanation: Explanation {
                consensus: recommendation.consensus,
                details,
            },
            directions_url,
        }
    }
}

impl DetailEntry {
    fn from_result(result: AlgorithmResult, stations: &[Station]) -> Self {
        let choice = stations
            .iter()
            .find(|station| station.id == result.station_id)
            .map(|station| station.name.clone())
            .unwrap_or_else(|| result.station_id.clone());

        Self {
            algorithm: result.algorithm.label().to_string(),
            choice,
            station_id: result.station_id,
            score: result.score,
            reasoning: result.reasoning,
        }
    }
}
