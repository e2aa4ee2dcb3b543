use crate::algorithms::StationSelector;
use crate::config::LearnedWeights;
use crate::models::{Algorithm, AlgorithmResult, FeatureSet, FeatureVector, Score};
use crate::utils::ordering::max_by_score_then_id;

/// Fixed linear scoring model, the baseline the searches are checked against
#[derive(Debug, Clone, Copy, Default)]
pub struct LearnedScorer {
    weights: LearnedWeights,
}

impl LearnedScorer {
    pub fn new(weights: LearnedWeights) -> Self {
        Self { weights }
    }

    /// `α·(1 − cost) + β·quality + γ·(1 − heuristic)`
    pub fn score(&self, features: &FeatureVector) -> Score {
        self.weights.alpha * (1.0 - features.cost)
            + self.weights.beta * features.quality
            + self.weights.gamma * (1.0 - features.heuristic)
    }
}

impl StationSelector for LearnedScorer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ml
    }

    fn select(&self, features: &FeatureSet) -> Option<AlgorithmResult> {
        let (station_id, score) = max_by_score_then_id(
            features
                .iter()
                .map(|(id, vector)| (id.as_str(), self.score(vector))),
        )?;
        let vector = features.get(station_id)?;

        let reasoning = format!(
            "Linear model (proximity {:.2}, quality {:.2}, straight-line {:.2}) scores {} \
             highest at {:.4}: cost {:.3}, quality {:.3}, {:.1} km away",
            self.weights.alpha,
            self.weights.beta,
            self.weights.gamma,
            station_id,
            score,
            vector.cost,
            vector.quality,
            vector.distance_km
        );

        Some(AlgorithmResult::new(
            Algorithm::Ml,
            station_id,
            score.clamp(0.0, 1.0),
            reasoning,
        ))
    }
}
