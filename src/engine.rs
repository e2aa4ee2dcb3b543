// Stateless pipeline: normalize, run every selector, reconcile

use rayon::prelude::*;

use crate::algorithms::astar::AStarSelector;
use crate::algorithms::consensus::reconcile;
use crate::algorithms::dijkstra::DijkstraSelector;
use crate::algorithms::genetic::GeneticSelector;
use crate::algorithms::learned::LearnedScorer;
use crate::algorithms::StationSelector;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{AlgorithmResult, FeatureSet, Location, Recommendation, Station};
use crate::utils::normalize::FeatureNormalizer;

/// Runs the selectors over one request's candidates and reconciles their picks.
///
/// The engine keeps only its configuration and selector list; nothing from a
/// request outlives the call.
pub struct SelectionEngine {
    normalizer: FeatureNormalizer,
    selectors: Vec<Box<dyn StationSelector>>,
}

impl SelectionEngine {
    /// Engine with the four standard selectors
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let selectors = standard_selectors(&config);
        Self::with_selectors(config, selectors)
    }

    /// Engine with a caller-chosen selector list.
    ///
    /// A request only succeeds when the list yields exactly one result per
    /// [`crate::Algorithm`].
    pub fn with_selectors(
        config: EngineConfig,
        selectors: Vec<Box<dyn StationSelector>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            normalizer: FeatureNormalizer::new(config.normalizer),
            selectors,
        })
    }

    /// Validates the request and computes its feature set
    pub fn features(
        &self,
        user_location: &Location,
        stations: &[Station],
    ) -> Result<FeatureSet, EngineError> {
        Ok(self.normalizer.normalize(user_location, stations)?)
    }

    /// Picks the best station for `user_location` among `stations`.
    ///
    /// Either returns a recommendation with one detail entry per selector or
    /// fails with a single error; there is no partial result.
    pub fn select_best_station(
        &self,
        user_location: &Location,
        stations: &[Station],
    ) -> Result<Recommendation, EngineError> {
        let features = self.features(user_location, stations)?;

        // collect() waits for every selector, in list order
        let results: Vec<AlgorithmResult> = self
            .selectors
            .par_iter()
            .map(|selector| {
                selector
                    .select(&features)
                    .ok_or(EngineError::MissingResult(selector.algorithm()))
            })
            .collect::<Result<_, _>>()?;

        for result in &results {
            log::debug!(
                "{} chose {} (score {:.4}): {}",
                result.algorithm,
                result.station_id,
                result.score,
                result.reasoning
            );
        }

        reconcile(results, stations)
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            selectors: standard_selectors(&config),
            normalizer: FeatureNormalizer::new(config.normalizer),
        }
    }
}

fn standard_selectors(config: &EngineConfig) -> Vec<Box<dyn StationSelector>> {
    vec![
        Box::new(DijkstraSelector),
        Box::new(AStarSelector),
        Box::new(GeneticSelector::new(config.genetic.clone())),
        Box::new(LearnedScorer::new(config.learned)),
    ]
}

/// Picks the best station with the default configuration
pub fn select_best_station(
    user_location: Location,
    stations: &[Station],
) -> Result<Recommendation, EngineError> {
    SelectionEngine::default().select_best_station(&user_location, stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorKind};
    use crate::models::Algorithm;

    struct Rogue;

    impl StationSelector for Rogue {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Ml
        }

        fn select(&self, _features: &FeatureSet) -> Option<AlgorithmResult> {
            Some(AlgorithmResult::new(
                Algorithm::Ml,
                "not-a-candidate",
                1.0,
                "made up".to_string(),
            ))
        }
    }

    struct Silent;

    impl StationSelector for Silent {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Genetic
        }

        fn select(&self, _features: &FeatureSet) -> Option<AlgorithmResult> {
            None
        }
    }

    fn stations() -> Vec<Station> {
        vec![
            Station::new("a", "Alpha", Location::new(51.51, -0.12)),
            Station::new("b", "Bravo", Location::new(51.55, -0.20)),
        ]
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.genetic.population_size = 0;

        let err = SelectionEngine::new(config).err().unwrap();
        assert_eq!(
            err,
            EngineError::InvalidConfig(ConfigError::PopulationTooSmall(0))
        );
    }

    #[test]
    fn test_rogue_selector_fails_whole_request() {
        let selectors: Vec<Box<dyn StationSelector>> =
            vec![Box::new(DijkstraSelector), Box::new(Rogue)];
        let engine = SelectionEngine::with_selectors(EngineConfig::default(), selectors).unwrap();

        let err = engine
            .select_best_station(&Location::new(51.5, -0.1), &stations())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InconsistentResult);
        assert_eq!(
            err,
            EngineError::InconsistentResult {
                algorithm: Algorithm::Ml,
                station_id: "not-a-candidate".to_string(),
            }
        );
    }

    #[test]
    fn test_silent_selector_fails_whole_request() {
        let selectors: Vec<Box<dyn StationSelector>> =
            vec![Box::new(DijkstraSelector), Box::new(Silent)];
        let engine = SelectionEngine::with_selectors(EngineConfig::default(), selectors).unwrap();

        let err = engine
            .select_best_station(&Location::new(51.5, -0.1), &stations())
            .unwrap_err();
        assert_eq!(err, EngineError::MissingResult(Algorithm::Genetic));
    }

    #[test]
    fn test_repeated_selector_fails_whole_request() {
        let selectors: Vec<Box<dyn StationSelector>> =
            vec![Box::new(DijkstraSelector), Box::new(DijkstraSelector)];
        let engine = SelectionEngine::with_selectors(EngineConfig::default(), selectors).unwrap();

        let err = engine
            .select_best_station(&Location::new(51.5, -0.1), &stations())
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateResult(Algorithm::Dijkstra));
        assert_eq!(err.kind(), ErrorKind::InconsistentResult);
    }

    #[test]
    fn test_incomplete_selector_list_fails_whole_request() {
        let selectors: Vec<Box<dyn StationSelector>> =
            vec![Box::new(DijkstraSelector), Box::new(AStarSelector)];
        let engine = SelectionEngine::with_selectors(EngineConfig::default(), selectors).unwrap();

        let err = engine
            .select_best_station(&Location::new(51.5, -0.1), &stations())
            .unwrap_err();
        assert_eq!(err, EngineError::MissingResult(Algorithm::Genetic));
    }

    #[test]
    fn test_default_engine_reports_four_details() {
        let recommendation =
            select_best_station(Location::new(51.5, -0.1), &stations()).unwrap();

        assert_eq!(recommendation.details.len(), 4);
        assert!(stations()
            .iter()
            .any(|s| s.id == recommendation.best_station.id));
    }

    #[test]
    fn test_features_exposed_for_inspection() {
        let engine = SelectionEngine::default();
        let features = engine
            .features(&Location::new(51.5, -0.1), &stations())
            .unwrap();

        assert!(features.covers(&stations()));
    }
}
