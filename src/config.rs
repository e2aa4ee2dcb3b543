// Tunable constants of the selection engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Top-level engine configuration.
///
/// Every section deserializes with defaults, so a config file only needs to
/// name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub normalizer: NormalizerConfig,
    pub genetic: GeneticConfig,
    pub learned: LearnedWeights,
}

impl EngineConfig {
    /// Parses a JSON config document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.normalizer.validate()?;
        self.genetic.validate()?;
        self.learned.validate()
    }
}

/// Weights used when turning raw station records into features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Cost multiplier applied to the batch-relative price
    pub price_weight: f64,

    /// Cost multiplier applied to connector scarcity
    pub availability_weight: f64,

    /// Quality given to stations without rating or connector data
    pub neutral_quality: f64,

    /// Largest candidate list accepted in one request
    pub max_candidates: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            price_weight: 0.3,
            availability_weight: 0.2,
            neutral_quality: 0.5,
            max_candidates: 200,
        }
    }
}

impl NormalizerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("price_weight", self.price_weight),
            ("availability_weight", self.availability_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNormalizerWeight { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.neutral_quality) {
            return Err(ConfigError::InvalidNeutralQuality(self.neutral_quality));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::ZeroCandidateLimit);
        }
        Ok(())
    }
}

/// Parameters of the evolutionary weight search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,

    /// Probability that an offspring receives a mutation
    pub mutation_rate: f64,

    /// Largest perturbation applied to one weight by a mutation
    pub mutation_step: f64,

    /// Generations without improvement before the search stops early
    pub plateau_generations: usize,

    /// Smallest fitness gain that counts as improvement
    pub plateau_epsilon: f64,

    /// Wall-clock budget for the generation loop; unbounded when absent
    pub time_budget_ms: Option<u64>,

    /// Mixed into the request-derived seed
    pub seed_salt: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 40,
            tournament_size: 3,
            mutation_rate: 0.2,
            mutation_step: 0.1,
            plateau_generations: 10,
            plateau_epsilon: 1e-9,
            time_budget_ms: None,
            seed_salt: 0,
        }
    }
}

impl GeneticConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournament {
                tournament: self.tournament_size,
                population: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if !self.mutation_step.is_finite() || self.mutation_step <= 0.0 {
            return Err(ConfigError::InvalidMutationStep(self.mutation_step));
        }
        Ok(())
    }
}

/// Coefficients of the fixed linear scoring model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnedWeights {
    /// Weight of `1 - cost`
    pub alpha: f64,
    /// Weight of `quality`
    pub beta: f64,
    /// Weight of `1 - heuristic`
    pub gamma: f64,
}

impl Default for LearnedWeights {
    fn default() -> Self {
        Self {
            alpha: 0.45,
            beta: 0.35,
            gamma: 0.20,
        }
    }
}

impl LearnedWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.alpha, self.beta, self.gamma];
        let valid = weights.iter().all(|w| w.is_finite() && *w >= 0.0)
            && (weights.iter().sum::<f64>() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidLearnedWeights {
                alpha: self.alpha,
                beta: self.beta,
                gamma: self.gamma,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "genetic": { "generations": 5 } }"#)
                .unwrap();

        assert_eq!(config.genetic.generations, 5);
        assert_eq!(config.genetic.population_size, 30);
        assert_eq!(config.learned, LearnedWeights::default());
    }

    #[test]
    fn test_time_budget() {
        let config = EngineConfig::from_json(r#"{ "genetic": { "time_budget_ms": 250 } }"#).unwrap();
        assert_eq!(
            config.genetic.time_budget(),
            Some(Duration::from_millis(250))
        );
        assert_eq!(GeneticConfig::default().time_budget(), None);
    }

    #[test]
    fn test_rejects_bad_genetic_parameters() {
        let mut config = EngineConfig::default();
        config.genetic.population_size = 1;
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));

        let mut config = EngineConfig::default();
        config.genetic.tournament_size = 31;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTournament { .. })
        ));

        let mut config = EngineConfig::default();
        config.genetic.mutation_rate = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMutationRate(1.5)));
    }

    #[test]
    fn test_rejects_unbalanced_learned_weights() {
        let mut config = EngineConfig::default();
        config.learned = LearnedWeights {
            alpha: 0.5,
            beta: 0.5,
            gamma: 0.5,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLearnedWeights { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_candidate_limit() {
        let mut config = EngineConfig::default();
        config.normalizer.max_candidates = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCandidateLimit));
    }
}
