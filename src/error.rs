// Error taxonomy of the selection engine

use thiserror::Error;

use crate::models::{Algorithm, StationId};

/// Coarse label for an [`EngineError`], suitable for surfacing to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InconsistentResult,
    InvalidConfig,
}

/// Errors returned by [`crate::select_best_station`] and
/// [`crate::SelectionEngine`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The request was rejected before any computation started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// A selector picked a station that is not in the candidate set.
    #[error("{algorithm} returned unknown station '{station_id}'")]
    InconsistentResult {
        algorithm: Algorithm,
        station_id: StationId,
    },

    /// A selector produced no pick at all.
    #[error("{0} produced no selection")]
    MissingResult(Algorithm),

    /// More than one result claims the same algorithm.
    #[error("{0} reported more than one selection")]
    DuplicateResult(Algorithm),

    /// The aggregator was handed an empty result list.
    #[error("no algorithm results to reconcile")]
    NoResults,

    /// The engine configuration was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidInput(_) => ErrorKind::InvalidInput,
            EngineError::InconsistentResult { .. }
            | EngineError::MissingResult(_)
            | EngineError::DuplicateResult(_)
            | EngineError::NoResults => ErrorKind::InconsistentResult,
            EngineError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

/// Reasons a request's user location or candidate list is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("candidate station list is empty")]
    EmptyCandidates,

    #[error("{count} candidate stations exceed the limit of {max}")]
    TooManyCandidates { count: usize, max: usize },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("coordinate ({lat}, {lng}) is not finite")]
    NonFiniteCoordinate { lat: f64, lng: f64 },

    #[error("station id is empty")]
    EmptyStationId,

    #[error("station id '{0}' appears more than once")]
    DuplicateStationId(StationId),

    #[error("station '{station_id}' has invalid distance hint {value}")]
    InvalidDistanceHint { station_id: StationId, value: f64 },

    #[error("station '{0}' has a travel cost too large to represent")]
    UnboundedCost(StationId),

    #[error("rating {0} is outside [0, 5]")]
    RatingOutOfRange(f64),

    #[error("price {0} is negative or not finite")]
    InvalidPrice(f64),
}

/// Reasons an [`crate::EngineConfig`] is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("tournament size {tournament} must be between 1 and the population size {population}")]
    InvalidTournament { tournament: usize, population: usize },

    #[error("mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f64),

    #[error("mutation step {0} must be positive and finite")]
    InvalidMutationStep(f64),

    #[error("learned weights must be non-negative and sum to 1, got ({alpha}, {beta}, {gamma})")]
    InvalidLearnedWeights { alpha: f64, beta: f64, gamma: f64 },

    #[error("normalizer weight '{name}' must be non-negative and finite, got {value}")]
    InvalidNormalizerWeight { name: &'static str, value: f64 },

    #[error("neutral quality {0} is outside [0, 1]")]
    InvalidNeutralQuality(f64),

    #[error("maximum candidate count must be positive")]
    ZeroCandidateLimit,
}
