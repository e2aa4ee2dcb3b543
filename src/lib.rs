// Public modules
pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::StationSelector;
pub use config::EngineConfig;
pub use engine::{select_best_station, SelectionEngine};
pub use error::{EngineError, ErrorKind};
pub use models::{
    Algorithm, AlgorithmResult, FeatureSet, FeatureVector, Location, Recommendation,
    SelectionRequest, SelectionResponse, Station, StationAttributes,
};
