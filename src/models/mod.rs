// Models module - exports all model types

mod features;
mod location;
mod request;
mod result;
mod station;

// Re-export model types
pub use self::features::{FeatureSet, FeatureVector};
pub use self::location::Location;
pub use self::request::{DetailEntry, Explanation, SelectionRequest, SelectionResponse};
pub use self::result::{Algorithm, AlgorithmResult, Recommendation};
pub use self::station::{Station, StationAttributes, MAX_DISTANCE_HINT_KM};

// Common type aliases for improved code readability
pub type StationId = String;
pub type Cost = f64;
pub type Score = f64;
