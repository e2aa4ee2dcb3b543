pub mod astar;
pub mod consensus;
pub mod dijkstra;
pub mod genetic;
pub mod learned;

// Common algorithm traits
use crate::models::{Algorithm, AlgorithmResult, FeatureSet};

/// Trait for the station selectors the engine runs side by side.
///
/// A selector is a pure function of the feature set: it holds no state
/// between calls and must be safe to run on any thread.
pub trait StationSelector: Send + Sync {
    /// Which algorithm this selector reports as
    fn algorithm(&self) -> Algorithm;

    /// Pick one station from the feature set, `None` only when it is empty
    fn select(&self, features: &FeatureSet) -> Option<AlgorithmResult>;
}
