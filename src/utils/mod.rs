pub mod distance;
pub mod graph;
pub mod normalize;
pub mod ordering;
pub mod seed;
