use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use crate::models::{Cost, FeatureSet, StationId};

/// Node of the candidate graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateNode {
    /// The user's position
    Source,
    Station(StationId),
}

impl CandidateNode {
    /// Id used for deterministic tie-breaks; the source sorts first
    pub fn tie_key(&self) -> &str {
        match self {
            CandidateNode::Source => "",
            CandidateNode::Station(id) => id,
        }
    }
}

/// Weighted graph from the user to every candidate station.
///
/// The base build is a star: one edge from the source to each station,
/// weighted by the station's normalized cost. Station-to-station transfer
/// edges can be added for multi-stop searches.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    graph: DiGraph<CandidateNode, Cost>,
    source: NodeIndex,
    stations: HashMap<StationId, NodeIndex>,
    // straight-line lower bound per station node
    heuristics: HashMap<NodeIndex, Cost>,
}

impl CandidateGraph {
    /// Build the star graph for a feature set
    pub fn build(features: &FeatureSet) -> Self {
        let mut graph = DiGraph::with_capacity(features.len() + 1, features.len());
        let source = graph.add_node(CandidateNode::Source);
        let mut stations = HashMap::with_capacity(features.len());
        let mut heuristics = HashMap::with_capacity(features.len());

        for (id, vector) in features.iter() {
            let node = graph.add_node(CandidateNode::Station(id.clone()));
            graph.add_edge(source, node, vector.cost);
            stations.insert(id.clone(), node);
            heuristics.insert(node, vector.heuristic);
        }

        Self {
            graph,
            source,
            stations,
            heuristics,
        }
    }

    /// Adds a directed station-to-station edge.
    ///
    /// Returns false when either station is unknown or the cost is not a
    /// finite non-negative number.
    pub fn add_transfer(&mut self, from: &str, to: &str, cost: Cost) -> bool {
        if !cost.is_finite() || cost < 0.0 {
            return false;
        }
        match (self.stations.get(from), self.stations.get(to)) {
            (Some(&a), Some(&b)) => {
                self.graph.add_edge(a, b, cost);
                true
            }
            _ => false,
        }
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn node(&self, index: NodeIndex) -> &CandidateNode {
        &self.graph[index]
    }

    pub fn station_node(&self, station_id: &str) -> Option<NodeIndex> {
        self.stations.get(station_id).copied()
    }

    /// Station id of a node, `None` for the source
    pub fn station_id(&self, index: NodeIndex) -> Option<&str> {
        match &self.graph[index] {
            CandidateNode::Source => None,
            CandidateNode::Station(id) => Some(id),
        }
    }

    pub fn is_goal(&self, index: NodeIndex) -> bool {
        self.station_id(index).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Outgoing edges of a node as (target, weight)
    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = (NodeIndex, Cost)> + '_ {
        self.graph
            .edges(index)
            .map(|edge| (edge.target(), *edge.weight()))
    }

    /// Straight-line estimate of a station's edge cost from the source
    pub fn straight_line(&self, station_id: &str) -> Option<Cost> {
        self.station_node(station_id)
            .and_then(|node| self.heuristics.get(&node).copied())
    }

    /// Admissible estimate of the remaining cost from `index` to the
    /// nearest station.
    ///
    /// Every station is a goal, so its estimate is zero. From the source the
    /// cheapest station costs at least the smallest straight-line bound.
    pub fn estimate_to_goal(&self, index: NodeIndex) -> Cost {
        if self.is_goal(index) {
            0.0
        } else {
            let nearest = self
                .heuristics
                .values()
                .copied()
                .fold(f64::INFINITY, f64::min);
            if nearest.is_finite() {
                nearest
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureVector, Location};

    fn features() -> FeatureSet {
        let vector = |cost: f64, heuristic: f64| FeatureVector {
            cost,
            heuristic,
            quality: 0.5,
            distance_km: heuristic * 10.0,
        };
        FeatureSet::from_vectors(
            Location::new(0.0, 0.0),
            vec![("b", vector(0.8, 0.6)), ("a", vector(0.4, 0.3))],
        )
    }

    #[test]
    fn test_star_shape() {
        let graph = CandidateGraph::build(&features());

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node(graph.source()), &CandidateNode::Source);

        let mut edges: Vec<(String, f64)> = graph
            .neighbors(graph.source())
            .map(|(node, cost)| (graph.station_id(node).unwrap().to_string(), cost))
            .collect();
        edges.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(edges, vec![("a".to_string(), 0.4), ("b".to_string(), 0.8)]);
    }

    #[test]
    fn test_stations_have_no_outgoing_edges() {
        let graph = CandidateGraph::build(&features());
        let a = graph.station_node("a").unwrap();
        assert_eq!(graph.neighbors(a).count(), 0);
    }

    #[test]
    fn test_estimates() {
        let graph = CandidateGraph::build(&features());
        let a = graph.station_node("a").unwrap();

        assert_eq!(graph.estimate_to_goal(a), 0.0);
        assert_eq!(graph.estimate_to_goal(graph.source()), 0.3);
        assert_eq!(graph.straight_line("b"), Some(0.6));
        assert_eq!(graph.straight_line("z"), None);
    }

    #[test]
    fn test_add_transfer() {
        let mut graph = CandidateGraph::build(&features());

        assert!(graph.add_transfer("a", "b", 0.1));
        assert!(!graph.add_transfer("a", "missing", 0.1));
        assert!(!graph.add_transfer("a", "b", -1.0));
        assert_eq!(graph.edge_count(), 3);
    }
}
