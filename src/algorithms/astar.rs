use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::algorithms::StationSelector;
use crate::models::{Algorithm, AlgorithmResult, Cost, FeatureSet};
use crate::utils::graph::CandidateGraph;
use crate::utils::ordering::RankKey;

/// Heuristic selector: A* from the user to the nearest goal station
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarSelector;

/// Entry of the open set, ordered as a min-heap on (f, station id)
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenNode {
    key: Reverse<RankKey>,
    node: NodeIndex,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of one A* search
#[derive(Debug, Clone, PartialEq)]
pub struct AStarPath {
    pub goal: NodeIndex,
    /// Cost of the path actually found
    pub cost: Cost,
    /// Nodes moved to the closed set, goal included
    pub expanded: usize,
}

/// Runs A* from the source until the first goal is closed.
///
/// With an admissible estimate the first goal popped from the open set is a
/// cheapest one; among equal f values the smallest station id is popped
/// first.
pub fn search(graph: &CandidateGraph) -> Option<AStarPath> {
    let mut open = BinaryHeap::new();
    let mut closed: HashSet<NodeIndex> = HashSet::new();
    let mut g_score: HashMap<NodeIndex, Cost> = HashMap::new();

    let source = graph.source();
    g_score.insert(source, 0.0);
    open.push(OpenNode {
        key: Reverse(RankKey::new(
            graph.estimate_to_goal(source),
            graph.node(source).tie_key(),
        )),
        node: source,
    });

    while let Some(OpenNode { node, .. }) = open.pop() {
        if !closed.insert(node) {
            continue;
        }
        let g = g_score[&node];

        if graph.is_goal(node) {
            return Some(AStarPath {
                goal: node,
                cost: g,
                expanded: closed.len(),
            });
        }

        for (neighbor, weight) in graph.neighbors(node) {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative = g + weight;
            let improves = g_score
                .get(&neighbor)
                .map_or(true, |&known| tentative < known);
            if improves {
                g_score.insert(neighbor, tentative);
                let f = tentative + graph.estimate_to_goal(neighbor);
                open.push(OpenNode {
                    key: Reverse(RankKey::new(f, graph.node(neighbor).tie_key())),
                    node: neighbor,
                });
            }
        }
    }

    None
}

impl StationSelector for AStarSelector {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn select(&self, features: &FeatureSet) -> Option<AlgorithmResult> {
        let graph = CandidateGraph::build(features);
        let path = search(&graph)?;
        let station_id = graph.station_id(path.goal)?.to_string();
        let estimate = graph.straight_line(&station_id).unwrap_or(0.0);

        let reasoning = format!(
            "A* reached {} first: path cost {:.4} against a straight-line estimate of {:.4} \
             ({} nodes expanded)",
            station_id, path.cost, estimate, path.expanded
        );

        Some(AlgorithmResult::new(
            Algorithm::AStar,
            station_id,
            (1.0 - path.cost).clamp(0.0, 1.0),
            reasoning,
        ))
    }
}
