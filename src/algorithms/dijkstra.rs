use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::algorithms::StationSelector;
use crate::models::{Algorithm, AlgorithmResult, Cost, FeatureSet};
use crate::utils::graph::CandidateGraph;
use crate::utils::ordering::RankKey;

/// Shortest-path selector: the station with the cheapest path from the user
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSelector;

/// Single-source shortest-path distances from the graph's source.
///
/// Uses a min-priority queue keyed by tentative distance (ties broken by
/// station id), re-pushing a node to lower its key. Unreachable nodes are
/// absent from the result.
pub fn shortest_distances(graph: &CandidateGraph) -> HashMap<NodeIndex, Cost> {
    let mut distances: HashMap<NodeIndex, Cost> = HashMap::with_capacity(graph.node_count());
    let mut visited: HashSet<NodeIndex> = HashSet::with_capacity(graph.node_count());
    let mut queue: PriorityQueue<NodeIndex, Reverse<RankKey>> = PriorityQueue::new();

    let source = graph.source();
    distances.insert(source, 0.0);
    queue.push(source, Reverse(RankKey::new(0.0, graph.node(source).tie_key())));

    while let Some((vertex, Reverse(key))) = queue.pop() {
        if !visited.insert(vertex) {
            continue;
        }
        let current = key.value.0;

        for (neighbor, weight) in graph.neighbors(vertex) {
            if visited.contains(&neighbor) {
                continue;
            }

            let candidate = current + weight;
            let is_shorter = match distances.get(&neighbor) {
                Some(&known) => candidate < known,
                None => true,
            };

            if is_shorter {
                distances.insert(neighbor, candidate);
                // push on a queued item replaces its priority
                queue.push(
                    neighbor,
                    Reverse(RankKey::new(candidate, graph.node(neighbor).tie_key())),
                );
            }
        }
    }

    distances
}

impl StationSelector for DijkstraSelector {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn select(&self, features: &FeatureSet) -> Option<AlgorithmResult> {
        let graph = CandidateGraph::build(features);
        let distances = shortest_distances(&graph);

        let (best, settled) = distances
            .iter()
            .filter_map(|(node, distance)| {
                graph
                    .station_id(*node)
                    .map(|id| RankKey::new(*distance, id))
            })
            .fold((None::<RankKey>, 0_usize), |(best, count), key| {
                let best = match best {
                    Some(current) if current <= key => Some(current),
                    _ => Some(key),
                };
                (best, count + 1)
            });
        let best = best?;
        let cost = best.value.0;

        let reasoning = format!(
            "Shortest path from your location reaches {} with normalized cost {:.4} \
             ({} stations settled)",
            best.tie, cost, settled
        );

        Some(AlgorithmResult::new(
            Algorithm::Dijkstra,
            best.tie,
            (1.0 - cost).clamp(0.0, 1.0),
            reasoning,
        ))
    }
}
