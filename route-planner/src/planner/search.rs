//! Dijkstra shortest-path search over the transit graph.
//!
//! Weights are non-negative whole minutes, enforced at graph build. Each
//! search allocates its own heap and bookkeeping maps, so concurrent
//! searches over one shared graph are independent.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::StopId;
use crate::graph::TransitGraph;

/// A found path: ordered stop ids and the total travel minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub stops: Vec<StopId>,
    pub total_minutes: u32,
}

/// Find the minimum-minute path from `source` to `destination`.
///
/// Returns `None` when the destination is unreachable — a normal
/// negative result, not an error. A source equal to its destination
/// yields the one-stop path of zero minutes.
pub fn shortest_path(
    graph: &TransitGraph,
    source: &StopId,
    destination: &StopId,
) -> Option<PathResult> {
    let targets = HashSet::from([destination.clone()]);
    shortest_paths(graph, source, &targets).remove(destination)
}

/// Single-source Dijkstra settling a whole target set in one run.
///
/// Returns a path for every reachable target; unreachable targets are
/// simply absent from the map. The search stops as soon as every target
/// has been settled, so resolving one departure place against many
/// candidate destination stops costs a single traversal.
///
/// Heap entries are `(cost, stop id)`, so equal-cost ties break on the
/// id ordering and the result is deterministic for a given graph.
pub fn shortest_paths(
    graph: &TransitGraph,
    source: &StopId,
    targets: &HashSet<StopId>,
) -> HashMap<StopId, PathResult> {
    let mut dist: HashMap<StopId, u32> = HashMap::new();
    let mut prev: HashMap<StopId, StopId> = HashMap::new();
    let mut settled: HashSet<StopId> = HashSet::new();
    let mut remaining: HashSet<StopId> = targets.clone();
    let mut heap: BinaryHeap<Reverse<(u32, StopId)>> = BinaryHeap::new();

    dist.insert(source.clone(), 0);
    heap.push(Reverse((0, source.clone())));

    while let Some(Reverse((cost, stop))) = heap.pop() {
        // First pop settles a stop; later heap entries for it are stale.
        if !settled.insert(stop.clone()) {
            continue;
        }

        if remaining.remove(&stop) && remaining.is_empty() {
            break;
        }

        for edge in graph.edges_from(&stop) {
            if settled.contains(&edge.to) {
                continue;
            }
            let next_cost = cost.saturating_add(edge.minutes);
            if dist.get(&edge.to).is_none_or(|&known| next_cost < known) {
                dist.insert(edge.to.clone(), next_cost);
                prev.insert(edge.to.clone(), stop.clone());
                heap.push(Reverse((next_cost, edge.to.clone())));
            }
        }
    }

    targets
        .iter()
        .filter(|target| settled.contains(*target))
        .map(|target| {
            (
                target.clone(),
                PathResult {
                    stops: reconstruct(&prev, source, target),
                    total_minutes: dist[target],
                },
            )
        })
        .collect()
}

/// Walk the predecessor chain back from a settled target.
fn reconstruct(prev: &HashMap<StopId, StopId>, source: &StopId, target: &StopId) -> Vec<StopId> {
    let mut path = vec![target.clone()];
    let mut current = target;
    while current != source {
        current = &prev[current];
        path.push(current.clone());
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::TimetableBuilder;

    fn stop(id: &str) -> StopId {
        StopId::new(id)
    }

    /// A → B (10 min) → C (15 min), one direction only.
    fn line_graph() -> TransitGraph {
        let timetable = TimetableBuilder::new()
            .stop("A", "Alpha")
            .stop("B", "Bravo")
            .stop("C", "Charlie")
            .trip(
                "T1",
                &[
                    ("A", "10:00:00", "10:00:00", 1),
                    ("B", "10:10:00", "10:10:00", 2),
                    ("C", "10:25:00", "10:25:00", 3),
                ],
            )
            .build()
            .unwrap();
        TransitGraph::build(&timetable).unwrap()
    }

    #[test]
    fn follows_the_line() {
        let graph = line_graph();
        let path = shortest_path(&graph, &stop("A"), &stop("C")).unwrap();

        assert_eq!(path.stops, vec![stop("A"), stop("B"), stop("C")]);
        assert_eq!(path.total_minutes, 25);
    }

    #[test]
    fn no_implicit_reverse_edges() {
        let graph = line_graph();
        assert!(shortest_path(&graph, &stop("C"), &stop("A")).is_none());
    }

    #[test]
    fn source_equals_destination() {
        let graph = line_graph();
        let path = shortest_path(&graph, &stop("B"), &stop("B")).unwrap();

        assert_eq!(path.stops, vec![stop("B")]);
        assert_eq!(path.total_minutes, 0);
    }

    #[test]
    fn unknown_source_is_unreachable() {
        let graph = line_graph();
        assert!(shortest_path(&graph, &stop("X"), &stop("C")).is_none());
    }

    #[test]
    fn picks_cheaper_of_two_routes() {
        // A → B → C (10 + 10) beats the direct A → C (35)
        let timetable = TimetableBuilder::new()
            .stop("A", "Alpha")
            .stop("B", "Bravo")
            .stop("C", "Charlie")
            .trip(
                "DIRECT",
                &[
                    ("A", "08:00:00", "08:00:00", 1),
                    ("C", "08:35:00", "08:35:00", 2),
                ],
            )
            .trip(
                "VIA_B",
                &[
                    ("A", "09:00:00", "09:00:00", 1),
                    ("B", "09:10:00", "09:10:00", 2),
                    ("C", "09:20:00", "09:20:00", 3),
                ],
            )
            .build()
            .unwrap();
        let graph = TransitGraph::build(&timetable).unwrap();

        let path = shortest_path(&graph, &stop("A"), &stop("C")).unwrap();
        assert_eq!(path.stops, vec![stop("A"), stop("B"), stop("C")]);
        assert_eq!(path.total_minutes, 20);
    }

    #[test]
    fn settles_multiple_targets_in_one_run() {
        let graph = line_graph();
        let targets = HashSet::from([stop("B"), stop("C"), stop("Z")]);

        let reached = shortest_paths(&graph, &stop("A"), &targets);

        assert_eq!(reached.len(), 2);
        assert_eq!(reached[&stop("B")].total_minutes, 10);
        assert_eq!(reached[&stop("C")].total_minutes, 25);
        assert!(!reached.contains_key(&stop("Z")));
    }

    #[test]
    fn path_edges_exist_and_sum_to_total() {
        let graph = line_graph();
        let path = shortest_path(&graph, &stop("A"), &stop("C")).unwrap();

        let mut sum = 0;
        for pair in path.stops.windows(2) {
            let edge = graph
                .edges_from(&pair[0])
                .iter()
                .find(|edge| edge.to == pair[1])
                .expect("every consecutive pair must be a graph edge");
            sum += edge.minutes;
        }
        assert_eq!(sum, path.total_minutes);
    }

    #[test]
    fn equal_cost_tie_breaks_deterministically() {
        // Two zero-cost relays into C; the lower stop id wins the pop
        let timetable = TimetableBuilder::new()
            .stop("A", "Alpha")
            .stop("B1", "Bravo One")
            .stop("B2", "Bravo Two")
            .stop("C", "Charlie")
            .trip(
                "T1",
                &[
                    ("A", "10:00:00", "10:00:00", 1),
                    ("B1", "10:10:00", "10:10:00", 2),
                    ("C", "10:20:00", "10:20:00", 3),
                ],
            )
            .trip(
                "T2",
                &[
                    ("A", "11:00:00", "11:00:00", 1),
                    ("B2", "11:10:00", "11:10:00", 2),
                    ("C", "11:20:00", "11:20:00", 3),
                ],
            )
            .build()
            .unwrap();
        let graph = TransitGraph::build(&timetable).unwrap();

        let first = shortest_path(&graph, &stop("A"), &stop("C")).unwrap();
        assert_eq!(first.total_minutes, 20);
        assert_eq!(first.stops, vec![stop("A"), stop("B1"), stop("C")]);

        for _ in 0..10 {
            assert_eq!(shortest_path(&graph, &stop("A"), &stop("C")).unwrap(), first);
        }
    }
}
