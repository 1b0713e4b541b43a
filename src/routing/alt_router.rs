use keyed_priority_queue::{Entry, KeyedPriorityQueue};

use crate::routing::alt_landmark_data::AltLandmarkData;
use crate::routing::dijkstra::Distance;
use crate::routing::graph::ForwardBackwardGraph;
use crate::routing::router::{QueryResult, Router};

/// A* search whose lower bounds come from the precomputed landmark tables.
/// Relaxation and early exit are the same as in the plain Dijkstra search,
/// only the queue is ordered by `travel time + estimate`. Exactness holds as
/// long as the tables were computed on the queried graph; callers must throw
/// cached tables away whenever the graph changes.
pub struct AltRouter {
    graph: ForwardBackwardGraph,
    landmark_data: AltLandmarkData,
}

impl AltRouter {
    pub fn new(graph: ForwardBackwardGraph, landmark_data: AltLandmarkData) -> Self {
        assert_eq!(
            landmark_data.number_of_nodes(),
            graph.number_of_nodes(),
            "Landmark tables were computed for a graph with a different node count."
        );
        AltRouter {
            graph,
            landmark_data,
        }
    }

    pub fn graph(&self) -> &ForwardBackwardGraph {
        &self.graph
    }

    pub fn landmark_data(&self) -> &AltLandmarkData {
        &self.landmark_data
    }

    /// Lower bound on the remaining travel time from `node` to `target`,
    /// derived from the triangle inequality over every landmark. A landmark
    /// strictly ahead of the target bounds via its forward table, one
    /// strictly behind the source via its backward table. Terms touching an
    /// unreachable table entry are skipped.
    fn estimate(&self, node: usize, target: usize) -> u32 {
        let mut highest_estimate: i64 = 0;
        for travel_times in self.landmark_data.travel_times_to_all() {
            let (from_landmark_node, node_to_landmark) = travel_times[node];
            let (from_landmark_target, target_to_landmark) = travel_times[target];

            if from_landmark_target != u32::MAX && from_landmark_node != u32::MAX {
                highest_estimate =
                    highest_estimate.max(from_landmark_target as i64 - from_landmark_node as i64);
            }
            if node_to_landmark != u32::MAX && target_to_landmark != u32::MAX {
                highest_estimate =
                    highest_estimate.max(node_to_landmark as i64 - target_to_landmark as i64);
            }
        }
        highest_estimate as u32
    }
}

impl Router for AltRouter {
    fn query(&self, from: usize, to: usize) -> QueryResult {
        let graph = &self.graph.forward_graph;
        let node_count = graph.number_of_nodes();

        let mut queue: KeyedPriorityQueue<usize, Distance> = KeyedPriorityQueue::new();
        for i in 0..node_count {
            let key = if i == from {
                Distance(self.estimate(from, to))
            } else {
                Distance(u32::MAX)
            };
            queue.push(i, key);
        }
        let mut travel_times = vec![u32::MAX; node_count];
        travel_times[from] = 0;
        let mut predecessors: Vec<Option<usize>> = vec![None; node_count];
        let mut nodes_polled = 0;

        while let Some((current_id, current_key)) = queue.pop() {
            if current_key.get() == u32::MAX {
                break;
            }
            nodes_polled += 1;
            if current_id == to {
                break;
            }

            let current_travel_time = travel_times[current_id];
            let begin_index_adjacent_nodes = graph.first_out[current_id];
            let end_index_adjacent_nodes = graph.first_out[current_id + 1];

            for i in begin_index_adjacent_nodes..end_index_adjacent_nodes {
                let neighbour = graph.head[i];

                if let Entry::Vacant(_) = queue.entry(neighbour) {
                    continue;
                }

                let new_travel_time = current_travel_time.saturating_add(graph.travel_time[i]);
                if new_travel_time < travel_times[neighbour] {
                    // the estimate depends on the fixed target, so it is
                    // recomputed every time a node is reached
                    let estimate = self.estimate(neighbour, to);
                    match queue.entry(neighbour) {
                        Entry::Occupied(e) => {
                            e.set_priority(Distance(new_travel_time.saturating_add(estimate)));
                        }
                        Entry::Vacant(_) => {
                            unreachable!();
                        }
                    }
                    travel_times[neighbour] = new_travel_time;
                    predecessors[neighbour] = Some(current_id);
                }
            }
        }

        QueryResult::from_search(to, &travel_times, &predecessors, nodes_polled)
    }
}
