use std::cmp::Ordering;

use keyed_priority_queue::{Entry, KeyedPriorityQueue};

use crate::io::poi::PoiIndex;
use crate::routing::graph::{ForwardBackwardGraph, Graph};
use crate::routing::router::{QueryResult, Router};

/// Priority key with reversed ordering, so that the keyed queue pops the
/// smallest travel time first.
#[derive(Eq, PartialEq)]
pub struct Distance(pub u32);

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0).reverse()
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Distance {
    pub fn get(&self) -> u32 {
        self.0
    }
}

pub struct Dijkstra {}

impl Dijkstra {
    /// Travel times from `from` to every node, `u32::MAX` where no path
    /// exists. No early exit, the whole graph is settled.
    pub fn distance_one_2_many(from: usize, graph: &Graph) -> Vec<u32> {
        let (mut queue, mut distances) = Self::get_initial_queue(graph.number_of_nodes(), from);

        while let Some((current_id, current_distance)) = queue.pop() {
            if current_distance.get() == u32::MAX {
                // the smallest value in the queue was unreachable, abort here
                return distances;
            }

            let begin_index_adjacent_nodes = graph.first_out[current_id];
            let end_index_adjacent_nodes = graph.first_out[current_id + 1];

            for i in begin_index_adjacent_nodes..end_index_adjacent_nodes {
                let neighbour = graph.head[i];

                if let Entry::Vacant(_) = queue.entry(neighbour) {
                    // already settled
                    continue;
                }

                let new_distance = current_distance.get().saturating_add(graph.travel_time[i]);
                if queue.get_priority(&neighbour).unwrap().get() > new_distance {
                    match queue.entry(neighbour) {
                        Entry::Occupied(e) => {
                            e.set_priority(Distance(new_distance));
                        }
                        Entry::Vacant(_) => {
                            unreachable!();
                        }
                    }
                    distances[neighbour] = new_distance;
                }
            }
        }
        distances
    }

    /// Point-to-point query with predecessor tracking. Stops as soon as `to`
    /// is extracted from the queue.
    pub fn query(from: usize, to: usize, graph: &Graph) -> QueryResult {
        let node_count = graph.number_of_nodes();
        let (mut queue, mut travel_times) = Self::get_initial_queue(node_count, from);
        let mut predecessors: Vec<Option<usize>> = vec![None; node_count];
        let mut nodes_polled = 0;

        while let Some((current_id, current_distance)) = queue.pop() {
            if current_distance.get() == u32::MAX {
                break;
            }
            nodes_polled += 1;
            if current_id == to {
                break;
            }

            Self::relax_edges(
                current_id,
                current_distance.get(),
                graph,
                &mut queue,
                &mut travel_times,
                &mut predecessors,
            );
        }

        QueryResult::from_search(to, &travel_times, &predecessors, nodes_polled)
    }

    /// Nearest-points-of-interest variant: instead of stopping at a single
    /// target, collects up to `max_results` nodes of the supplied index in
    /// the order they are extracted from the queue.
    pub fn find_nearest(
        from: usize,
        graph: &Graph,
        pois: &PoiIndex,
        max_results: usize,
    ) -> Vec<usize> {
        let node_count = graph.number_of_nodes();
        let (mut queue, mut travel_times) = Self::get_initial_queue(node_count, from);
        let mut predecessors: Vec<Option<usize>> = vec![None; node_count];
        let mut found = Vec::new();

        while let Some((current_id, current_distance)) = queue.pop() {
            if current_distance.get() == u32::MAX {
                break;
            }
            // membership is checked on extraction, before relaxing any edges
            if pois.contains(current_id) {
                found.push(current_id);
                if found.len() == max_results {
                    break;
                }
            }

            Self::relax_edges(
                current_id,
                current_distance.get(),
                graph,
                &mut queue,
                &mut travel_times,
                &mut predecessors,
            );
        }
        found
    }

    fn relax_edges(
        current_id: usize,
        current_distance: u32,
        graph: &Graph,
        queue: &mut KeyedPriorityQueue<usize, Distance>,
        travel_times: &mut [u32],
        predecessors: &mut [Option<usize>],
    ) {
        let begin_index_adjacent_nodes = graph.first_out[current_id];
        let end_index_adjacent_nodes = graph.first_out[current_id + 1];

        for i in begin_index_adjacent_nodes..end_index_adjacent_nodes {
            let neighbour = graph.head[i];

            if let Entry::Vacant(_) = queue.entry(neighbour) {
                continue;
            }

            let new_distance = current_distance.saturating_add(graph.travel_time[i]);
            if new_distance < travel_times[neighbour] {
                match queue.entry(neighbour) {
                    Entry::Occupied(e) => {
                        e.set_priority(Distance(new_distance));
                    }
                    Entry::Vacant(_) => {
                        unreachable!();
                    }
                }
                travel_times[neighbour] = new_distance;
                predecessors[neighbour] = Some(current_id);
            }
        }
    }

    fn get_initial_queue(
        node_count: usize,
        from: usize,
    ) -> (KeyedPriorityQueue<usize, Distance>, Vec<u32>) {
        let mut queue = KeyedPriorityQueue::new();
        let mut distances = Vec::with_capacity(node_count);
        for i in 0..node_count {
            let distance = if i == from { Distance(0) } else { Distance(u32::MAX) };
            distances.push(distance.0);
            queue.push(i, distance);
        }
        (queue, distances)
    }
}

/// Plain Dijkstra behind the [`Router`] seam.
pub struct DijkstraRouter {
    graph: ForwardBackwardGraph,
}

impl DijkstraRouter {
    pub fn new(graph: ForwardBackwardGraph) -> Self {
        DijkstraRouter { graph }
    }

    pub fn graph(&self) -> &ForwardBackwardGraph {
        &self.graph
    }
}

impl Router for DijkstraRouter {
    fn query(&self, from: usize, to: usize) -> QueryResult {
        Dijkstra::query(from, to, &self.graph.forward_graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::io::poi::tests::poi_index;
    use crate::routing::dijkstra::Dijkstra;
    use crate::routing::graph::tests::{line_graph, two_route_graph};

    #[test]
    fn line_graph_distances() {
        let graph = line_graph();
        let distances = Dijkstra::distance_one_2_many(0, &graph.forward_graph);
        assert_eq!(distances, vec![0, 5, 8, 10]);
    }

    #[test]
    fn line_graph_query_with_path() {
        let graph = line_graph();
        let result = Dijkstra::query(0, 3, &graph.forward_graph);
        assert_eq!(result.travel_time, Some(10));
        assert_eq!(result.path, Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn line_graph_is_directed() {
        let graph = line_graph();
        let result = Dijkstra::query(3, 0, &graph.forward_graph);
        assert_eq!(result.travel_time, None);
        assert_eq!(result.path, None);
    }

    #[test]
    fn query_to_self() {
        let graph = line_graph();
        let result = Dijkstra::query(2, 2, &graph.forward_graph);
        assert_eq!(result.travel_time, Some(0));
        assert_eq!(result.path, Some(vec![2]));
    }

    #[test]
    fn picks_shortcut_route() {
        let graph = two_route_graph();
        let result = Dijkstra::query(0, 4, &graph.forward_graph);
        assert_eq!(result.travel_time, Some(6));
        assert_eq!(result.path, Some(vec![0, 1, 4]));

        let result = Dijkstra::query(0, 5, &graph.forward_graph);
        assert_eq!(result.travel_time, Some(12));
        assert_eq!(result.path, Some(vec![0, 1, 2, 5]));
    }

    #[test]
    fn isolated_node_is_not_reachable() {
        let graph = two_route_graph();
        assert_eq!(Dijkstra::query(0, 7, &graph.forward_graph).travel_time, None);
        assert_eq!(Dijkstra::query(6, 0, &graph.forward_graph).travel_time, None);
    }

    #[test]
    fn finds_nearest_pois_in_discovery_order() {
        let graph = two_route_graph();
        // travel times from 0: node 1 = 4, node 4 = 6, node 5 = 12
        let pois = poi_index(&[1, 4, 5, 7]);
        assert_eq!(
            Dijkstra::find_nearest(0, &graph.forward_graph, &pois, 2),
            vec![1, 4]
        );
    }

    #[test]
    fn find_nearest_stops_when_queue_runs_dry() {
        let graph = two_route_graph();
        // node 7 is isolated, only three of the four can ever be found
        let pois = poi_index(&[1, 4, 5, 7]);
        assert_eq!(
            Dijkstra::find_nearest(0, &graph.forward_graph, &pois, 10),
            vec![1, 4, 5]
        );
    }

    #[test]
    fn source_counts_as_nearest_poi() {
        let graph = two_route_graph();
        let pois = poi_index(&[0, 4]);
        assert_eq!(
            Dijkstra::find_nearest(0, &graph.forward_graph, &pois, 1),
            vec![0]
        );
    }
}
