/// A road graph and its edge-inverted twin. The backward graph carries every
/// edge of the forward graph with `from` and `to` swapped, so a one-to-many
/// search on it yields travel times *into* a node instead of out of it.
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardBackwardGraph {
    pub forward_graph: Graph,
    pub backward_graph: Graph,
}

impl ForwardBackwardGraph {
    pub fn new(forward_graph: Graph, backward_graph: Graph) -> Self {
        let graph = Self {
            forward_graph,
            backward_graph,
        };
        graph.validate_else_panic();
        graph
    }

    fn validate_else_panic(&self) {
        assert_eq!(
            self.forward_graph.head.len(),
            self.backward_graph.head.len()
        );
        assert_eq!(
            self.forward_graph.travel_time.len(),
            self.backward_graph.travel_time.len()
        );
        assert_eq!(
            self.forward_graph.first_out.len(),
            self.backward_graph.first_out.len()
        );
    }

    pub fn forward_first_out(&self) -> &Vec<usize> {
        &self.forward_graph.first_out
    }

    pub fn forward_head(&self) -> &Vec<usize> {
        &self.forward_graph.head
    }

    pub fn forward_travel_time(&self) -> &Vec<u32> {
        &self.forward_graph.travel_time
    }

    pub fn number_of_nodes(&self) -> usize {
        self.forward_graph.number_of_nodes()
    }

    pub fn number_of_edges(&self) -> usize {
        self.forward_graph.head.len()
    }
}

/// Adjacency arrays in compressed sparse row form. Outgoing edges of node `n`
/// occupy the index range `first_out[n]..first_out[n + 1]` of `head` and
/// `travel_time`. `x` and `y` hold longitude and latitude per node and are
/// only used for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    pub(crate) first_out: Vec<usize>,
    pub(crate) head: Vec<usize>,
    pub(crate) travel_time: Vec<u32>,
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
}

impl Graph {
    pub fn number_of_nodes(&self) -> usize {
        self.first_out.len() - 1
    }

    pub fn number_of_edges(&self) -> usize {
        self.head.len()
    }

    #[cfg(test)]
    pub(crate) fn from_adjacency(first_out: Vec<usize>, head: Vec<usize>, travel_time: Vec<u32>) -> Graph {
        let node_count = first_out.len() - 1;
        Graph {
            first_out,
            head,
            travel_time,
            x: vec![0.; node_count],
            y: vec![0.; node_count],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::io::network::{RoadEdge, RoadNetwork, RoadNode};
    use crate::routing::graph::{ForwardBackwardGraph, Graph};
    use crate::routing::network_converter::NetworkConverter;

    pub(crate) fn node(id: usize, lat: f64, lon: f64) -> RoadNode {
        RoadNode { id, lat, lon }
    }

    pub(crate) fn edge(from: usize, to: usize, travel_time: u32) -> RoadEdge {
        RoadEdge {
            from,
            to,
            travel_time,
            length: travel_time * 10,
            speed_limit: 50,
        }
    }

    /// 0 -> 1 -> 2 -> 3, one direction only.
    pub(crate) fn line_network() -> RoadNetwork {
        RoadNetwork {
            nodes: (0..4).map(|i| node(i, 63.40 + i as f64 * 0.01, 10.40)).collect(),
            edges: vec![edge(0, 1, 5), edge(1, 2, 3), edge(2, 3, 2)],
        }
    }

    pub(crate) fn line_graph() -> ForwardBackwardGraph {
        NetworkConverter::convert(&line_network())
    }

    /// Eight nodes. Two competing routes from 0 to 5, a one-way shortcut
    /// 1 -> 4, a sink node 6 and an isolated node 7.
    pub(crate) fn two_route_network() -> RoadNetwork {
        let mut edges = Vec::new();
        for (a, b, w) in [(0, 1, 4), (1, 2, 4), (2, 5, 4), (0, 3, 3), (3, 4, 5), (4, 5, 7)] {
            edges.push(edge(a, b, w));
            edges.push(edge(b, a, w));
        }
        edges.push(edge(1, 4, 2));
        edges.push(edge(5, 6, 1));
        RoadNetwork {
            nodes: (0..8).map(|i| node(i, 63.40 + i as f64 * 0.01, 10.40 + i as f64 * 0.01)).collect(),
            edges,
        }
    }

    pub(crate) fn two_route_graph() -> ForwardBackwardGraph {
        NetworkConverter::convert(&two_route_network())
    }

    #[test]
    #[should_panic]
    fn graph_not_valid() {
        ForwardBackwardGraph::new(
            Graph::from_adjacency(
                vec![0, 1, 2],
                vec![0, 1, 2, 3, 4, 5],
                vec![1, 1, 1, 1, 1, 1],
            ),
            Graph::from_adjacency(vec![0, 1, 2], vec![0, 1, 2, 3, 4], vec![1, 1, 1, 1, 1]),
        );
    }

    #[test]
    fn graph_valid() {
        let graph = ForwardBackwardGraph::new(
            Graph::from_adjacency(vec![0, 1, 2], vec![1, 0], vec![3, 3]),
            Graph::from_adjacency(vec![0, 1, 2], vec![1, 0], vec![3, 3]),
        );
        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.number_of_edges(), 2);
    }
}
