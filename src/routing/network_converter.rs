use itertools::Itertools;
use tracing::info;

use crate::io::network::RoadNetwork;
use crate::routing::graph::{ForwardBackwardGraph, Graph};

pub struct NetworkConverter {}

impl NetworkConverter {
    /// Builds the forward and the edge-inverted adjacency arrays in one pass
    /// over the node ids. The two graphs share no storage, so heuristic
    /// computation can address both at the same time.
    pub fn convert(network: &RoadNetwork) -> ForwardBackwardGraph {
        info!(
            "Converting road network with {} nodes and {} edges to forward backward graph.",
            network.number_of_nodes(),
            network.number_of_edges()
        );

        let node_count = network.number_of_nodes();
        let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut in_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (index, edge) in network.edges.iter().enumerate() {
            out_edges[edge.from].push(index);
            in_edges[edge.to].push(index);
        }

        let mut forward_first_out = Vec::with_capacity(node_count + 1);
        let mut forward_head = Vec::new();
        let mut forward_travel_time = Vec::new();

        let mut backward_first_out = Vec::with_capacity(node_count + 1);
        let mut backward_head = Vec::new();
        let mut backward_travel_time = Vec::new();

        let mut x = Vec::with_capacity(node_count);
        let mut y = Vec::with_capacity(node_count);

        for (index, node) in network.nodes.iter().enumerate() {
            // the loader hands out nodes indexed by their dense id
            debug_assert_eq!(node.id, index);
            x.push(node.lon);
            y.push(node.lat);

            forward_first_out.push(forward_head.len());
            backward_first_out.push(backward_head.len());

            for &index in out_edges[node.id].iter().sorted_by_key(|&&i| network.edges[i].to) {
                let edge = &network.edges[index];
                forward_head.push(edge.to);
                forward_travel_time.push(edge.travel_time);
            }

            for &index in in_edges[node.id].iter().sorted_by_key(|&&i| network.edges[i].from) {
                // reversed: in the backward graph this edge leaves `node`
                let edge = &network.edges[index];
                backward_head.push(edge.from);
                backward_travel_time.push(edge.travel_time);
            }
        }
        forward_first_out.push(forward_head.len());
        backward_first_out.push(backward_head.len());

        let forward_graph = Graph {
            first_out: forward_first_out,
            head: forward_head,
            travel_time: forward_travel_time,
            x: x.clone(),
            y: y.clone(),
        };
        let backward_graph = Graph {
            first_out: backward_first_out,
            head: backward_head,
            travel_time: backward_travel_time,
            x,
            y,
        };

        ForwardBackwardGraph::new(forward_graph, backward_graph)
    }
}
