use std::path::Path;

use clap::Parser;
use tracing::info;

use rust_alt_router::config::Config;
use rust_alt_router::io::{network, poi, resolve_path};
use rust_alt_router::routing::dijkstra::Dijkstra;
use rust_alt_router::routing::network_converter::NetworkConverter;

/// Finds the points of interest of a category that are closest to a node,
/// in travel time.
fn main() {
    let _guard = rust_alt_router::logging::init_std_out_logging();
    let args = InputArgs::parse();
    let config = Config::from_file(Path::new(&args.config));

    let node_path = resolve_path(config.context(), &config.network.nodes);
    let edge_path = resolve_path(config.context(), &config.network.edges);
    let network = network::from_files(&node_path, &edge_path)
        .unwrap_or_else(|e| panic!("Failed to load road network: {e}"));
    let graph = NetworkConverter::convert(&network);

    let poi_path = config
        .poi
        .as_ref()
        .expect("The config does not name a point of interest file.");
    let poi_path = resolve_path(config.context(), poi_path);
    let index = poi::from_file(&poi_path, graph.number_of_nodes(), args.poi_type)
        .unwrap_or_else(|e| panic!("Failed to load points of interest: {e}"));

    let found = Dijkstra::find_nearest(args.from, &graph.forward_graph, &index, args.count);
    info!(
        "Found {} points of interest of type {:#b} around node {}:",
        found.len(),
        args.poi_type,
        args.from
    );
    for node in found {
        let name = index.get(node).map(|poi| poi.name.as_str()).unwrap_or("");
        let road_node = &network.nodes[node];
        info!("{} {:?} at {},{}", node, name, road_node.lat, road_node.lon);
    }
}

#[derive(Parser, Debug)]
struct InputArgs {
    #[arg(short, long)]
    pub config: String,
    #[arg(long)]
    pub from: usize,
    #[arg(long)]
    pub poi_type: u32,
    #[arg(long, default_value_t = 8)]
    pub count: usize,
}
