use std::path::Path;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use rust_alt_router::config::Config;
use rust_alt_router::io::network::RoadNetwork;
use rust_alt_router::io::{landmarks, network, resolve_path};
use rust_alt_router::routing::alt_landmark_data::AltLandmarkData;
use rust_alt_router::routing::alt_router::AltRouter;
use rust_alt_router::routing::dijkstra::DijkstraRouter;
use rust_alt_router::routing::graph::ForwardBackwardGraph;
use rust_alt_router::routing::network_converter::NetworkConverter;
use rust_alt_router::routing::router::Router;

/// Answers a single shortest travel time query, either with plain Dijkstra
/// or with the landmark accelerated search.
fn main() {
    let args = InputArgs::parse();
    let config = Config::from_file(Path::new(&args.config));
    let _guards = rust_alt_router::logging::init_logging(&config);

    let node_path = resolve_path(config.context(), &config.network.nodes);
    let edge_path = resolve_path(config.context(), &config.network.edges);
    let network = network::from_files(&node_path, &edge_path)
        .unwrap_or_else(|e| panic!("Failed to load road network: {e}"));
    let graph = NetworkConverter::convert(&network);

    assert!(
        args.from < graph.number_of_nodes() && args.to < graph.number_of_nodes(),
        "Query nodes must be inside [0, {}).",
        graph.number_of_nodes()
    );

    let router: Box<dyn Router> = match args.algorithm {
        Algorithm::Dijkstra => Box::new(DijkstraRouter::new(graph)),
        Algorithm::Alt => {
            let data = load_or_preprocess(&config, &graph);
            Box::new(AltRouter::new(graph, data))
        }
    };

    let result = router.query(args.from, args.to);
    match result.travel_time {
        Some(travel_time) => {
            // travel times are stored in hundredths of a second
            let seconds = travel_time / 100;
            info!(
                "Shortest travel time from {} to {}: {}h {}min {}s. Expanded {} nodes.",
                args.from,
                args.to,
                seconds / 3600,
                (seconds % 3600) / 60,
                seconds % 60,
                result.nodes_polled
            );
            if let Some(path) = &result.path {
                info!("The shortest path visits {} nodes.", path.len());
                if args.show_path {
                    print_path(path, &network);
                }
            }
        }
        None => info!("No path from {} to {} exists.", args.from, args.to),
    }
}

/// Reads the preprocessed table from the configured file. A table that cannot
/// be decoded or that belongs to a different graph is replaced by running the
/// preprocessing again.
fn load_or_preprocess(config: &Config, graph: &ForwardBackwardGraph) -> AltLandmarkData {
    let table_path = resolve_path(config.context(), &config.landmarks.table);
    match landmarks::from_file(&table_path) {
        Ok(data) if data.number_of_nodes() == graph.number_of_nodes() => data,
        Ok(_) => {
            warn!(
                "Landmark table {:?} does not cover this network, running preprocessing instead.",
                table_path
            );
            preprocess(config, graph)
        }
        Err(e) => {
            warn!(
                "Could not read landmark table {:?} ({e}), running preprocessing instead.",
                table_path
            );
            preprocess(config, graph)
        }
    }
}

fn preprocess(config: &Config, graph: &ForwardBackwardGraph) -> AltLandmarkData {
    if config.landmarks.ids.is_empty() {
        AltLandmarkData::with_random_landmarks(graph)
    } else {
        AltLandmarkData::new(graph, config.landmarks.ids.clone())
    }
}

fn print_path(path: &[usize], network: &RoadNetwork) {
    for &node in path {
        let road_node = &network.nodes[node];
        info!("{} {},{}", node, road_node.lat, road_node.lon);
    }
}

#[derive(Parser, Debug)]
struct InputArgs {
    #[arg(short, long)]
    pub config: String,
    #[arg(long)]
    pub from: usize,
    #[arg(long)]
    pub to: usize,
    #[arg(long, value_enum, default_value_t = Algorithm::Alt)]
    pub algorithm: Algorithm,
    #[arg(long)]
    pub show_path: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Algorithm {
    Dijkstra,
    Alt,
}
