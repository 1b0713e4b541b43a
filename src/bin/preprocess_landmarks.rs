use std::path::Path;

use clap::Parser;
use tracing::info;

use rust_alt_router::config::Config;
use rust_alt_router::io::{landmarks, network, resolve_path};
use rust_alt_router::routing::alt_landmark_data::AltLandmarkData;
use rust_alt_router::routing::network_converter::NetworkConverter;

/// Runs the landmark preprocessing once and writes the distance tables to
/// the table file named in the config, so queries can reuse them.
fn main() {
    let _guard = rust_alt_router::logging::init_std_out_logging();
    let args = InputArgs::parse();
    let config = Config::from_file(Path::new(&args.config));

    let node_path = resolve_path(config.context(), &config.network.nodes);
    let edge_path = resolve_path(config.context(), &config.network.edges);
    let network = network::from_files(&node_path, &edge_path)
        .unwrap_or_else(|e| panic!("Failed to load road network: {e}"));

    let graph = NetworkConverter::convert(&network);

    let data = if config.landmarks.ids.is_empty() {
        info!("No landmark ids configured, choosing seeded random landmarks.");
        AltLandmarkData::with_random_landmarks(&graph)
    } else {
        AltLandmarkData::new(&graph, config.landmarks.ids.clone())
    };

    let table_path = resolve_path(config.context(), &config.landmarks.table);
    landmarks::write_to_file(&data, &table_path)
        .unwrap_or_else(|e| panic!("Failed to write landmark table to {table_path:?}: {e}"));
}

#[derive(Parser, Debug)]
struct InputArgs {
    #[arg(short, long)]
    pub config: String,
}
