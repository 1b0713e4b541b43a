use std::path::Path;

use rust_alt_router::config::Config;
use rust_alt_router::io::{landmarks, network, poi, resolve_path};
use rust_alt_router::routing::alt_landmark_data::AltLandmarkData;
use rust_alt_router::routing::alt_router::AltRouter;
use rust_alt_router::routing::dijkstra::Dijkstra;
use rust_alt_router::routing::graph::ForwardBackwardGraph;
use rust_alt_router::routing::network_converter::NetworkConverter;
use rust_alt_router::routing::router::Router;

fn load_graph(dir: &str) -> ForwardBackwardGraph {
    let network = network::from_files(
        Path::new(&format!("./tests/resources/{dir}/nodes.txt")),
        Path::new(&format!("./tests/resources/{dir}/edges.txt")),
    )
    .unwrap();
    NetworkConverter::convert(&network)
}

#[test]
fn line_scenario() {
    let graph = load_graph("line");

    let result = Dijkstra::query(0, 3, &graph.forward_graph);
    assert_eq!(result.travel_time, Some(10));
    assert_eq!(result.path, Some(vec![0, 1, 2, 3]));

    // edges are directed, the way back does not exist
    let result = Dijkstra::query(3, 0, &graph.forward_graph);
    assert_eq!(result.travel_time, None);
    assert_eq!(result.path, None);

    let data = AltLandmarkData::new(&graph, vec![0]);
    assert_eq!(
        data.travel_times_to_all()[0],
        vec![(0, 0), (5, u32::MAX), (8, u32::MAX), (10, u32::MAX)]
    );
}

#[test]
fn grid_queries() {
    let graph = load_graph("grid");

    let result = Dijkstra::query(0, 8, &graph.forward_graph);
    assert_eq!(result.travel_time, Some(7));

    let result = Dijkstra::query(0, 2, &graph.forward_graph);
    assert_eq!(result.travel_time, Some(6));
    assert_eq!(result.path, Some(vec![0, 1, 2]));

    // node 9 is an island
    assert_eq!(Dijkstra::query(0, 9, &graph.forward_graph).travel_time, None);
    assert_eq!(Dijkstra::query(9, 0, &graph.forward_graph).travel_time, None);
}

#[test]
fn alt_agrees_with_dijkstra_after_table_round_trip() {
    let graph = load_graph("grid");
    let data = AltLandmarkData::new(&graph, vec![0, 8]);

    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("landmarks.txt");
    landmarks::write_to_file(&data, &table_path).unwrap();
    let decoded = landmarks::from_file(&table_path).unwrap();
    assert_eq!(decoded, data);

    let router = AltRouter::new(graph.clone(), decoded);
    for from in 0..graph.number_of_nodes() {
        for to in 0..graph.number_of_nodes() {
            let alt = router.query(from, to);
            let dijkstra = Dijkstra::query(from, to, &graph.forward_graph);
            assert_eq!(alt.travel_time, dijkstra.travel_time, "query {from} -> {to}");
            assert!(
                alt.nodes_polled <= dijkstra.nodes_polled,
                "query {from} -> {to}: alt polled {}, dijkstra polled {}",
                alt.nodes_polled,
                dijkstra.nodes_polled
            );
        }
    }
}

#[test]
fn nearest_pois_by_travel_time() {
    let graph = load_graph("grid");
    let poi_path = Path::new("./tests/resources/grid/pois.txt");

    // fuel stations carry bit 2: nodes 4, 8 and the unreachable island 9
    let fuel = poi::from_file(poi_path, graph.number_of_nodes(), 2).unwrap();
    assert_eq!(fuel.len(), 3);
    assert_eq!(
        Dijkstra::find_nearest(0, &graph.forward_graph, &fuel, 2),
        vec![4, 8]
    );
    // asking for more than is reachable returns what is there
    assert_eq!(
        Dijkstra::find_nearest(0, &graph.forward_graph, &fuel, 5),
        vec![4, 8]
    );

    // charging stations carry bit 4: nodes 2 and 8
    let charging = poi::from_file(poi_path, graph.number_of_nodes(), 4).unwrap();
    assert_eq!(
        Dijkstra::find_nearest(0, &graph.forward_graph, &charging, 1),
        vec![2]
    );
}

#[test]
fn scenario_loads_through_config() {
    let config = Config::from_file(Path::new("./tests/resources/grid/config.yml"));
    let network = network::from_files(
        &resolve_path(config.context(), &config.network.nodes),
        &resolve_path(config.context(), &config.network.edges),
    )
    .unwrap();
    assert_eq!(network.number_of_nodes(), 10);
    assert_eq!(network.number_of_edges(), 25);
    assert_eq!(config.landmarks.ids, vec![0, 8]);

    let graph = NetworkConverter::convert(&network);
    let data = AltLandmarkData::new(&graph, config.landmarks.ids.clone());
    let router = AltRouter::new(graph, data);
    assert_eq!(router.query(0, 8).travel_time, Some(7));
}
