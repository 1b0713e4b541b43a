use rand::SeedableRng;
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::info;

use crate::routing::dijkstra::Dijkstra;
use crate::routing::graph::ForwardBackwardGraph;

/// Travel time from the landmark to a node (forward graph) and from the node
/// to the landmark (computed on the backward graph).
pub type ForwardBackwardTravelTime = (u32, u32);

const DEFAULT_NUMBER_OF_LANDMARKS: usize = 16;

/// Precomputed landmark distance tables. One entry per landmark, each holding
/// `number_of_nodes` forward/backward travel time pairs with `u32::MAX` for
/// unreachable nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct AltLandmarkData {
    landmarks: Vec<usize>,
    travel_times_to_all: Vec<Vec<ForwardBackwardTravelTime>>,
}

impl AltLandmarkData {
    /// Runs the preprocessing for a caller supplied landmark list. Which
    /// nodes make good landmarks is left to the caller.
    pub fn new(graph: &ForwardBackwardGraph, landmarks: Vec<usize>) -> AltLandmarkData {
        for &landmark in &landmarks {
            assert!(
                landmark < graph.number_of_nodes(),
                "Landmark {} does not exist in a graph with {} nodes.",
                landmark,
                graph.number_of_nodes()
            );
        }
        info!("Calculating distance tables for {} landmarks.", landmarks.len());
        let travel_times_to_all = Self::calculate_distances(graph, &landmarks);
        AltLandmarkData {
            landmarks,
            travel_times_to_all,
        }
    }

    /// Convenience selection of seeded random landmarks for callers without
    /// an own list.
    pub fn with_random_landmarks(graph: &ForwardBackwardGraph) -> AltLandmarkData {
        Self::new(graph, Self::choose_landmarks(graph))
    }

    /// Reassembles tables that were produced by [`Self::new`] earlier, e.g.
    /// read back from a file.
    pub fn from_parts(
        landmarks: Vec<usize>,
        travel_times_to_all: Vec<Vec<ForwardBackwardTravelTime>>,
    ) -> AltLandmarkData {
        assert_eq!(landmarks.len(), travel_times_to_all.len());
        for travel_times in &travel_times_to_all {
            assert_eq!(
                travel_times.len(),
                travel_times_to_all[0].len(),
                "All landmark tables must cover the same node count."
            );
        }
        AltLandmarkData {
            landmarks,
            travel_times_to_all,
        }
    }

    pub fn landmarks(&self) -> &[usize] {
        &self.landmarks
    }

    pub fn travel_times_to_all(&self) -> &Vec<Vec<ForwardBackwardTravelTime>> {
        &self.travel_times_to_all
    }

    /// Node count the tables were computed for, 0 if there are no landmarks.
    pub fn number_of_nodes(&self) -> usize {
        self.travel_times_to_all.first().map_or(0, |t| t.len())
    }

    fn choose_landmarks(graph: &ForwardBackwardGraph) -> Vec<usize> {
        let number_of_landmarks = if graph.number_of_nodes() < DEFAULT_NUMBER_OF_LANDMARKS.pow(2) {
            (graph.number_of_nodes() as f64 / 16.).ceil() as usize
        } else {
            DEFAULT_NUMBER_OF_LANDMARKS
        };
        (0..graph.number_of_nodes())
            .choose_multiple(&mut StdRng::seed_from_u64(42), number_of_landmarks)
    }

    fn calculate_distances(
        graph: &ForwardBackwardGraph,
        landmarks: &[usize],
    ) -> Vec<Vec<ForwardBackwardTravelTime>> {
        // the per landmark runs are independent and only read the graph, so
        // they can run in parallel with their own scratch each
        landmarks
            .par_iter()
            .map(|&landmark| {
                Dijkstra::distance_one_2_many(landmark, &graph.forward_graph)
                    .into_iter()
                    .zip(Dijkstra::distance_one_2_many(landmark, &graph.backward_graph))
                    .collect::<Vec<ForwardBackwardTravelTime>>()
            })
            .collect()
    }
}
