use std::fmt::Debug;

/// Common seam for the point-to-point search implementations, so callers can
/// swap the plain and the landmark accelerated search behind one interface.
pub trait Router {
    fn query(&self, from: usize, to: usize) -> QueryResult;
}

impl Debug for dyn Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Router")
    }
}

/// Result of a point-to-point query. `travel_time` and `path` are `None`
/// when no path exists. `nodes_polled` counts queue extractions and makes
/// the search effort observable to callers.
#[derive(Debug, PartialEq)]
pub struct QueryResult {
    pub travel_time: Option<u32>,
    pub path: Option<Vec<usize>>,
    pub nodes_polled: usize,
}

impl QueryResult {
    pub(crate) fn from_search(
        target: usize,
        travel_times: &[u32],
        predecessors: &[Option<usize>],
        nodes_polled: usize,
    ) -> Self {
        if travel_times[target] == u32::MAX {
            return QueryResult {
                travel_time: None,
                path: None,
                nodes_polled,
            };
        }

        // retrace the path backwards, the source is the one node without a
        // predecessor
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = predecessors[node];
        }
        path.reverse();

        QueryResult {
            travel_time: Some(travel_times[target]),
            path: Some(path),
            nodes_polled,
        }
    }
}
