use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::info;

/// Raised when graph or point-of-interest input cannot be loaded. Nothing
/// partially parsed escapes to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of file at line {line}")]
    Truncated { line: usize },
    #[error("line {line}: could not parse record {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: node id {id} is outside of [0, {node_count})")]
    IdOutOfRange {
        line: usize,
        id: usize,
        node_count: usize,
    },
    #[error("line {line}: duplicate node id {id}")]
    DuplicateId { line: usize, id: usize },
    #[error("declared {declared} records but the file ends after {found}")]
    CountMismatch { declared: usize, found: usize },
    #[error("declared {declared} records but the file continues at line {line}")]
    TrailingRecords { declared: usize, line: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoadNode {
    pub id: usize,
    pub lat: f64,
    pub lon: f64,
}

/// Directed edge. `travel_time` is the search weight in hundredths of a
/// second; `length` (meters) and `speed_limit` (km/h) are carried for
/// reporting only.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadEdge {
    pub from: usize,
    pub to: usize,
    pub travel_time: u32,
    pub length: u32,
    pub speed_limit: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoadNetwork {
    pub nodes: Vec<RoadNode>,
    pub edges: Vec<RoadEdge>,
}

impl RoadNetwork {
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }
}

pub fn from_files(node_path: &Path, edge_path: &Path) -> Result<RoadNetwork, LoadError> {
    let nodes = read_nodes(buffered_reader(node_path)?)?;
    let edges = read_edges(buffered_reader(edge_path)?, nodes.len())?;
    info!(
        "Loaded road network with {} nodes and {} edges.",
        nodes.len(),
        edges.len()
    );
    Ok(RoadNetwork { nodes, edges })
}

/// Opens a buffered reader over a possibly gzip compressed text file.
pub(crate) fn buffered_reader(path: &Path) -> Result<Box<dyn BufRead>, LoadError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext.eq("gz")) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Node file: first line is the node count, then one `id latitude longitude`
/// record per line. Ids must form a permutation of `[0, count)`.
pub fn read_nodes(reader: impl BufRead) -> Result<Vec<RoadNode>, LoadError> {
    let mut lines = reader.lines().enumerate();
    let declared = read_count(&mut lines)?;

    let mut nodes: Vec<Option<RoadNode>> = (0..declared).map(|_| None).collect();
    for found in 0..declared {
        let (index, line) = lines.next().ok_or(LoadError::CountMismatch { declared, found })?;
        let content = line?;
        let mut fields = content.split_whitespace();
        let id = parse_field(&mut fields, index, &content)?;
        let lat = parse_field(&mut fields, index, &content)?;
        let lon = parse_field(&mut fields, index, &content)?;

        if id >= declared {
            return Err(LoadError::IdOutOfRange {
                line: index + 1,
                id,
                node_count: declared,
            });
        }
        if nodes[id].is_some() {
            return Err(LoadError::DuplicateId { line: index + 1, id });
        }
        nodes[id] = Some(RoadNode { id, lat, lon });
    }
    reject_trailing_records(lines, declared)?;

    // every slot is filled: `declared` unique in-range ids were inserted
    Ok(nodes.into_iter().map(|n| n.unwrap()).collect())
}

/// Edge file: first line is the edge count, then one
/// `fromId toId travelTime length speedLimit` record per line.
pub fn read_edges(reader: impl BufRead, node_count: usize) -> Result<Vec<RoadEdge>, LoadError> {
    let mut lines = reader.lines().enumerate();
    let declared = read_count(&mut lines)?;

    let mut edges = Vec::with_capacity(declared);
    for found in 0..declared {
        let (index, line) = lines.next().ok_or(LoadError::CountMismatch { declared, found })?;
        let content = line?;
        let mut fields = content.split_whitespace();
        let from = parse_field(&mut fields, index, &content)?;
        let to = parse_field(&mut fields, index, &content)?;
        let travel_time = parse_field(&mut fields, index, &content)?;
        let length = parse_field(&mut fields, index, &content)?;
        let speed_limit = parse_field(&mut fields, index, &content)?;

        for id in [from, to] {
            if id >= node_count {
                return Err(LoadError::IdOutOfRange {
                    line: index + 1,
                    id,
                    node_count,
                });
            }
        }
        edges.push(RoadEdge {
            from,
            to,
            travel_time,
            length,
            speed_limit,
        });
    }
    reject_trailing_records(lines, declared)?;

    Ok(edges)
}

type Lines<R> = std::iter::Enumerate<std::io::Lines<R>>;

fn read_count<R: BufRead>(lines: &mut Lines<R>) -> Result<usize, LoadError> {
    let (index, line) = lines.next().ok_or(LoadError::Truncated { line: 1 })?;
    let content = line?;
    parse_field(&mut content.split_whitespace(), index, &content)
}

fn parse_field<'a, T: std::str::FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    index: usize,
    content: &str,
) -> Result<T, LoadError> {
    fields
        .next()
        .and_then(|field| field.parse::<T>().ok())
        .ok_or_else(|| LoadError::Malformed {
            line: index + 1,
            content: content.to_string(),
        })
}

fn reject_trailing_records<R: BufRead>(lines: Lines<R>, declared: usize) -> Result<(), LoadError> {
    for (index, line) in lines {
        if !line?.trim().is_empty() {
            return Err(LoadError::TrailingRecords {
                declared,
                line: index + 1,
            });
        }
    }
    Ok(())
}
